use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use smartia::core::config::{self, CliOverrides, SmartiaConfig};
use smartia::{Agent, BackendKind};
use std::fs::File;

#[derive(Parser)]
#[command(name = "smartia", about = "Terminal demo of the SmartIA WhatsApp agents")]
struct Args {
    /// Demo agent to start with
    #[arg(short, long, value_enum)]
    agent: Option<Agent>,

    /// Base URL of the simulate API
    #[arg(long)]
    api_base: Option<String>,

    /// Where agent replies come from
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the TUI, so logs go to smartia.log in the current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("smartia.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("smartia: {e} (using defaults)");
            SmartiaConfig::default()
        }
    };

    let overrides = CliOverrides {
        agent: args.agent,
        api_base: args.api_base,
        backend: args.backend,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "SmartIA simulator starting: agent={}, backend={}, api_base={}",
        resolved.agent,
        resolved.backend.as_str(),
        resolved.api_base
    );

    smartia::tui::run(resolved)
}
