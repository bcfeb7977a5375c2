//! # AgentBar Component
//!
//! Header of the chat: which agent is active, the other agents one key away,
//! and the conversation state the backend last reported.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::agent::Agent;
use crate::tui::component::Component;

const TITLE: &str = " SmartIA · Simulador de Agentes ";
const SWITCH_HINT: &str = "F1-F4 / Tab";

/// # Props
///
/// - `agent`: the selected agent
/// - `state_label`: last reported conversation state
pub struct AgentBar<'a> {
    pub agent: Agent,
    pub state_label: &'a str,
}

impl<'a> AgentBar<'a> {
    /// Borders plus three lines: label, badges, state.
    pub const HEIGHT: u16 = 5;

    pub fn new(agent: Agent, state_label: &'a str) -> Self {
        Self { agent, state_label }
    }

    fn badge_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(Agent::ALL.len() * 2 + 1);
        for (i, agent) in Agent::ALL.iter().enumerate() {
            let label = format!(" F{} {} ", i + 1, agent.badge());
            let style = if *agent == self.agent {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {SWITCH_HINT}"),
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }
}

impl Component for AgentBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue))
            .title(TITLE);

        let lines = vec![
            Line::from(Span::styled(
                self.agent.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            self.badge_line(),
            Line::from(vec![
                Span::styled("Estado atual: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.state_label.to_string(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
