use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AgentBar, InputBox, MessageList, StatusBar};

/// Draw the whole chat screen: agent header, transcript, input, status line.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(AgentBar::HEIGHT),
        Min(0),
        Length(InputBox::HEIGHT),
        Length(1),
    ]);
    let [header_area, transcript_area, input_area, status_area] = layout.areas(frame.area());

    AgentBar::new(app.agent, &app.state_label).render(frame, header_area);

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.is_pending(),
        tui.pulse_value,
    )
    .render(frame, transcript_area);

    tui.input_box.render(frame, input_area);

    StatusBar::new(app.backend.name(), &app.status_message).render(frame, status_area);
}
