use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable piece of the chat screen.
///
/// Components receive data as props (struct fields), may keep presentation
/// state, and draw themselves into a `Rect` of the frame. `render` takes
/// `&mut self` so a component can update scroll offsets or cached sizes
/// while drawing, as ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
