//! Cursor position and horizontal scrolling for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the first visible column.
//! All methods accept `buffer: &str` explicitly; the text is owned by `InputBox`.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;
/// Left + right borders consumed horizontally
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First display column shown in the field
    pub scroll_col: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_col: 0,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_col = 0;
    }

    /// Display column of the cursor, counting wide characters correctly.
    pub fn column(&self, buffer: &str) -> usize {
        UnicodeWidthStr::width(&buffer[..self.pos])
    }

    /// Scroll horizontally so the cursor stays inside `visible_width` columns.
    pub fn update_scroll(&mut self, buffer: &str, visible_width: u16) {
        let col = self.column(buffer);
        let visible = usize::from(visible_width);
        let scroll = usize::from(self.scroll_col);
        let scroll = if visible == 0 || col < scroll {
            col
        } else if col >= scroll + visible {
            col + 1 - visible
        } else {
            scroll
        };
        // Paragraph::scroll takes u16; past that the text stops scrolling
        self.scroll_col = u16::try_from(scroll).unwrap_or(u16::MAX);
    }

    /// Screen position of the cursor inside a bordered `area`, kept within
    /// the field's visible columns.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let max_col = area.width.saturating_sub(HORIZONTAL_OVERHEAD + 1);
        let visible_col = self
            .column(buffer)
            .saturating_sub(usize::from(self.scroll_col));
        let visible_col = u16::try_from(visible_col).unwrap_or(u16::MAX).min(max_col);
        (
            area.x.saturating_add(BORDER_OFFSET).saturating_add(visible_col),
            area.y.saturating_add(BORDER_OFFSET),
        )
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
