use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Message, Origin};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Row under the bubble holding the timestamp.
const TIMESTAMP_HEIGHT: u16 = 1;
/// Bubbles never grow wider than this share of the transcript width.
const MAX_WIDTH_PERCENT: u32 = 80;

/// Pulse intensity threshold above which the border transitions from normal to BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

pub const TYPING_TEXT: &str = "Digitando...";

/// A chat bubble: user messages hug the right edge, bot messages the left.
///
/// `Bubble` is a transient widget: it's created fresh each frame with the
/// data it needs to render. The typing indicator is a bubble without a
/// timestamp whose border breathes with `pulse_intensity`.
///
/// # Height Calculation
///
/// The text is wrapped with `textwrap` once and rendered line by line, so
/// [`calculate_height`](Self::calculate_height) matches what gets drawn.
#[derive(Clone)]
pub struct Bubble<'a> {
    pub origin: Origin,
    pub text: &'a str,
    pub time_label: Option<String>,
    pub pulse_intensity: Option<f32>,
}

impl<'a> Bubble<'a> {
    pub fn from_message(message: &'a Message) -> Self {
        Self {
            origin: message.origin,
            text: &message.text,
            time_label: Some(message.time_label()),
            pulse_intensity: None,
        }
    }

    pub fn typing(pulse_intensity: f32) -> Bubble<'static> {
        Bubble {
            origin: Origin::Bot,
            text: TYPING_TEXT,
            time_label: None,
            pulse_intensity: Some(pulse_intensity),
        }
    }

    /// Text width available inside a bubble drawn in `width` columns.
    fn content_width(width: u16) -> u16 {
        let max_outer = (u32::from(width) * MAX_WIDTH_PERCENT / 100) as u16;
        max_outer.saturating_sub(HORIZONTAL_OVERHEAD)
    }

    fn wrap(&self, content_width: u16) -> Vec<String> {
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines: Vec<String> = textwrap::wrap(self.text.trim(), options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    /// Rows needed to draw this bubble (and its timestamp) in `width` columns.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = Self::content_width(width);
        if content_width == 0 {
            // Degenerate case: too narrow for borders + padding.
            return 1;
        }
        let timestamp = if self.time_label.is_some() {
            TIMESTAMP_HEIGHT
        } else {
            0
        };
        line_count(&self.wrap(content_width))
            .saturating_add(VERTICAL_OVERHEAD)
            .saturating_add(timestamp)
    }

    fn styles(&self) -> (Style, Style) {
        let (text, border) = match self.origin {
            Origin::User => (Style::default().fg(Color::White), Style::default().fg(Color::Blue)),
            Origin::Bot => (
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            ),
        };

        // Three-phase breathing: DIM → normal → BOLD
        let border = match self.pulse_intensity {
            Some(p) if p > PULSE_BOLD_THRESHOLD => border
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD),
            Some(p) if p > PULSE_NORMAL_THRESHOLD => border.remove_modifier(Modifier::DIM),
            _ => border,
        };
        (text, border)
    }
}

fn line_count(lines: &[String]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = Self::content_width(area.width);
        if content_width == 0 || area.height == 0 {
            return;
        }

        let lines = self.wrap(content_width);
        let longest = lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);
        let longest = u16::try_from(longest).unwrap_or(u16::MAX);
        let bubble_width = longest.saturating_add(HORIZONTAL_OVERHEAD).min(area.width);
        let bubble_height = line_count(&lines)
            .saturating_add(VERTICAL_OVERHEAD)
            .min(area.height);

        let x = match self.origin {
            Origin::User => area.x + area.width - bubble_width,
            Origin::Bot => area.x,
        };
        let bubble_area = Rect::new(x, area.y, bubble_width, bubble_height);

        let (text_style, border_style) = self.styles();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        Paragraph::new(text).style(text_style).render(inner, buf);

        if let Some(label) = self.time_label
            && area.height > bubble_height
        {
            let alignment = match self.origin {
                Origin::User => Alignment::Right,
                Origin::Bot => Alignment::Left,
            };
            let stamp_area = Rect::new(
                area.x,
                area.y.saturating_add(bubble_height),
                area.width,
                TIMESTAMP_HEIGHT,
            );
            Paragraph::new(label)
                .alignment(alignment)
                .style(Style::default().fg(Color::DarkGray))
                .render(stamp_area, buf);
        }
    }
}
