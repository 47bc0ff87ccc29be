//! Status bar widget.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Status message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Neutral information.
    Info,
    /// A backend change was applied.
    Success,
    /// Something failed.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// A transient message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    level: StatusLevel,
    created_at: Instant,
}

impl StatusMessage {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
            created_at: Instant::now(),
        }
    }

    /// Creates info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Info)
    }

    /// Creates success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Success)
    }

    /// Creates error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }

    /// Returns message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns message level.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    /// Returns whether the message outlived `ttl`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Bottom bar: current message on the left, key hints on the right.
#[derive(Debug, Clone, Default)]
pub struct StatusBar<'a> {
    message: Option<&'a StatusMessage>,
    hints: &'a str,
}

impl<'a> StatusBar<'a> {
    /// Creates a bar showing `message`.
    #[must_use]
    pub const fn new(message: Option<&'a StatusMessage>) -> Self {
        Self { message, hints: "" }
    }

    /// Sets the key hints on the right.
    #[must_use]
    pub const fn hints(mut self, hints: &'a str) -> Self {
        self.hints = hints;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let mut spans = Vec::new();
        let mut used = 0;

        if let Some(message) = self.message {
            let style = Style::default()
                .fg(message.level().color())
                .add_modifier(Modifier::BOLD);
            used = message.text().chars().count();
            spans.push(Span::styled(message.text(), style));
        }

        let hints_len = self.hints.chars().count();
        if hints_len > 0 && used + hints_len < width {
            spans.push(Span::raw(" ".repeat(width - used - hints_len)));
            spans.push(Span::styled(self.hints, Style::default().fg(Color::DarkGray)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expiry() {
        let message = StatusMessage::info("Loaded");
        let ttl = Duration::from_secs(5);

        assert!(!message.is_expired(ttl, message.created_at));
        assert!(message.is_expired(ttl, message.created_at + ttl));
    }

    #[test]
    fn test_render_message_and_hints() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        let message = StatusMessage::error("boom");

        StatusBar::new(Some(&message))
            .hints("q: Quit")
            .render(area, &mut buf);

        let row: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.starts_with("boom"));
        assert!(row.trim_end().ends_with("q: Quit"));
        assert_eq!(buf[(0, 0)].fg, Color::Red);
    }
}
