use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// What the dashboard last heard from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    /// A load is in flight.
    #[default]
    Loading,
    /// Last call succeeded.
    Ready,
    /// Last load failed.
    Error,
}

impl BackendStatus {
    const fn display_text(self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Ready => "READY",
            Self::Error => "ERROR",
        }
    }

    const fn indicator(self) -> &'static str {
        match self {
            Self::Ready => "●",
            Self::Loading => "◐",
            Self::Error => "○",
        }
    }
}

struct HeaderBarStyle {
    background: Style,
    app_name: Style,
    version: Style,
    action: Style,
    status_ready: Style,
    status_loading: Style,
    status_error: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::DarkGray),
            action: Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            status_ready: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            status_loading: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red),
        }
    }
}

/// Top bar with the app name and the "new food" action.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    food_count: usize,
    status: BackendStatus,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Creates a header for `app_name` and `version`.
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            food_count: 0,
            status: BackendStatus::default(),
            style: HeaderBarStyle::default(),
        }
    }

    /// Sets the number of listed foods.
    #[must_use]
    pub const fn food_count(mut self, count: usize) -> Self {
        self.food_count = count;
        self
    }

    /// Sets the backend status.
    #[must_use]
    pub const fn status(mut self, status: BackendStatus) -> Self {
        self.status = status;
        self
    }

    const fn status_style(&self) -> Style {
        match self.status {
            BackendStatus::Ready => self.style.status_ready,
            BackendStatus::Loading => self.style.status_loading,
            BackendStatus::Error => self.style.status_error,
        }
    }

    fn right_text(&self) -> String {
        format!(
            " {} {} · {} foods ",
            self.status.indicator(),
            self.status.display_text(),
            self.food_count
        )
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::raw(" "),
            Span::styled(format!("v{}", self.version), self.style.version),
            Span::raw("  "),
            Span::styled(" n: New food ", self.style.action),
        ];
        let left_line = Line::from(left_spans);
        let left_width = left_line.width() as u16;
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let right_text = self.right_text();
        let right_width = right_text.chars().count() as u16;
        if right_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::from(Span::styled(right_text, self.status_style())))
                .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BackendStatus::Ready.display_text(), "READY");
        assert_eq!(BackendStatus::Loading.indicator(), "◐");
    }

    #[test]
    fn test_header_renders_action_and_count() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        HeaderBar::new("foodboard", "0.1.0")
            .food_count(3)
            .status(BackendStatus::Ready)
            .render(area, &mut buf);

        let row = row_text(&buf, 0);
        assert!(row.contains("FOODBOARD"));
        assert!(row.contains("n: New food"));
        assert!(row.contains("3 foods"));
    }
}
