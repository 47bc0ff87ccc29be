//! Food cards list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};
use unicode_width::UnicodeWidthChar;

use crate::domain::entities::Food;

/// Selection and scroll state of the food list.
#[derive(Debug, Default, Clone)]
pub struct FoodListState {
    list_state: ListState,
}

impl FoodListState {
    /// Creates state with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected card.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keeps the selection inside a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Selects the next card, stopping at the last.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
    }

    /// Selects the previous card, stopping at the first.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let previous = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(previous));
    }

    /// Selects the first card.
    pub fn select_first(&mut self, len: usize) {
        self.list_state.select(if len == 0 { None } else { Some(0) });
    }

    /// Selects the last card.
    pub fn select_last(&mut self, len: usize) {
        self.list_state.select(len.checked_sub(1));
    }
}

/// Renders one card per food.
pub struct FoodList<'a> {
    foods: &'a [Food],
    currency_symbol: &'a str,
    show_image_url: bool,
    focused: bool,
}

impl<'a> FoodList<'a> {
    /// Creates a list over `foods`.
    #[must_use]
    pub const fn new(foods: &'a [Food], currency_symbol: &'a str) -> Self {
        Self {
            foods,
            currency_symbol,
            show_image_url: true,
            focused: true,
        }
    }

    /// Sets whether cards show the image URL.
    #[must_use]
    pub const fn show_image_url(mut self, show: bool) -> Self {
        self.show_image_url = show;
        self
    }

    /// Sets whether the selection is highlighted as active.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn card(&self, food: &Food, width: usize) -> ListItem<'a> {
        let (badge, badge_style) = if food.is_available() {
            (" AVAILABLE ", Style::default().bg(Color::Green).fg(Color::Black))
        } else {
            (" UNAVAILABLE ", Style::default().bg(Color::Red).fg(Color::White))
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    food.name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format_price(self.currency_symbol, food.price()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("  "),
                Span::styled(badge, badge_style),
            ]),
            Line::from(Span::styled(
                truncate_to_width(food.description(), width),
                Style::default().fg(Color::Gray),
            )),
        ];

        if self.show_image_url && !food.image().is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(food.image(), width),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));

        ListItem::new(lines)
    }
}

impl StatefulWidget for FoodList<'_> {
    type State = FoodListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Foods ");

        let width = block.inner(area).width.saturating_sub(2) as usize;

        if self.foods.is_empty() {
            let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
                "No foods yet. Press n to add one.",
                Style::default().fg(Color::DarkGray),
            )))])
            .block(block);
            StatefulWidget::render(empty, area, buf, &mut ListState::default());
            return;
        }

        let items: Vec<ListItem> = self.foods.iter().map(|f| self.card(f, width)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)));

        state.clamp(self.foods.len());
        StatefulWidget::render(list, area, buf, &mut state.list_state);
    }
}

/// Formats a price with two decimals.
#[must_use]
pub fn format_price(currency_symbol: &str, price: f64) -> String {
    format!("{currency_symbol} {price:.2}")
}

/// Cuts `text` to fit `width` columns, ending with an ellipsis when cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            out.pop();
            out.push('…');
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}
