//! Add/edit food modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::domain::entities::{Food, FoodChanges, NewFood};
use crate::domain::errors::FoodError;
use crate::presentation::widgets::TextInput;

const FIELD_COUNT: usize = 4;
const NAME: usize = 0;
const PRICE: usize = 1;
const IMAGE: usize = 2;
const DESCRIPTION: usize = 3;

/// Which record the modal produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodModalKind {
    /// Produces a [`NewFood`].
    Add,
    /// Produces [`FoodChanges`] for the food being edited.
    Edit,
}

impl FoodModalKind {
    const fn title(self) -> &'static str {
        match self {
            Self::Add => " New food ",
            Self::Edit => " Edit food ",
        }
    }
}

/// What a key press asks of the owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodModalAction {
    /// Key consumed by the form.
    None,
    /// Dismiss without saving.
    Close,
    /// Save the form.
    Submit,
}

/// Form state shared by the add and edit dialogs.
#[derive(Debug, Clone)]
pub struct FoodModal {
    kind: FoodModalKind,
    fields: [TextInput; FIELD_COUNT],
    focus: usize,
    error: Option<String>,
}

impl FoodModal {
    /// Creates an empty form focused on the name.
    #[must_use]
    pub fn new(kind: FoodModalKind) -> Self {
        let mut fields = [
            TextInput::new(" Name ").placeholder("Ex: Moda Italiana"),
            TextInput::new(" Price ").placeholder("Ex: 19.90"),
            TextInput::new(" Image URL ").placeholder("Paste the image link here"),
            TextInput::new(" Description ").placeholder("Ex: Macarrão ao molho"),
        ];
        fields[NAME].set_focused(true);

        Self {
            kind,
            fields,
            focus: NAME,
            error: None,
        }
    }

    /// Validation message shown in the footer.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows a validation message in the footer.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Empties every field and focuses the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.error = None;
        self.set_focus(NAME);
    }

    /// Fills the form with `food`.
    pub fn load(&mut self, food: &Food) {
        self.reset();
        self.fields[NAME].set_value(food.name());
        self.fields[PRICE].set_value(food.price().to_string());
        self.fields[IMAGE].set_value(food.image());
        self.fields[DESCRIPTION].set_value(food.description());
    }

    fn set_focus(&mut self, index: usize) {
        self.fields[self.focus].set_focused(false);
        self.focus = index % FIELD_COUNT;
        self.fields[self.focus].set_focused(true);
    }

    fn focus_next(&mut self) {
        self.set_focus(self.focus + 1);
    }

    fn focus_previous(&mut self) {
        self.set_focus(self.focus + FIELD_COUNT - 1);
    }

    /// Handles a key while the modal is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> FoodModalAction {
        match key.code {
            KeyCode::Esc => return FoodModalAction::Close,
            KeyCode::Enter => return FoodModalAction::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FoodModalAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                return FoodModalAction::None;
            }
            _ => {}
        }

        let field = &mut self.fields[self.focus];
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                field.input_char(c);
            }
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_start(),
            KeyCode::End => field.move_end(),
            _ => {}
        }
        FoodModalAction::None
    }

    fn parse_name(&self) -> Result<String, FoodError> {
        let name = self.fields[NAME].value().trim();
        if name.is_empty() {
            return Err(FoodError::invalid_input("name", "must not be empty"));
        }
        Ok(name.to_string())
    }

    fn parse_price(&self) -> Result<f64, FoodError> {
        let raw = self.fields[PRICE].value().trim().replace(',', ".");
        let price: f64 = raw
            .parse()
            .map_err(|_| FoodError::invalid_input("price", format!("'{raw}' is not a number")))?;
        if !price.is_finite() || price < 0.0 {
            return Err(FoodError::invalid_input("price", "must be zero or more"));
        }
        Ok(price)
    }

    /// Builds the record to create.
    ///
    /// # Errors
    /// Returns `InvalidInput` when name or price do not parse.
    pub fn to_new_food(&self) -> Result<NewFood, FoodError> {
        Ok(NewFood::new(self.parse_name()?, self.parse_price()?)
            .with_image(self.fields[IMAGE].value().trim())
            .with_description(self.fields[DESCRIPTION].value().trim()))
    }

    /// Builds the changes relative to `editing`, only for fields that differ.
    ///
    /// # Errors
    /// Returns `InvalidInput` when name or price do not parse.
    pub fn to_changes(&self, editing: &Food) -> Result<FoodChanges, FoodError> {
        let name = self.parse_name()?;
        let price = self.parse_price()?;
        let image = self.fields[IMAGE].value().trim();
        let description = self.fields[DESCRIPTION].value().trim();

        let mut changes = FoodChanges::default();
        if name != editing.name() {
            changes = changes.name(name);
        }
        if (price - editing.price()).abs() > f64::EPSILON {
            changes = changes.price(price);
        }
        if image != editing.image() {
            changes = changes.image(image);
        }
        if description != editing.description() {
            changes = changes.description(description);
        }
        Ok(changes)
    }

    /// Area the modal occupies inside `area`.
    #[must_use]
    pub fn centered_area(area: Rect) -> Rect {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(17),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(64),
            Constraint::Fill(1),
        ])
        .areas(middle);
        center
    }
}

impl Widget for &FoodModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = FoodModal::centered_area(area);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(self.kind.title());
        let inner = block.inner(area);
        block.render(area, buf);

        let areas = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<6>(inner);

        for (field, field_area) in self.fields.iter().zip(areas.iter()) {
            field.render(*field_area, buf);
        }

        let footer = match self.error() {
            Some(message) => Line::from(Span::styled(
                format!("Error: {message}"),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "Enter: Save | Tab: Next field | Esc: Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        };
        Paragraph::new(footer).render(areas[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(modal: &mut FoodModal, text: &str) {
        for c in text.chars() {
            modal.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test_case(KeyCode::Esc, FoodModalAction::Close ; "escape_closes")]
    #[test_case(KeyCode::Enter, FoodModalAction::Submit ; "enter_submits")]
    #[test_case(KeyCode::Tab, FoodModalAction::None ; "tab_moves_focus")]
    #[test_case(KeyCode::Char('x'), FoodModalAction::None ; "typing")]
    fn test_key_actions(code: KeyCode, expected: FoodModalAction) {
        let mut modal = FoodModal::new(FoodModalKind::Add);
        assert_eq!(modal.handle_key(key(code)), expected);
    }

    #[test]
    fn test_new_food_from_fields() {
        let mut modal = FoodModal::new(FoodModalKind::Add);
        type_text(&mut modal, "Ao molho");
        modal.handle_key(key(KeyCode::Tab));
        type_text(&mut modal, "19,90");
        modal.handle_key(key(KeyCode::Tab));
        type_text(&mut modal, "https://img/1.png");

        let food = modal.to_new_food().unwrap();

        assert_eq!(food.name, "Ao molho");
        assert!((food.price - 19.9).abs() < 1e-9);
        assert_eq!(food.image, "https://img/1.png");
        assert!(food.description.is_empty());
    }

    #[test]
    fn test_invalid_price() {
        let mut modal = FoodModal::new(FoodModalKind::Add);
        type_text(&mut modal, "Ao molho");
        modal.handle_key(key(KeyCode::Tab));
        type_text(&mut modal, "abc");

        assert!(matches!(
            modal.to_new_food(),
            Err(FoodError::InvalidInput { field: "price", .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let modal = FoodModal::new(FoodModalKind::Add);
        assert!(matches!(
            modal.to_new_food(),
            Err(FoodError::InvalidInput { field: "name", .. })
        ));
    }

    #[test]
    fn test_changes_only_contain_edited_fields() {
        let editing = Food::new(2_u64, "B")
            .with_price(12.5)
            .with_description("old");
        let mut modal = FoodModal::new(FoodModalKind::Edit);
        modal.load(&editing);

        modal.handle_key(key(KeyCode::Backspace));
        type_text(&mut modal, "C");

        let changes = modal.to_changes(&editing).unwrap();
        assert_eq!(changes, FoodChanges::default().name("C"));
    }

    #[test]
    fn test_backtab_wraps_focus() {
        let mut modal = FoodModal::new(FoodModalKind::Add);
        modal.handle_key(key(KeyCode::BackTab));
        type_text(&mut modal, "desc");
        modal.set_focus(NAME);
        type_text(&mut modal, "Name");
        modal.handle_key(key(KeyCode::Tab));
        type_text(&mut modal, "1");

        assert_eq!(modal.to_new_food().unwrap().description, "desc");
    }

    #[test]
    fn test_reset_clears_error_and_fields() {
        let mut modal = FoodModal::new(FoodModalKind::Add);
        type_text(&mut modal, "x");
        modal.set_error("bad");
        modal.reset();

        assert!(modal.error().is_none());
        assert!(modal.to_new_food().is_err());
    }
}
