//! Dashboard screen: header, food cards, status bar and the two modals.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};

use crate::application::dashboard::DashboardState;
use crate::domain::entities::{Food, FoodChanges, FoodId, NewFood};
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::EventHandler;
use crate::presentation::ui::food_modal::{FoodModal, FoodModalAction, FoodModalKind};
use crate::presentation::widgets::{
    BackendStatus, FoodList, FoodListState, HeaderBar, StatusBar, StatusMessage,
};

const LIST_HINTS: &str =
    "n: New | e: Edit | d: Delete | a: Availability | r: Refresh | q: Quit ";

/// What a key press on the dashboard asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardKeyResult {
    /// Handled locally, nothing for the app to do.
    Consumed,
    /// Exit the application.
    Quit,
    /// Reload the list from the backend.
    Refresh,
    /// Open the add modal with an empty form.
    OpenAddModal,
    /// Dismiss the add modal.
    CloseAddModal,
    /// Create the food from the add form.
    SubmitNew(NewFood),
    /// Start editing the selected food.
    OpenEdit(Food),
    /// Dismiss the edit modal.
    CloseEditModal,
    /// Save the edit form's changes.
    SubmitEdit(FoodChanges),
    /// Delete the selected food.
    Delete(FoodId),
    /// Flip availability of the selected food.
    ToggleAvailability(FoodId),
}

/// Presentation-only state of the dashboard.
pub struct DashboardScreenState {
    list: FoodListState,
    add_form: FoodModal,
    edit_form: FoodModal,
    status: Option<StatusMessage>,
    backend_status: BackendStatus,
}

impl DashboardScreenState {
    /// Creates the state with closed forms and an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: FoodListState::new(),
            add_form: FoodModal::new(FoodModalKind::Add),
            edit_form: FoodModal::new(FoodModalKind::Edit),
            status: None,
            backend_status: BackendStatus::Loading,
        }
    }

    /// Message currently shown in the status bar.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Replaces the status message.
    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Removes the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Backend status shown in the header.
    #[must_use]
    pub const fn backend_status(&self) -> BackendStatus {
        self.backend_status
    }

    /// Sets the backend status shown in the header.
    pub fn set_backend_status(&mut self, status: BackendStatus) {
        self.backend_status = status;
    }

    /// Prepares an empty add form.
    pub fn reset_add_form(&mut self) {
        self.add_form.reset();
    }

    /// Prefills the edit form with `food`.
    pub fn load_edit_form(&mut self, food: &Food) {
        self.edit_form.load(food);
    }

    /// Keeps the selection valid after the list changed.
    pub fn sync_selection(&mut self, len: usize) {
        self.list.clamp(len);
    }

    /// Moves the selection down.
    pub fn scroll_down(&mut self, len: usize) {
        self.list.select_next(len);
    }

    /// Moves the selection up.
    pub fn scroll_up(&mut self, len: usize) {
        self.list.select_previous(len);
    }

    fn selected_food<'a>(&self, dashboard: &'a DashboardState) -> Option<&'a Food> {
        self.list
            .selected()
            .and_then(|index| dashboard.foods().get(index))
    }

    /// Routes a key to the open modal, or to the list when none is open.
    pub fn handle_key(&mut self, key: KeyEvent, dashboard: &DashboardState) -> DashboardKeyResult {
        if EventHandler::is_interrupt_event(&key) {
            return DashboardKeyResult::Quit;
        }

        if dashboard.edit_modal().is_open() {
            return self.handle_edit_key(key, dashboard);
        }
        if dashboard.add_modal().is_open() {
            return self.handle_add_key(key);
        }

        let len = dashboard.foods().len();
        match key.code {
            _ if EventHandler::is_quit_event(&key) => DashboardKeyResult::Quit,
            KeyCode::Char('n') => DashboardKeyResult::OpenAddModal,
            KeyCode::Char('r') => DashboardKeyResult::Refresh,
            KeyCode::Char('e') | KeyCode::Enter => self
                .selected_food(dashboard)
                .cloned()
                .map_or(DashboardKeyResult::Consumed, DashboardKeyResult::OpenEdit),
            KeyCode::Char('d') | KeyCode::Delete => self
                .selected_food(dashboard)
                .map_or(DashboardKeyResult::Consumed, |f| {
                    DashboardKeyResult::Delete(f.id())
                }),
            KeyCode::Char('a' | ' ') => self
                .selected_food(dashboard)
                .map_or(DashboardKeyResult::Consumed, |f| {
                    DashboardKeyResult::ToggleAvailability(f.id())
                }),
            KeyCode::Char('j') | KeyCode::Down => {
                self.list.select_next(len);
                DashboardKeyResult::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list.select_previous(len);
                DashboardKeyResult::Consumed
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.list.select_first(len);
                DashboardKeyResult::Consumed
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.list.select_last(len);
                DashboardKeyResult::Consumed
            }
            _ => DashboardKeyResult::Consumed,
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> DashboardKeyResult {
        match self.add_form.handle_key(key) {
            FoodModalAction::None => DashboardKeyResult::Consumed,
            FoodModalAction::Close => DashboardKeyResult::CloseAddModal,
            FoodModalAction::Submit => match self.add_form.to_new_food() {
                Ok(food) => DashboardKeyResult::SubmitNew(food),
                Err(e) => {
                    self.add_form.set_error(e.to_string());
                    DashboardKeyResult::Consumed
                }
            },
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, dashboard: &DashboardState) -> DashboardKeyResult {
        match self.edit_form.handle_key(key) {
            FoodModalAction::None => DashboardKeyResult::Consumed,
            FoodModalAction::Close => DashboardKeyResult::CloseEditModal,
            FoodModalAction::Submit => {
                let Some(editing) = dashboard.editing() else {
                    return DashboardKeyResult::CloseEditModal;
                };
                match self.edit_form.to_changes(editing) {
                    Ok(changes) => DashboardKeyResult::SubmitEdit(changes),
                    Err(e) => {
                        self.edit_form.set_error(e.to_string());
                        DashboardKeyResult::Consumed
                    }
                }
            }
        }
    }
}

impl Default for DashboardScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the dashboard from the view state.
pub struct DashboardScreen<'a> {
    dashboard: &'a DashboardState,
    ui: &'a UiConfig,
}

impl<'a> DashboardScreen<'a> {
    /// Creates the screen over `dashboard`.
    #[must_use]
    pub const fn new(dashboard: &'a DashboardState, ui: &'a UiConfig) -> Self {
        Self { dashboard, ui }
    }
}

impl StatefulWidget for DashboardScreen<'_> {
    type State = DashboardScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let foods = self.dashboard.foods();
        let modal_open =
            self.dashboard.add_modal().is_open() || self.dashboard.edit_modal().is_open();

        HeaderBar::new(crate::NAME, crate::VERSION)
            .food_count(foods.len())
            .status(state.backend_status)
            .render(header_area, buf);

        FoodList::new(foods, &self.ui.currency_symbol)
            .show_image_url(self.ui.show_image_url)
            .focused(!modal_open)
            .render(list_area, buf, &mut state.list);

        StatusBar::new(state.status.as_ref())
            .hints(if modal_open { "" } else { LIST_HINTS })
            .render(status_area, buf);

        if self.dashboard.add_modal().is_open() {
            (&state.add_form).render(list_area, buf);
        }
        if self.dashboard.edit_modal().is_open() {
            (&state.edit_form).render(list_area, buf);
        }
    }
}
