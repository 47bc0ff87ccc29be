//! Dashboard view state and its reducer.

use tracing::debug;

use crate::domain::entities::{Food, FoodId};

/// Visibility of a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalVisibility {
    /// Hidden.
    #[default]
    Closed,
    /// Shown and receiving keys.
    Open,
}

impl ModalVisibility {
    /// Returns the opposite visibility.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Returns true if the modal is shown.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Something that happened to the dashboard.
///
/// Backend-driven events are only produced after the backend confirmed the
/// change.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Full collection received.
    Loaded(Vec<Food>),
    /// A food was created.
    Created(Food),
    /// A food was replaced with the backend's copy after an edit.
    Updated(Food),
    /// A food's availability flipped. An edit of the same food stays open and
    /// picks up the new flag.
    AvailabilityChanged(Food),
    /// A food was deleted.
    Deleted(FoodId),
    /// Flip the add modal.
    ToggleAddModal,
    /// Flip the edit modal; closing it ends the edit.
    ToggleEditModal,
    /// Start editing the given food.
    OpenEdit(Food),
}

/// In-memory dashboard state mirroring the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    foods: Vec<Food>,
    editing: Option<Food>,
    add_modal: ModalVisibility,
    edit_modal: ModalVisibility,
    version: u64,
}

impl DashboardState {
    /// Creates an empty state with both modals closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Foods in backend order.
    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Looks up a listed food.
    #[must_use]
    pub fn find(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|f| f.id() == id)
    }

    /// Food currently being edited.
    #[must_use]
    pub const fn editing(&self) -> Option<&Food> {
        self.editing.as_ref()
    }

    /// Add modal visibility.
    #[must_use]
    pub const fn add_modal(&self) -> ModalVisibility {
        self.add_modal
    }

    /// Edit modal visibility.
    #[must_use]
    pub const fn edit_modal(&self) -> ModalVisibility {
        self.edit_modal
    }

    /// Number of events applied so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Applies an event in place.
    pub fn apply(&mut self, event: DashboardEvent) {
        let taken = std::mem::take(self);
        *self = reduce(taken, event);
    }
}

/// Computes the state that follows `event`.
#[must_use]
pub fn reduce(mut state: DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::Loaded(foods) => {
            debug!(count = foods.len(), "Food list replaced");
            state.foods = foods;
        }
        DashboardEvent::Created(food) => {
            debug!(id = %food.id(), "Food appended");
            state.foods.push(food);
        }
        DashboardEvent::Updated(food) => {
            let id = food.id();
            replace_entry(&mut state.foods, food);
            if state.editing.as_ref().is_some_and(|f| f.id() == id) {
                state.editing = None;
            }
        }
        DashboardEvent::AvailabilityChanged(food) => {
            if let Some(editing) = state.editing.as_mut().filter(|f| f.id() == food.id()) {
                *editing = editing.clone().with_available(food.is_available());
            }
            replace_entry(&mut state.foods, food);
        }
        DashboardEvent::Deleted(id) => {
            state.foods.retain(|f| f.id() != id);
            if state.editing.as_ref().is_some_and(|f| f.id() == id) {
                state.editing = None;
            }
        }
        DashboardEvent::ToggleAddModal => {
            state.add_modal = state.add_modal.toggled();
        }
        DashboardEvent::ToggleEditModal => {
            state.edit_modal = state.edit_modal.toggled();
            if !state.edit_modal.is_open() {
                state.editing = None;
            }
        }
        DashboardEvent::OpenEdit(food) => {
            state.editing = Some(food);
            state.edit_modal = ModalVisibility::Open;
        }
    }

    state.version += 1;
    state
}

fn replace_entry(foods: &mut [Food], food: Food) {
    let id = food.id();
    if let Some(slot) = foods.iter_mut().find(|f| f.id() == id) {
        *slot = food;
    } else {
        debug!(id = %id, "Replaced food is not in the list");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foods(ids: &[u64]) -> Vec<Food> {
        ids.iter().map(|id| Food::new(*id, format!("food {id}"))).collect()
    }

    fn loaded(ids: &[u64]) -> DashboardState {
        reduce(DashboardState::new(), DashboardEvent::Loaded(foods(ids)))
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new();
        assert!(state.foods().is_empty());
        assert!(state.editing().is_none());
        assert_eq!(state.add_modal(), ModalVisibility::Closed);
        assert_eq!(state.edit_modal(), ModalVisibility::Closed);
    }

    #[test]
    fn test_load_keeps_backend_order() {
        let state = loaded(&[2, 1, 3]);
        let ids: Vec<u64> = state.foods().iter().map(|f| f.id().as_u64()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_created_is_appended() {
        let state = reduce(loaded(&[1]), DashboardEvent::Created(Food::new(2_u64, "new")));
        assert_eq!(
            state.foods(),
            &[Food::new(1_u64, "food 1"), Food::new(2_u64, "new")]
        );
    }

    #[test]
    fn test_update_replaces_only_matching_id() {
        let state = reduce(
            DashboardState::new(),
            DashboardEvent::Loaded(vec![Food::new(1_u64, "A"), Food::new(2_u64, "B")]),
        );
        let state = reduce(state, DashboardEvent::OpenEdit(Food::new(2_u64, "B")));
        let state = reduce(state, DashboardEvent::Updated(Food::new(2_u64, "C")));

        assert_eq!(
            state.foods(),
            &[Food::new(1_u64, "A"), Food::new(2_u64, "C")]
        );
        assert!(state.editing().is_none());
    }

    #[test]
    fn test_availability_change_keeps_editing() {
        let state = reduce(loaded(&[1, 2]), DashboardEvent::OpenEdit(Food::new(1_u64, "food 1")));
        let state = reduce(
            state,
            DashboardEvent::AvailabilityChanged(Food::new(1_u64, "food 1").with_available(false)),
        );

        assert!(!state.foods()[0].is_available());
        assert_eq!(state.editing().map(Food::is_available), Some(false));
        assert!(state.edit_modal().is_open());
    }

    #[test]
    fn test_delete_filters_id() {
        let state = reduce(loaded(&[1, 2]), DashboardEvent::Deleted(FoodId(1)));
        assert_eq!(state.foods(), foods(&[2]).as_slice());
    }

    #[test]
    fn test_two_deletes_both_apply() {
        let mut state = loaded(&[1, 2, 3]);
        state.apply(DashboardEvent::Deleted(FoodId(1)));
        state.apply(DashboardEvent::Deleted(FoodId(2)));
        assert_eq!(state.foods(), foods(&[3]).as_slice());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let state = DashboardState::new();
        let once = reduce(state.clone(), DashboardEvent::ToggleAddModal);
        assert!(once.add_modal().is_open());
        let twice = reduce(once, DashboardEvent::ToggleAddModal);
        assert_eq!(twice.add_modal(), state.add_modal());

        let edit = reduce(
            reduce(state.clone(), DashboardEvent::ToggleEditModal),
            DashboardEvent::ToggleEditModal,
        );
        assert_eq!(edit.edit_modal(), state.edit_modal());
    }

    #[test]
    fn test_modals_are_independent() {
        let state = reduce(DashboardState::new(), DashboardEvent::ToggleAddModal);
        assert!(state.add_modal().is_open());
        assert!(!state.edit_modal().is_open());
    }

    #[test]
    fn test_open_edit_sets_editing_then_opens() {
        let state = reduce(loaded(&[1]), DashboardEvent::OpenEdit(Food::new(1_u64, "food 1")));
        assert_eq!(state.editing().map(Food::id), Some(FoodId(1)));
        assert!(state.edit_modal().is_open());
    }

    #[test]
    fn test_closing_edit_modal_clears_editing() {
        let state = reduce(loaded(&[1]), DashboardEvent::OpenEdit(Food::new(1_u64, "food 1")));
        let state = reduce(state, DashboardEvent::ToggleEditModal);
        assert!(state.editing().is_none());
        assert!(!state.edit_modal().is_open());
    }

    #[test]
    fn test_version_counts_events() {
        let mut state = DashboardState::new();
        state.apply(DashboardEvent::ToggleAddModal);
        state.apply(DashboardEvent::Loaded(Vec::new()));
        assert_eq!(state.version(), 2);
    }
}
