//! Application layer with use cases and the dashboard state machine.

/// Single-writer dashboard controller.
pub mod controller;
/// Dashboard view state and reducer.
pub mod dashboard;
/// Use case implementations.
pub mod use_cases;

pub use controller::{DashboardController, DashboardRequest};
pub use dashboard::{DashboardEvent, DashboardState, ModalVisibility, reduce};
pub use use_cases::{
    AddFoodUseCase, DeleteFoodUseCase, LoadFoodsUseCase, ToggleAvailabilityUseCase,
    UpdateFoodUseCase,
};
