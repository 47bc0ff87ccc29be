//! UI screens.

mod app;
mod dashboard_screen;
mod food_modal;

pub use app::App;
pub use dashboard_screen::{DashboardKeyResult, DashboardScreen, DashboardScreenState};
pub use food_modal::{FoodModal, FoodModalAction, FoodModalKind};
