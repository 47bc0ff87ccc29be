//! Domain entity definitions.

mod food;

pub use food::{Food, FoodChanges, FoodId, NewFood};
