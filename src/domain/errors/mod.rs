//! Domain error types.

mod food_error;

pub use food_error::FoodError;
