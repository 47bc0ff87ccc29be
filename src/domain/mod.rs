//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Food, FoodChanges, FoodId, NewFood};
pub use errors::FoodError;
pub use ports::FoodRepositoryPort;
