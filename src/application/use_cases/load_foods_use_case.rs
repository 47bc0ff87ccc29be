//! Initial load of the food collection.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::entities::Food;
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Fetches every food from the backend.
#[derive(Clone)]
pub struct LoadFoodsUseCase {
    repository: Arc<dyn FoodRepositoryPort>,
}

impl LoadFoodsUseCase {
    /// Creates new load use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Returns the collection exactly as the backend sent it.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub async fn execute(&self) -> Result<Vec<Food>, FoodError> {
        match self.repository.list_foods().await {
            Ok(foods) => {
                debug!(count = foods.len(), "Loaded foods");
                Ok(foods)
            }
            Err(e) => {
                error!(error = %e, "Failed to load foods");
                Err(e)
            }
        }
    }
}
