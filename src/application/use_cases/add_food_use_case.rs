//! Food creation.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::{Food, NewFood};
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Creates foods on the backend.
#[derive(Clone)]
pub struct AddFoodUseCase {
    repository: Arc<dyn FoodRepositoryPort>,
}

impl AddFoodUseCase {
    /// Creates new add use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Creates the food as available and returns the backend copy with its id.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub async fn execute(&self, food: NewFood) -> Result<Food, FoodError> {
        let payload = food.into_create_payload();

        match self.repository.create_food(payload).await {
            Ok(created) => {
                info!(id = %created.id(), name = %created.name(), "Food created");
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, "Failed to create food");
                Err(e)
            }
        }
    }
}
