//! Food deletion.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::FoodId;
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Deletes foods on the backend.
#[derive(Clone)]
pub struct DeleteFoodUseCase {
    repository: Arc<dyn FoodRepositoryPort>,
}

impl DeleteFoodUseCase {
    /// Creates new delete use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Deletes the food and returns the id that can be dropped locally.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub async fn execute(&self, id: FoodId) -> Result<FoodId, FoodError> {
        match self.repository.delete_food(id).await {
            Ok(()) => {
                info!(id = %id, "Food deleted");
                Ok(id)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Failed to delete food");
                Err(e)
            }
        }
    }
}
