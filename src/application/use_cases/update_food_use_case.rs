//! Food update.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::entities::{Food, FoodChanges};
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Sends merged food edits to the backend.
#[derive(Clone)]
pub struct UpdateFoodUseCase {
    repository: Arc<dyn FoodRepositoryPort>,
}

impl UpdateFoodUseCase {
    /// Creates new update use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Merges `changes` over `editing` and stores the result.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub async fn execute(&self, editing: &Food, changes: FoodChanges) -> Result<Food, FoodError> {
        let merged = editing.merged_with(changes);
        debug!(id = %merged.id(), "Updating food");

        match self.repository.update_food(&merged).await {
            Ok(updated) => {
                info!(id = %updated.id(), "Food updated");
                Ok(updated)
            }
            Err(e) => {
                error!(id = %merged.id(), error = %e, "Failed to update food");
                Err(e)
            }
        }
    }
}
