//! Availability flip for a single food.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::Food;
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Flips whether a food can be ordered.
#[derive(Clone)]
pub struct ToggleAvailabilityUseCase {
    repository: Arc<dyn FoodRepositoryPort>,
}

impl ToggleAvailabilityUseCase {
    /// Creates new availability use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Stores `food` with its availability inverted.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub async fn execute(&self, food: &Food) -> Result<Food, FoodError> {
        let toggled = food.with_availability_toggled();

        match self.repository.update_food(&toggled).await {
            Ok(updated) => {
                info!(
                    id = %updated.id(),
                    available = updated.is_available(),
                    "Food availability changed"
                );
                Ok(updated)
            }
            Err(e) => {
                error!(id = %food.id(), error = %e, "Failed to change food availability");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockFoodRepository;

    #[tokio::test]
    async fn test_toggle_flips_flag() {
        let food = Food::new(1_u64, "A");
        let repository = Arc::new(MockFoodRepository::new(vec![food.clone()]));
        let use_case = ToggleAvailabilityUseCase::new(repository.clone());

        let updated = use_case.execute(&food).await.unwrap();

        assert!(!updated.is_available());
        assert!(!repository.stored()[0].is_available());
    }
}
