//! Food repository port definition.

use async_trait::async_trait;

use crate::domain::entities::{Food, FoodId, NewFood};
use crate::domain::errors::FoodError;

/// Port for the backend holding food records.
#[async_trait]
pub trait FoodRepositoryPort: Send + Sync {
    /// Fetches the full collection, in backend order.
    async fn list_foods(&self) -> Result<Vec<Food>, FoodError>;

    /// Creates a food and returns it with its generated id.
    async fn create_food(&self, food: NewFood) -> Result<Food, FoodError>;

    /// Replaces the food addressed by `food.id()` and returns the stored record.
    async fn update_food(&self, food: &Food) -> Result<Food, FoodError>;

    /// Deletes a food. Any successful response counts, whatever its body.
    async fn delete_food(&self, id: FoodId) -> Result<(), FoodError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Request observed by the mock.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedRequest {
        List,
        Create(NewFood),
        Update(Food),
        Delete(FoodId),
    }

    /// In-memory backend for testing.
    pub struct MockFoodRepository {
        foods: Mutex<Vec<Food>>,
        next_id: AtomicU64,
        should_fail: AtomicBool,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockFoodRepository {
        /// Creates new mock seeded with `foods`.
        pub fn new(foods: Vec<Food>) -> Self {
            let next_id = foods.iter().map(|f| f.id().as_u64()).max().unwrap_or(0) + 1;
            Self {
                foods: Mutex::new(foods),
                next_id: AtomicU64::new(next_id),
                should_fail: AtomicBool::new(false),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Sets failure behavior.
        pub fn set_should_fail(&self, value: bool) {
            self.should_fail.store(value, Ordering::SeqCst);
        }

        /// Returns every request seen so far.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Returns the backend-side collection.
        pub fn stored(&self) -> Vec<Food> {
            self.foods.lock().unwrap().clone()
        }

        fn record(&self, request: RecordedRequest) -> Result<(), FoodError> {
            self.requests.lock().unwrap().push(request);
            if self.should_fail.load(Ordering::SeqCst) {
                Err(FoodError::network("mock failure"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FoodRepositoryPort for MockFoodRepository {
        async fn list_foods(&self) -> Result<Vec<Food>, FoodError> {
            self.record(RecordedRequest::List)?;
            Ok(self.stored())
        }

        async fn create_food(&self, food: NewFood) -> Result<Food, FoodError> {
            self.record(RecordedRequest::Create(food.clone()))?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = Food::new(id, food.name)
                .with_description(food.description)
                .with_price(food.price)
                .with_available(food.available)
                .with_image(food.image);
            self.foods.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_food(&self, food: &Food) -> Result<Food, FoodError> {
            self.record(RecordedRequest::Update(food.clone()))?;
            let mut foods = self.foods.lock().unwrap();
            match foods.iter_mut().find(|f| f.id() == food.id()) {
                Some(slot) => {
                    *slot = food.clone();
                    Ok(food.clone())
                }
                None => Err(FoodError::status(404, "Not Found")),
            }
        }

        async fn delete_food(&self, id: FoodId) -> Result<(), FoodError> {
            self.record(RecordedRequest::Delete(id))?;
            self.foods.lock().unwrap().retain(|f| f.id() != id);
            Ok(())
        }
    }
}
