//! Single-writer dashboard controller.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::application::dashboard::{DashboardEvent, DashboardState};
use crate::application::use_cases::{
    AddFoodUseCase, DeleteFoodUseCase, LoadFoodsUseCase, ToggleAvailabilityUseCase,
    UpdateFoodUseCase,
};
use crate::domain::entities::{Food, FoodChanges, FoodId, NewFood};
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;

/// Backend call that resolves to the event confirming it.
///
/// Owns everything it needs, so it can be spawned and its event applied later
/// to whatever the state is by then.
pub type DashboardRequest = BoxFuture<'static, Result<DashboardEvent, FoodError>>;

/// Owns the dashboard state and builds every backend request against it.
///
/// Requests only read the state to check preconditions. Their events go back
/// through [`DashboardController::apply`], so mutations are serialized and
/// each one lands on the state current at the time the backend answered.
pub struct DashboardController {
    state: DashboardState,
    load_foods: LoadFoodsUseCase,
    add_food: AddFoodUseCase,
    update_food: UpdateFoodUseCase,
    delete_food: DeleteFoodUseCase,
    toggle_availability: ToggleAvailabilityUseCase,
}

impl DashboardController {
    /// Creates a controller with an empty dashboard.
    #[must_use]
    pub fn new(repository: Arc<dyn FoodRepositoryPort>) -> Self {
        Self {
            state: DashboardState::new(),
            load_foods: LoadFoodsUseCase::new(repository.clone()),
            add_food: AddFoodUseCase::new(repository.clone()),
            update_food: UpdateFoodUseCase::new(repository.clone()),
            delete_food: DeleteFoodUseCase::new(repository.clone()),
            toggle_availability: ToggleAvailabilityUseCase::new(repository),
        }
    }

    /// Current dashboard state.
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Applies an event to the current state.
    pub fn apply(&mut self, event: DashboardEvent) {
        self.state.apply(event);
    }

    /// `GET /foods`, resolving to [`DashboardEvent::Loaded`].
    #[must_use]
    pub fn load_request(&self) -> DashboardRequest {
        let use_case = self.load_foods.clone();
        async move { use_case.execute().await.map(DashboardEvent::Loaded) }.boxed()
    }

    /// `POST /foods`, resolving to [`DashboardEvent::Created`].
    #[must_use]
    pub fn add_request(&self, food: NewFood) -> DashboardRequest {
        let use_case = self.add_food.clone();
        async move { use_case.execute(food).await.map(DashboardEvent::Created) }.boxed()
    }

    /// `PUT /foods/{id}` for the food being edited, resolving to
    /// [`DashboardEvent::Updated`].
    ///
    /// # Errors
    /// Returns [`FoodError::NothingSelected`] when no food is being edited.
    pub fn update_request(&self, changes: FoodChanges) -> Result<DashboardRequest, FoodError> {
        let editing = self
            .state
            .editing()
            .cloned()
            .ok_or(FoodError::NothingSelected)?;
        let use_case = self.update_food.clone();
        Ok(async move {
            use_case
                .execute(&editing, changes)
                .await
                .map(DashboardEvent::Updated)
        }
        .boxed())
    }

    /// `DELETE /foods/{id}`, resolving to [`DashboardEvent::Deleted`].
    #[must_use]
    pub fn delete_request(&self, id: FoodId) -> DashboardRequest {
        let use_case = self.delete_food.clone();
        async move { use_case.execute(id).await.map(DashboardEvent::Deleted) }.boxed()
    }

    /// `PUT /foods/{id}` with availability flipped, resolving to
    /// [`DashboardEvent::AvailabilityChanged`].
    ///
    /// # Errors
    /// Returns `InvalidInput` if the id is not listed.
    pub fn toggle_availability_request(&self, id: FoodId) -> Result<DashboardRequest, FoodError> {
        let Some(food) = self.state.find(id).cloned() else {
            warn!(id = %id, "Availability change for a food that is not listed");
            return Err(FoodError::invalid_input(
                "id",
                format!("food {id} is not listed"),
            ));
        };
        let use_case = self.toggle_availability.clone();
        Ok(async move {
            use_case
                .execute(&food)
                .await
                .map(DashboardEvent::AvailabilityChanged)
        }
        .boxed())
    }

    async fn run(&mut self, request: DashboardRequest) -> Result<(), FoodError> {
        let event = request.await?;
        self.apply(event);
        Ok(())
    }

    /// Replaces the list with the backend collection.
    ///
    /// # Errors
    /// Returns error if the backend call fails; the list is left as it was.
    pub async fn load(&mut self) -> Result<(), FoodError> {
        let request = self.load_request();
        self.run(request).await
    }

    /// Creates a food and appends the backend copy.
    ///
    /// # Errors
    /// Returns error if the backend call fails; nothing is appended.
    pub async fn add(&mut self, food: NewFood) -> Result<(), FoodError> {
        let request = self.add_request(food);
        self.run(request).await
    }

    /// Applies `changes` to the food being edited.
    ///
    /// # Errors
    /// Returns [`FoodError::NothingSelected`] when no food is being edited, or
    /// the backend error; the list is left as it was.
    pub async fn update(&mut self, changes: FoodChanges) -> Result<(), FoodError> {
        let request = self.update_request(changes)?;
        self.run(request).await
    }

    /// Deletes a food and drops it from the list.
    ///
    /// # Errors
    /// Returns error if the backend call fails; the list is left as it was.
    pub async fn delete(&mut self, id: FoodId) -> Result<(), FoodError> {
        let request = self.delete_request(id);
        self.run(request).await
    }

    /// Flips availability of a listed food.
    ///
    /// # Errors
    /// Returns error if the id is not listed or the backend call fails.
    pub async fn toggle_availability(&mut self, id: FoodId) -> Result<(), FoodError> {
        let request = self.toggle_availability_request(id)?;
        self.run(request).await
    }

    /// Opens or closes the add modal.
    pub fn toggle_add_modal(&mut self) {
        self.apply(DashboardEvent::ToggleAddModal);
    }

    /// Opens or closes the edit modal; closing ends the edit.
    pub fn toggle_edit_modal(&mut self) {
        self.apply(DashboardEvent::ToggleEditModal);
    }

    /// Marks `food` as being edited and opens the edit modal.
    pub fn open_edit(&mut self, food: Food) {
        debug!(id = %food.id(), "Editing food");
        self.apply(DashboardEvent::OpenEdit(food));
    }
}
