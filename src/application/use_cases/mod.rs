//! Use case implementations.

mod add_food_use_case;
mod delete_food_use_case;
mod load_foods_use_case;
mod toggle_availability_use_case;
mod update_food_use_case;

pub use add_food_use_case::AddFoodUseCase;
pub use delete_food_use_case::DeleteFoodUseCase;
pub use load_foods_use_case::LoadFoodsUseCase;
pub use toggle_availability_use_case::ToggleAvailabilityUseCase;
pub use update_food_use_case::UpdateFoodUseCase;
