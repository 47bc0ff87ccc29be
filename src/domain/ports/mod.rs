mod food_repository_port;

pub use food_repository_port::FoodRepositoryPort;
