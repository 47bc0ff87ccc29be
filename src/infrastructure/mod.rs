//! Infrastructure layer with external service adapters.

/// Food backend REST client.
pub mod api;
/// Application configuration.
pub mod config;

pub use api::FoodApiClient;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
