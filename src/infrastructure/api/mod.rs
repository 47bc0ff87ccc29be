//! Food backend REST client.

mod client;
mod dto;

pub use client::{DEFAULT_BASE_URL, FoodApiClient};
