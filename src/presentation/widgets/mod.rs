mod food_list;
mod header_bar;
mod input;
mod status_bar;

pub use food_list::{FoodList, FoodListState, format_price, truncate_to_width};
pub use header_bar::{BackendStatus, HeaderBar};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel, StatusMessage};
