//! Food record entity.

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier for a food record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub u64);

impl FoodId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FoodId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A food record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    id: FoodId,
    name: String,
    description: String,
    price: f64,
    available: bool,
    image: String,
}

impl Food {
    /// Creates a new available food with empty description and image.
    #[must_use]
    pub fn new(id: impl Into<FoodId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: 0.0,
            available: true,
            image: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the availability flag.
    #[must_use]
    pub const fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Returns the backend id.
    #[must_use]
    pub const fn id(&self) -> FoodId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns whether the food can be ordered.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the image URL.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns a copy with caller-supplied changes applied on top.
    ///
    /// The identifier is never touched by a merge.
    #[must_use]
    pub fn merged_with(&self, changes: FoodChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            price: changes.price.unwrap_or(self.price),
            available: changes.available.unwrap_or(self.available),
            image: changes.image.unwrap_or_else(|| self.image.clone()),
        }
    }

    /// Returns a copy with the availability flag inverted.
    #[must_use]
    pub fn with_availability_toggled(&self) -> Self {
        self.merged_with(FoodChanges::default().available(!self.available))
    }
}

/// Fields of a food that does not exist on the backend yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewFood {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Price in the configured currency.
    pub price: f64,
    /// Ignored on creation; new foods start available.
    pub available: bool,
    /// Image URL.
    pub image: String,
}

impl NewFood {
    /// Creates a payload with empty description and image.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Body sent on creation. New foods always start available.
    #[must_use]
    pub fn into_create_payload(self) -> Self {
        Self {
            available: true,
            ..self
        }
    }
}

/// Partial update of a food. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodChanges {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New availability.
    pub available: Option<bool>,
    /// New image URL.
    pub image: Option<String>,
}

impl FoodChanges {
    /// Sets the new name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new price.
    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the new availability.
    #[must_use]
    pub const fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Sets the new image URL.
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.available.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_changes() {
        let food = Food::new(2_u64, "B").with_price(10.0).with_image("b.png");
        let merged = food.merged_with(FoodChanges::default().name("C"));

        assert_eq!(merged.id(), FoodId(2));
        assert_eq!(merged.name(), "C");
        assert!((merged.price() - 10.0).abs() < f64::EPSILON);
        assert_eq!(merged.image(), "b.png");
    }

    #[test]
    fn test_empty_changes_keep_food() {
        let food = Food::new(1_u64, "A").with_description("plain");
        assert!(FoodChanges::default().is_empty());
        assert_eq!(food.merged_with(FoodChanges::default()), food);
    }

    #[test]
    fn test_create_payload_forces_available() {
        let mut new_food = NewFood::new("Ao molho", 19.9);
        new_food.available = false;

        assert!(new_food.into_create_payload().available);
    }

    #[test]
    fn test_toggle_availability() {
        let food = Food::new(1_u64, "A");
        assert!(!food.with_availability_toggled().is_available());
        assert!(
            food.with_availability_toggled()
                .with_availability_toggled()
                .is_available()
        );
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"id":1,"name":"Ao molho","description":"Macarrão","price":19.9,"available":true,"image":"https://img/1.png"}"#;
        let food: Food = serde_json::from_str(json).unwrap();

        assert_eq!(food.id(), FoodId(1));
        assert_eq!(food.description(), "Macarrão");

        let value = serde_json::to_value(&food).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["available"], true);
    }
}
