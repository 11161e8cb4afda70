use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A product price, preserved exactly as the caller supplied it.
///
/// The presentation layer sends either a bare number (`200`) or a string
/// (`"200"`, `"$200"`). No currency normalization is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// A JSON number.
    Amount(serde_json::Number),
    /// Free-form text, possibly carrying a currency prefix.
    Text(String),
}

impl Price {
    /// Returns `true` for a text price that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Amount(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::Amount(value.into())
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// The caller-editable fields of a product.
///
/// Create and update both carry the full set; an update replaces the record
/// rather than merging into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Price as supplied.
    pub price: Price,
}

impl ProductFields {
    /// Build a field set.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Reject empty names, descriptions, and blank text prices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.price.is_blank() {
            return Err(ValidationError::MissingField("price"));
        }
        Ok(())
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "id": "9b2f7c1e-4a3d-4e8b-9f61-2d7c0a5e3b14",
    "name": "Monitor",
    "description": "24in",
    "price": "200",
    "photoRef": "/images/5f0c2a8e9d7b4c11a3e6f2d4b8c9a701.png"
})))]
pub struct ProductRecord {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Price as supplied (number or string).
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub price: Price,
    /// Reference to the stored photo, or empty when none is set.
    pub photo_ref: String,
}

impl ProductRecord {
    /// Create a record with a freshly generated identifier.
    pub fn new(fields: ProductFields, photo_ref: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), fields, photo_ref)
    }

    /// Create a record with a known identifier (used for full replacement).
    pub fn with_id(
        id: impl Into<String>,
        fields: ProductFields,
        photo_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            photo_ref: photo_ref.into(),
        }
    }

    /// Whether the record points at a stored photo.
    pub fn has_photo(&self) -> bool {
        !self.photo_ref.is_empty()
    }
}

/// The starter inventory a fresh process begins with.
///
/// None of these entries have a photo.
pub fn demo_inventory() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new(
            ProductFields::new("Monitor", "Monitor 24 pulgadas", Price::from(200)),
            "",
        ),
        ProductRecord::new(
            ProductFields::new("Teclado", "Teclado mecánico", Price::from(100)),
            "",
        ),
        ProductRecord::new(
            ProductFields::new("Mouse", "Mouse gamer", Price::from(50)),
            "",
        ),
    ]
}
