//! Product value type.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A product offered on the marketplace.
///
/// Products are value objects: two products with the same name and price are
/// the same product, wherever they came from. Inventories and carts match
/// entries by this equality, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_price: u64) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}

impl ValueObject for Product {}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name)
    }
}
