/// Represents a product in the inventory.
///
/// # Remote Store
/// This struct implements the [`StoreRecord`](remote_store::StoreRecord) trait (see
/// [`crate::remote::record`]), so the same type is what the remote store persists and what the
/// local collection holds.
///
/// - Writable fields travel as [`ProductFields`].
/// - The id is assigned by the remote store and never changes.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

use crate::error::InventoryError;

/// Quantities strictly below this (and above zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Type-safe identifier for Products.
///
/// Ordered like the remote store's numeric ids, so sorting by `ProductId` sorts by creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the remote store
    /// * `name` - Product name
    /// * `quantity` - Units in stock
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
        }
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.quantity)
    }

    /// Overwrites the writable fields, keeping the id.
    pub fn set_fields(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.quantity = fields.quantity;
    }
}

/// The writable fields of a product, as sent to the remote store on create and update.
///
/// Built through [`ProductFields::validate`], which is the only place raw user input becomes a
/// name and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub quantity: u32,
}

impl ProductFields {
    /// Checks raw input and produces the fields to store.
    ///
    /// The name is trimmed and must not be empty afterwards. The quantity must be a whole number
    /// between zero and `u32::MAX`.
    pub fn validate(name: &str, quantity: i64) -> Result<Self, InventoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InventoryError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        if quantity < 0 {
            return Err(InventoryError::Validation(format!(
                "quantity must not be negative (got {quantity})"
            )));
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            InventoryError::Validation(format!("quantity {quantity} is too large"))
        })?;
        Ok(Self {
            name: name.to_string(),
            quantity,
        })
    }
}

/// Stock classification of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Regular,
}

impl StockLevel {
    pub fn of(quantity: u32) -> Self {
        match quantity {
            0 => StockLevel::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockLevel::Low,
            _ => StockLevel::Regular,
        }
    }
}
