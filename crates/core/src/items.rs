//! Items

use serde::{Deserialize, Serialize};

/// A line item as supplied by the cart-state provider.
///
/// Prices are expressed in the provider's minor units and are never rounded
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// SKU identifier
    pub id: String,

    /// Unit list price, treated as zero when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<f64>,

    /// Quantity, treated as one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl CartItem {
    /// Creates a new item with an explicit price and quantity.
    pub fn new(id: impl Into<String>, list_price: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            list_price: Some(list_price),
            quantity: Some(quantity),
        }
    }

    /// Returns the unit list price, defaulting to zero.
    pub fn unit_price(&self) -> f64 {
        self.list_price.unwrap_or(0.0)
    }

    /// Returns the quantity, defaulting to one.
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Returns the line value: unit price times quantity.
    pub fn line_value(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity())
    }
}

/// Sums the line value of every item.
pub fn total_value<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> f64 {
    items.into_iter().map(CartItem::line_value).sum()
}
