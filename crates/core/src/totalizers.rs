//! Totalizers

use serde::{Deserialize, Serialize};

/// Identifier of the provider's item subtotal entry.
pub const ITEMS_ID: &str = "Items";

/// Identifier of the synthesized packaging fee entry.
pub const PACKAGING_ID: &str = "Packaging";

/// Identifier of the synthesized deposit-return (SGR) fee entry.
pub const DEPOSIT_ID: &str = "SGR";

/// Type tag carried by every totalizer the provider emits.
pub const TOTALIZER_KIND: &str = "Totalizer";

/// A named monetary line in a cart summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totalizer {
    /// Identifier, unique within a list
    pub id: String,

    /// Display name
    pub name: String,

    /// Monetary value, may be negative (discounts)
    pub value: f64,

    /// Type tag
    #[serde(rename = "__typename", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    TOTALIZER_KIND.to_string()
}

impl Totalizer {
    /// Creates a new totalizer tagged with [`TOTALIZER_KIND`].
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            kind: default_kind(),
        }
    }

    /// Whether this is the provider's item subtotal entry.
    pub fn is_items(&self) -> bool {
        self.id == ITEMS_ID
    }
}

/// Finds a totalizer by identifier.
pub fn find<'a>(totalizers: &'a [Totalizer], id: &str) -> Option<&'a Totalizer> {
    totalizers.iter().find(|totalizer| totalizer.id == id)
}

/// Display names of the synthesized fee entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeLabels {
    /// Name of the "Packaging" entry
    pub packaging: String,

    /// Name of the "SGR" entry
    pub deposit: String,
}

impl Default for FeeLabels {
    fn default() -> Self {
        Self {
            packaging: "Taxa ambalare".to_string(),
            deposit: "Garantie".to_string(),
        }
    }
}
