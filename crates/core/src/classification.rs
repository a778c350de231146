//! Classification
//!
//! Partitions SKU identifiers into the packaging and deposit fee sets.

use rustc_hash::FxHashSet;

use crate::{items::CartItem, settings::FeeConfiguration};

/// Which fee category an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCategory {
    /// Packaging materials
    Packaging,

    /// Returnable-container deposit (SGR)
    Deposit,
}

/// SKU identifiers grouped by fee category.
///
/// The two sets are disjoint: a SKU configured under both categories is kept
/// as packaging only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    packaging_ids: FxHashSet<String>,
    deposit_ids: FxHashSet<String>,
}

impl Classification {
    /// Builds a classification from explicit id lists.
    pub fn new<P, D>(packaging_ids: P, deposit_ids: D) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let packaging_ids: FxHashSet<String> = packaging_ids.into_iter().map(Into::into).collect();

        let deposit_ids = deposit_ids
            .into_iter()
            .map(Into::into)
            .filter(|id| !packaging_ids.contains(id))
            .collect();

        Self {
            packaging_ids,
            deposit_ids,
        }
    }

    /// Packaging SKU identifiers.
    pub fn packaging_ids(&self) -> &FxHashSet<String> {
        &self.packaging_ids
    }

    /// Deposit SKU identifiers.
    pub fn deposit_ids(&self) -> &FxHashSet<String> {
        &self.deposit_ids
    }

    /// Whether no SKU is classified at all.
    pub fn is_empty(&self) -> bool {
        self.packaging_ids.is_empty() && self.deposit_ids.is_empty()
    }

    /// Category of the given SKU, if any.
    pub fn category_of(&self, id: &str) -> Option<FeeCategory> {
        if self.packaging_ids.contains(id) {
            Some(FeeCategory::Packaging)
        } else if self.deposit_ids.contains(id) {
            Some(FeeCategory::Deposit)
        } else {
            None
        }
    }

    /// Whether the item falls into either fee category.
    pub fn is_classified(&self, item: &CartItem) -> bool {
        self.category_of(&item.id).is_some()
    }
}

/// Flattens a configuration into packaging and deposit id sets.
pub fn classify(config: &FeeConfiguration) -> Classification {
    Classification::new(
        config.packaging.values().cloned(),
        config
            .deposit
            .values()
            .flat_map(|category| category.sku_ids.iter().cloned()),
    )
}
