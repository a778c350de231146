//! Summary
//!
//! Inbound cart snapshots and the render inputs derived from them.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    aggregates::aggregate, classification::Classification, items::CartItem,
    reconcile::Reconciler, totalizers::Totalizer,
};

/// Errors raised while rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Writing to the output failed.
    #[error("failed to write summary")]
    Write(#[from] fmt::Error),
}

/// Read-only view of the provider's cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart lines
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Provider totalizers
    #[serde(default)]
    pub totalizers: Vec<Totalizer>,

    /// Cart total as computed by the provider
    #[serde(default)]
    pub value: f64,

    /// Opaque payment data, passed through untouched
    #[serde(default)]
    pub payment_data: Value,
}

/// Inputs handed to the summary renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    /// Reconciled totalizers
    pub totalizers: Vec<Totalizer>,

    /// Provider payment data
    pub payment_data: Value,

    /// Provider cart total
    pub total: f64,

    /// Sum of list price times quantity before reclassification
    pub original_total: f64,
}

impl SummaryView {
    /// Derives the render inputs for a snapshot under a classification.
    pub fn derive(
        snapshot: &CartSnapshot,
        classification: &Classification,
        reconciler: &Reconciler,
    ) -> Self {
        let aggregates = aggregate(&snapshot.items, classification);

        Self {
            totalizers: reconciler.reconcile(&snapshot.totalizers, &aggregates),
            payment_data: snapshot.payment_data.clone(),
            total: snapshot.value,
            original_total: aggregates.original,
        }
    }

    /// Write the summary as a table to the given output.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if writing fails.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Totalizer", "Id", "Value"]);

        for totalizer in &self.totalizers {
            builder.push_record([
                totalizer.name.clone(),
                totalizer.id.clone(),
                format_value(totalizer.value),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::modern_rounded())
            .modify(Columns::last(), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Total:          {}", format_value(self.total))?;
        writeln!(out, "Original total: {}", format_value(self.original_total))?;

        Ok(())
    }
}

fn format_value(value: f64) -> String {
    format!("{value:.2}")
}
