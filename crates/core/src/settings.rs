//! Fee Settings
//!
//! Wire model of the fee-classification configuration endpoint:
//!
//! ```json
//! { "data": { "bagsSettings": { "bag": "BAG1" },
//!             "sgrSettings": { "plastic": { "skuIds": ["PET1", "PET2"] } } } }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The response was valid JSON but not shaped like a settings payload.
#[derive(Debug, Error)]
#[error("unexpected fee settings shape: {0}")]
pub struct SettingsShapeError(#[from] serde_json::Error);

/// A deposit-return category and the SKUs it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositCategory {
    /// SKU identifiers in this category
    pub sku_ids: Vec<String>,
}

/// Snapshot of the fee-classification configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeConfiguration {
    /// Packaging category label to SKU identifier
    pub packaging: BTreeMap<String, String>,

    /// Deposit category label to its SKUs
    pub deposit: BTreeMap<String, DepositCategory>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Payload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    bags_settings: BTreeMap<String, Value>,
    sgr_settings: BTreeMap<String, Value>,
}

impl FeeConfiguration {
    /// Parses a settings response body.
    ///
    /// Only the envelope is strict. Packaging entries that are not strings and
    /// deposit categories without a `skuIds` array are dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsShapeError`] when `data`, `bagsSettings` or
    /// `sgrSettings` is missing or is not an object.
    pub fn from_response(body: Value) -> Result<Self, SettingsShapeError> {
        let Envelope { data } = serde_json::from_value(body)?;

        let packaging = data
            .bags_settings
            .into_iter()
            .filter_map(|(label, sku)| match sku {
                Value::String(sku) => Some((label, sku)),
                _ => None,
            })
            .collect();

        let deposit = data
            .sgr_settings
            .into_iter()
            .map(|(label, category)| (label, deposit_category(&category)))
            .collect();

        Ok(Self { packaging, deposit })
    }

    /// Whether neither mapping has any entry.
    pub fn is_empty(&self) -> bool {
        self.packaging.is_empty() && self.deposit.is_empty()
    }
}

fn deposit_category(value: &Value) -> DepositCategory {
    let sku_ids = value
        .get("skuIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    DepositCategory { sku_ids }
}
