//! Feesplit
//!
//! Recomputes a cart summary by breaking packaging and deposit-return (SGR)
//! fees out of the item subtotal, based on SKU lists from a fee-classification
//! configuration.
//!
//! The pipeline is pure and synchronous:
//! [`settings`] → [`classification`] → [`aggregates`] → [`reconcile`].

pub mod aggregates;
pub mod classification;
pub mod items;
pub mod reconcile;
pub mod settings;
pub mod summary;
pub mod totalizers;

pub use aggregates::{Aggregates, aggregate};
pub use classification::{Classification, FeeCategory, classify};
pub use items::CartItem;
pub use reconcile::{ReconcileOptions, Reconciler};
pub use settings::{DepositCategory, FeeConfiguration, SettingsShapeError};
pub use summary::{CartSnapshot, SummaryError, SummaryView};
pub use totalizers::{FeeLabels, Totalizer};
