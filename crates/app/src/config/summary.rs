//! Summary Config

use clap::Args;
use feesplit::{FeeLabels, ReconcileOptions, Reconciler};

/// Output format of the recomputed summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,

    /// Render inputs as JSON.
    Json,
}

/// Summary rendering settings.
#[derive(Debug, Args)]
pub struct SummaryConfig {
    /// Display name of the packaging fee entry
    #[arg(long, env = "FEESPLIT_PACKAGING_LABEL", default_value = "Taxa ambalare")]
    pub packaging_label: String,

    /// Display name of the deposit-return (SGR) fee entry
    #[arg(long, env = "FEESPLIT_DEPOSIT_LABEL", default_value = "Garantie")]
    pub deposit_label: String,

    /// Keep the breakdown when every cart item is a fee item
    #[arg(long, env = "FEESPLIT_KEEP_FULLY_RECLASSIFIED")]
    pub keep_fully_reclassified: bool,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SummaryConfig {
    /// Reconciler configured with these labels and options.
    #[must_use]
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(
            FeeLabels {
                packaging: self.packaging_label.clone(),
                deposit: self.deposit_label.clone(),
            },
            ReconcileOptions {
                suppress_fully_reclassified: !self.keep_fully_reclassified,
            },
        )
    }
}
