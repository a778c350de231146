//! Reconcile
//!
//! Merges recalculated fee aggregates into the provider's totalizer list.

use smallvec::SmallVec;

use crate::{
    aggregates::Aggregates,
    totalizers::{DEPOSIT_ID, FeeLabels, PACKAGING_ID, Totalizer},
};

/// Reconciliation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Return an empty list for an empty cart, or when no cart line is left
    /// outside the fee categories.
    pub suppress_fully_reclassified: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            suppress_fully_reclassified: true,
        }
    }
}

/// Rebuilds a totalizer list with packaging and deposit fees broken out.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    labels: FeeLabels,
    options: ReconcileOptions,
}

impl Reconciler {
    /// Creates a reconciler with the given labels and options.
    pub fn new(labels: FeeLabels, options: ReconcileOptions) -> Self {
        Self { labels, options }
    }

    /// Display names used for synthesized entries.
    pub fn labels(&self) -> &FeeLabels {
        &self.labels
    }

    /// Produces the corrected totalizer list.
    ///
    /// The base list is never modified. An empty cart yields an empty list.
    /// Without any configured fee category the result is a copy of `base`.
    /// Otherwise the "Items" entry (when present)
    /// is reduced by the fee aggregates, and a "Packaging" and/or "SGR" entry is
    /// appended for each strictly positive aggregate.
    pub fn reconcile(&self, base: &[Totalizer], aggregates: &Aggregates) -> Vec<Totalizer> {
        if self.options.suppress_fully_reclassified && aggregates.item_count == 0 {
            return Vec::new();
        }

        if aggregates.packaging.is_none() && aggregates.deposit.is_none() {
            return base.to_vec();
        }

        if self.options.suppress_fully_reclassified && aggregates.is_fully_reclassified() {
            return Vec::new();
        }

        let mut totalizers = base.to_vec();

        if let Some(items) = totalizers.iter_mut().find(|totalizer| totalizer.is_items()) {
            items.value = aggregates.items_value();
        }

        let mut synthesized: SmallVec<[Totalizer; 2]> = SmallVec::new();

        if let Some(value) = aggregates.packaging.filter(|value| *value > 0.0) {
            synthesized.push(Totalizer::new(
                PACKAGING_ID,
                self.labels.packaging.as_str(),
                value,
            ));
        }

        if let Some(value) = aggregates.deposit.filter(|value| *value > 0.0) {
            synthesized.push(Totalizer::new(
                DEPOSIT_ID,
                self.labels.deposit.as_str(),
                value,
            ));
        }

        totalizers.extend(synthesized);
        totalizers
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        aggregates::aggregate, classification::Classification, items::CartItem,
        totalizers::{ITEMS_ID, find},
    };

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn base() -> Vec<Totalizer> {
        vec![
            Totalizer::new(ITEMS_ID, "Items", 2050.0),
            Totalizer::new("Discounts", "Discounts", -100.0),
            Totalizer::new("Shipping", "Shipping", 1500.0),
        ]
    }

    fn items() -> Vec<CartItem> {
        vec![CartItem::new("A", 1000.0, 2), CartItem::new("BAG1", 50.0, 1)]
    }

    #[test]
    fn breaks_out_packaging_entry() {
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&items(), &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert_eq!(totalizers.len(), 4);
        assert!(find(&totalizers, ITEMS_ID).is_some_and(|t| close(t.value, 2000.0)));

        let packaging = find(&totalizers, PACKAGING_ID);
        assert!(packaging.is_some_and(|t| close(t.value, 50.0)));
        assert_eq!(packaging.map(|t| t.name.as_str()), Some("Taxa ambalare"));
        assert!(find(&totalizers, DEPOSIT_ID).is_none());
    }

    #[test]
    fn preserves_unrelated_entries_in_order() {
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&items(), &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);
        let ids: Vec<&str> = totalizers.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, [ITEMS_ID, "Discounts", "Shipping", PACKAGING_ID]);
        assert!(find(&totalizers, "Shipping").is_some_and(|t| close(t.value, 1500.0)));
    }

    #[test]
    fn appends_packaging_before_deposit() {
        let items = [
            CartItem::new("A", 10.0, 1),
            CartItem::new("BAG1", 1.0, 1),
            CartItem::new("PET1", 0.5, 2),
        ];
        let classification = Classification::new(["BAG1"], ["PET1"]);
        let aggregates = aggregate(&items, &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);
        let tail: Vec<&str> = totalizers.iter().skip(3).map(|t| t.id.as_str()).collect();

        assert_eq!(tail, [PACKAGING_ID, DEPOSIT_ID]);
        assert!(find(&totalizers, ITEMS_ID).is_some_and(|t| close(t.value, 10.0)));
        assert_eq!(
            find(&totalizers, DEPOSIT_ID).map(|t| t.name.as_str()),
            Some("Garantie")
        );
    }

    #[test]
    fn zero_aggregates_do_not_synthesize_entries() {
        let items = [CartItem::new("A", 10.0, 1), CartItem::new("BAG1", 0.0, 3)];
        let classification = Classification::new(["BAG1"], ["PET1"]);
        let aggregates = aggregate(&items, &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert_eq!(totalizers.len(), 3);
        assert!(find(&totalizers, PACKAGING_ID).is_none());
        assert!(find(&totalizers, DEPOSIT_ID).is_none());
        assert!(find(&totalizers, ITEMS_ID).is_some_and(|t| close(t.value, 10.0)));
    }

    #[test]
    fn without_configuration_returns_base_unchanged() {
        let aggregates = aggregate(&items(), &Classification::default());

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert_eq!(totalizers, base());
    }

    #[test]
    fn empty_cart_without_configuration_yields_empty_list() {
        let aggregates = aggregate(&[], &Classification::default());

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert!(totalizers.is_empty());
    }

    #[test]
    fn empty_cart_keeps_totals_when_suppression_is_disabled() {
        let aggregates = aggregate(&[], &Classification::default());
        let reconciler = Reconciler::new(
            FeeLabels::default(),
            ReconcileOptions {
                suppress_fully_reclassified: false,
            },
        );

        let totalizers = reconciler.reconcile(&base(), &aggregates);

        assert_eq!(totalizers, base());
    }

    #[test]
    fn missing_items_entry_skips_correction() {
        let base = vec![Totalizer::new("Shipping", "Shipping", 1500.0)];
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&items(), &classification);

        let totalizers = Reconciler::default().reconcile(&base, &aggregates);
        let ids: Vec<&str> = totalizers.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, ["Shipping", PACKAGING_ID]);
    }

    #[test]
    fn fully_reclassified_cart_yields_empty_list() {
        let items = [CartItem::new("BAG1", 50.0, 1), CartItem::new("PET1", 50.0, 1)];
        let classification = Classification::new(["BAG1"], ["PET1"]);
        let aggregates = aggregate(&items, &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert!(totalizers.is_empty());
    }

    #[test]
    fn empty_cart_with_configuration_yields_empty_list() {
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&[], &classification);

        let totalizers = Reconciler::default().reconcile(&base(), &aggregates);

        assert!(totalizers.is_empty());
    }

    #[test]
    fn suppression_can_be_disabled() {
        let items = [CartItem::new("BAG1", 50.0, 1)];
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&items, &classification);
        let reconciler = Reconciler::new(
            FeeLabels::default(),
            ReconcileOptions {
                suppress_fully_reclassified: false,
            },
        );

        let totalizers = reconciler.reconcile(&base(), &aggregates);

        assert!(find(&totalizers, ITEMS_ID).is_some_and(|t| close(t.value, 0.0)));
        assert!(find(&totalizers, PACKAGING_ID).is_some_and(|t| close(t.value, 50.0)));
    }

    #[test]
    fn custom_labels_name_synthesized_entries() {
        let items = [CartItem::new("A", 10.0, 1), CartItem::new("PET1", 0.5, 1)];
        let classification = Classification::new(Vec::<String>::new(), ["PET1"]);
        let aggregates = aggregate(&items, &classification);
        let reconciler = Reconciler::new(
            FeeLabels {
                packaging: "Bags".to_string(),
                deposit: "Deposit".to_string(),
            },
            ReconcileOptions::default(),
        );

        let totalizers = reconciler.reconcile(&base(), &aggregates);

        assert_eq!(
            find(&totalizers, DEPOSIT_ID).map(|t| t.name.as_str()),
            Some("Deposit")
        );
    }

    #[test]
    fn base_list_is_not_modified() {
        let base = base();
        let classification = Classification::new(["BAG1"], Vec::<String>::new());
        let aggregates = aggregate(&items(), &classification);

        let _totalizers = Reconciler::default().reconcile(&base, &aggregates);

        assert!(find(&base, ITEMS_ID).is_some_and(|t| close(t.value, 2050.0)));
        assert_eq!(base.len(), 3);
    }
}
