//! Aggregates

use crate::{
    classification::{Classification, FeeCategory},
    items::CartItem,
};

/// Monetary totals of a cart, split by fee category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    /// Sum of every line value
    pub original: f64,

    /// Sum of packaging lines, `None` when no packaging SKU is configured
    pub packaging: Option<f64>,

    /// Sum of deposit lines, `None` when no deposit SKU is configured
    pub deposit: Option<f64>,

    /// Number of cart lines
    pub item_count: usize,

    /// Number of cart lines outside both fee categories
    pub unclassified_count: usize,
}

impl Aggregates {
    /// Value left on the "Items" entry once fees are broken out.
    pub fn items_value(&self) -> f64 {
        self.original - self.packaging.unwrap_or(0.0) - self.deposit.unwrap_or(0.0)
    }

    /// Whether every cart line falls into a fee category.
    pub fn is_fully_reclassified(&self) -> bool {
        self.unclassified_count == 0
    }
}

/// Sums line values overall and per fee category.
pub fn aggregate(items: &[CartItem], classification: &Classification) -> Aggregates {
    let mut packaging = 0.0;
    let mut deposit = 0.0;
    let mut original = 0.0;
    let mut unclassified_count = 0;

    for item in items {
        let value = item.line_value();
        original += value;

        match classification.category_of(&item.id) {
            Some(FeeCategory::Packaging) => packaging += value,
            Some(FeeCategory::Deposit) => deposit += value,
            None => unclassified_count += 1,
        }
    }

    Aggregates {
        original,
        packaging: (!classification.packaging_ids().is_empty()).then_some(packaging),
        deposit: (!classification.deposit_ids().is_empty()).then_some(deposit),
        item_count: items.len(),
        unclassified_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn splits_packaging_from_items() {
        let items = [CartItem::new("A", 1000.0, 2), CartItem::new("BAG1", 50.0, 1)];
        let classification = Classification::new(["BAG1"], Vec::<String>::new());

        let aggregates = aggregate(&items, &classification);

        assert!(close(aggregates.original, 2050.0));
        assert!(aggregates.packaging.is_some_and(|v| close(v, 50.0)));
        assert_eq!(aggregates.deposit, None);
        assert!(close(aggregates.items_value(), 2000.0));
        assert_eq!(aggregates.unclassified_count, 1);
    }

    #[test]
    fn configured_but_absent_category_sums_to_zero() {
        let items = [CartItem::new("A", 10.0, 1)];
        let classification = Classification::new(["BAG1"], ["PET1"]);

        let aggregates = aggregate(&items, &classification);

        assert!(aggregates.packaging.is_some_and(|v| close(v, 0.0)));
        assert!(aggregates.deposit.is_some_and(|v| close(v, 0.0)));
    }

    #[test]
    fn empty_classification_leaves_categories_absent() {
        let items = [CartItem::new("A", 10.0, 3)];

        let aggregates = aggregate(&items, &Classification::default());

        assert!(close(aggregates.original, 30.0));
        assert_eq!(aggregates.packaging, None);
        assert_eq!(aggregates.deposit, None);
        assert!(!aggregates.is_fully_reclassified());
    }

    #[test]
    fn quantities_multiply_category_values() {
        let items = [
            CartItem::new("PET1", 0.5, 6),
            CartItem::new("PET2", 0.5, 4),
            CartItem::new("A", 12.0, 1),
        ];
        let classification = Classification::new(Vec::<String>::new(), ["PET1", "PET2"]);

        let aggregates = aggregate(&items, &classification);

        assert!(aggregates.deposit.is_some_and(|v| close(v, 5.0)));
        assert!(close(aggregates.items_value(), 12.0));
    }

    #[test]
    fn detects_full_reclassification() {
        let items = [CartItem::new("BAG1", 50.0, 1), CartItem::new("PET1", 50.0, 2)];
        let classification = Classification::new(["BAG1"], ["PET1"]);

        let aggregates = aggregate(&items, &classification);

        assert!(aggregates.is_fully_reclassified());
        assert!(close(aggregates.items_value(), 0.0));
    }

    #[test]
    fn conserves_original_total() {
        let items = [
            CartItem::new("A", 19.99, 3),
            CartItem::new("BAG1", 0.35, 2),
            CartItem::new("PET1", 0.5, 7),
            CartItem {
                id: "B".to_string(),
                list_price: None,
                quantity: None,
            },
        ];
        let classification = Classification::new(["BAG1"], ["PET1"]);

        let aggregates = aggregate(&items, &classification);
        let redistributed = aggregates.items_value()
            + aggregates.packaging.unwrap_or(0.0)
            + aggregates.deposit.unwrap_or(0.0);

        assert!(close(redistributed, aggregates.original));
    }
}
