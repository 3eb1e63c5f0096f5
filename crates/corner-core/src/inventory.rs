//! # Inventory Commit
//!
//! Applies a priced purchase to the shelf: paid units AND free bonus units
//! both leave stock, promotional stock first, the remainder from regular.
//!
//! ## Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       commit(lines)                                     │
//! │                                                                         │
//! │  1. PLAN    walk every line against a stock snapshot,                   │
//! │             splitting consumed = quantity + free_quantity into          │
//! │             (promotional, regular) deduction steps                      │
//! │                 │                                                       │
//! │                 │ any shortfall ──► StockConsistency, NOTHING mutated   │
//! │                 ▼                                                       │
//! │  2. APPLY   run the validated steps against the catalog                 │
//! │                                                                         │
//! │  Either the whole purchase commits or none of it does.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A plan shortfall means pricing and commit disagree about stock — with a
//! correctly sequenced checkout that is a program fault, not a message to
//! show the customer, which is why it is NOT `InsufficientStock`.

use std::collections::BTreeMap;
use tracing::debug;

use crate::catalog::{Catalog, VariantKind};
use crate::error::{CoreError, CoreResult};
use crate::types::PurchaseLine;

// =============================================================================
// Deduction Plan
// =============================================================================

/// One validated stock deduction: take `amount` units of `kind` from
/// `product_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionStep {
    pub product_name: String,
    pub kind: VariantKind,
    pub amount: u32,
}

// =============================================================================
// Inventory Updater
// =============================================================================

/// Commits priced purchases against the catalog.
pub struct InventoryUpdater<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> InventoryUpdater<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        InventoryUpdater { catalog }
    }

    /// Deducts the whole purchase, or nothing.
    ///
    /// Returns the applied deduction steps. Lines naming the same product
    /// share one shelf snapshot, so their joint consumption is what gets
    /// validated.
    pub fn commit(&mut self, lines: &[PurchaseLine]) -> CoreResult<Vec<DeductionStep>> {
        let steps = self.plan(lines)?;
        for step in &steps {
            debug!(
                product = step.product_name.as_str(),
                kind = %step.kind,
                amount = step.amount,
                "deducting stock"
            );
            self.catalog
                .deduct(&step.product_name, step.kind, step.amount)
                .map_err(|_| CoreError::StockConsistency {
                    product: step.product_name.clone(),
                    shortfall: step.amount,
                })?;
        }
        Ok(steps)
    }

    /// Walks the lines against a stock snapshot, promotional stock first.
    /// Fails without touching the catalog when regular stock cannot absorb
    /// a remainder.
    fn plan(&self, lines: &[PurchaseLine]) -> CoreResult<Vec<DeductionStep>> {
        let mut shelf: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
        let mut steps = Vec::new();

        for line in lines {
            let name = line.product_name.as_str();
            let (promo_left, regular_left) = shelf.entry(name).or_insert_with(|| {
                (
                    self.catalog
                        .promotional_variant(name)
                        .map(|variant| variant.stock)
                        .unwrap_or(0),
                    self.catalog
                        .regular_variant(name)
                        .map(|variant| variant.stock)
                        .unwrap_or(0),
                )
            });

            let consumed = line.consumed_quantity();
            let from_promotion = consumed.min(*promo_left);
            let remainder = consumed - from_promotion;
            if remainder > *regular_left {
                return Err(CoreError::StockConsistency {
                    product: name.to_string(),
                    shortfall: remainder - *regular_left,
                });
            }
            *promo_left -= from_promotion;
            *regular_left -= remainder;

            if from_promotion > 0 {
                steps.push(DeductionStep {
                    product_name: name.to_string(),
                    kind: VariantKind::Promotional,
                    amount: from_promotion,
                });
            }
            if remainder > 0 {
                steps.push(DeductionStep {
                    product_name: name.to_string(),
                    kind: VariantKind::Regular,
                    amount: remainder,
                });
            }
        }
        Ok(steps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Product, ProductCategory};

    fn product(name: &str, stock: u32, promotion: Option<&str>) -> Product {
        Product {
            name: name.to_string(),
            price: Money::from_units(1_000),
            stock,
            promotion: promotion.map(str::to_string),
            description: None,
            category: ProductCategory::infer(name),
        }
    }

    fn line(name: &str, quantity: u32, promotion_quantity: u32, free_quantity: u32) -> PurchaseLine {
        PurchaseLine {
            product_name: name.to_string(),
            quantity,
            unit_price: Money::from_units(1_000),
            promotion_quantity,
            free_quantity,
        }
    }

    fn cola_shelf(promo_stock: u32, regular_stock: u32) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_variant(product("cola", promo_stock, Some("carbonated 2+1")));
        catalog.add_variant(product("cola", regular_stock, None));
        catalog
    }

    #[test]
    fn test_commit_deducts_promotion_stock_first() {
        let mut catalog = cola_shelf(3, 10);

        // 4 paid + 1 free consume 5 units: 3 promotional, then 2 regular
        let steps = InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 4, 3, 1)])
            .unwrap();

        assert_eq!(
            steps,
            vec![
                DeductionStep {
                    product_name: "cola".to_string(),
                    kind: VariantKind::Promotional,
                    amount: 3,
                },
                DeductionStep {
                    product_name: "cola".to_string(),
                    kind: VariantKind::Regular,
                    amount: 2,
                },
            ]
        );
        assert_eq!(catalog.promotional_variant("cola").unwrap().stock, 0);
        assert_eq!(catalog.regular_variant("cola").unwrap().stock, 8);
    }

    #[test]
    fn test_commit_within_promotion_stock_leaves_regular_untouched() {
        let mut catalog = cola_shelf(9, 10);

        let steps = InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 6, 6, 2)])
            .unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, VariantKind::Promotional);
        assert_eq!(steps[0].amount, 8);
        assert_eq!(catalog.promotional_variant("cola").unwrap().stock, 1);
        assert_eq!(catalog.regular_variant("cola").unwrap().stock, 10);
    }

    #[test]
    fn test_commit_regular_only_product() {
        let mut catalog = Catalog::new();
        catalog.add_variant(product("juice", 5, None));

        InventoryUpdater::new(&mut catalog)
            .commit(&[line("juice", 3, 0, 0)])
            .unwrap();
        assert_eq!(catalog.regular_variant("juice").unwrap().stock, 2);
    }

    #[test]
    fn test_free_bonus_can_spill_into_regular_stock() {
        let mut catalog = cola_shelf(3, 2);

        // 3 paid + 1 free: the bonus unit comes off the regular shelf
        InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 3, 3, 1)])
            .unwrap();
        assert_eq!(catalog.promotional_variant("cola").unwrap().stock, 0);
        assert_eq!(catalog.regular_variant("cola").unwrap().stock, 1);
    }

    #[test]
    fn test_shortfall_is_a_consistency_fault() {
        let mut catalog = cola_shelf(0, 2);

        let err = InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 3, 0, 0)])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::StockConsistency {
                shortfall: 1,
                ..
            }
        ));
        assert_eq!(catalog.regular_variant("cola").unwrap().stock, 2);
    }

    #[test]
    fn test_faulty_later_line_rolls_back_nothing() {
        let mut catalog = cola_shelf(3, 10);
        catalog.add_variant(product("juice", 1, None));

        let err = InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 4, 3, 1), line("juice", 5, 0, 0)])
            .unwrap_err();
        assert!(matches!(err, CoreError::StockConsistency { .. }));

        // the valid first line was not applied either
        assert_eq!(catalog.promotional_variant("cola").unwrap().stock, 3);
        assert_eq!(catalog.regular_variant("cola").unwrap().stock, 10);
        assert_eq!(catalog.regular_variant("juice").unwrap().stock, 1);
    }

    #[test]
    fn test_duplicate_lines_share_one_shelf_snapshot() {
        let mut catalog = cola_shelf(3, 4);

        // jointly consume 3 + 4 = 7 of the 7 available
        InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 3, 3, 0), line("cola", 4, 0, 0)])
            .unwrap();
        assert_eq!(catalog.total_stock("cola"), 0);

        // a second purchase on the emptied shelf faults
        let err = InventoryUpdater::new(&mut catalog)
            .commit(&[line("cola", 1, 0, 0)])
            .unwrap_err();
        assert!(matches!(err, CoreError::StockConsistency { .. }));
    }
}
