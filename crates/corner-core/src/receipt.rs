//! # Receipt
//!
//! The itemized outcome of a checkout: the priced lines in purchase order,
//! the membership discount locked in at build time, and totals derived on
//! demand so they can never drift from the lines.
//!
//! ```text
//!   total_amount        Σ quantity × unit_price
//! − promotion_discount  Σ free_quantity × unit_price
//! − membership_discount 30% of the non-promotion subtotal, capped
//! ─────────────────────
//!   final_amount
//! ```

use serde::{Deserialize, Serialize};

use crate::membership;
use crate::money::Money;
use crate::types::PurchaseLine;

/// A finished, immutable checkout summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<PurchaseLine>,
    pub membership_discount: Money,
}

impl Receipt {
    /// Builds a receipt from priced lines.
    ///
    /// `apply_membership` is the outcome of the two-part gate: the customer
    /// holds membership AND opted in when asked. The discount is computed
    /// once here; everything else stays derived.
    pub fn new(lines: Vec<PurchaseLine>, apply_membership: bool) -> Receipt {
        let membership_discount = if apply_membership {
            membership::membership_discount(&lines)
        } else {
            Money::zero()
        };
        Receipt {
            lines,
            membership_discount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Paid units across all lines. Free bonus units are not included.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(PurchaseLine::total_amount).sum()
    }

    pub fn promotion_discount(&self) -> Money {
        self.lines.iter().map(PurchaseLine::promotion_discount).sum()
    }

    pub fn final_amount(&self) -> Money {
        self.total_amount() - self.promotion_discount() - self.membership_discount
    }

    /// Lines that earned free bonus units, for the gift section of a
    /// printed receipt.
    pub fn free_items(&self) -> impl Iterator<Item = &PurchaseLine> {
        self.lines.iter().filter(|line| line.free_quantity > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        name: &str,
        quantity: u32,
        unit_price: i64,
        promotion_quantity: u32,
        free_quantity: u32,
    ) -> PurchaseLine {
        PurchaseLine {
            product_name: name.to_string(),
            quantity,
            unit_price: Money::from_units(unit_price),
            promotion_quantity,
            free_quantity,
        }
    }

    #[test]
    fn test_totals_derive_from_lines() {
        let receipt = Receipt::new(
            vec![
                line("cola", 7, 1_000, 6, 2),
                line("juice", 10, 1_000, 0, 0),
            ],
            true,
        );

        assert_eq!(receipt.total_quantity(), 17);
        assert_eq!(receipt.total_amount(), Money::from_units(17_000));
        assert_eq!(receipt.promotion_discount(), Money::from_units(2_000));
        // non-promotion subtotal: 1 × 1,000 + 10 × 1,000 = 11,000 → 3,300
        assert_eq!(receipt.membership_discount, Money::from_units(3_300));
        assert_eq!(receipt.final_amount(), Money::from_units(11_700));
    }

    #[test]
    fn test_final_amount_round_trips() {
        let receipt = Receipt::new(
            vec![line("cola", 3, 1_200, 3, 1), line("chips", 2, 1_700, 0, 0)],
            true,
        );
        assert_eq!(
            receipt.final_amount(),
            receipt.total_amount() - receipt.promotion_discount() - receipt.membership_discount
        );
    }

    #[test]
    fn test_membership_gate_declined() {
        let lines = vec![line("juice", 10, 1_000, 0, 0)];
        let declined = Receipt::new(lines.clone(), false);
        assert_eq!(declined.membership_discount, Money::zero());
        assert_eq!(declined.final_amount(), Money::from_units(10_000));

        let accepted = Receipt::new(lines, true);
        assert_eq!(accepted.membership_discount, Money::from_units(3_000));
        assert_eq!(accepted.final_amount(), Money::from_units(7_000));
    }

    #[test]
    fn test_free_items_section() {
        let receipt = Receipt::new(
            vec![
                line("cola", 6, 1_000, 6, 2),
                line("juice", 1, 1_000, 0, 0),
                line("water", 2, 500, 2, 1),
            ],
            false,
        );
        let gifts: Vec<_> = receipt
            .free_items()
            .map(|line| (line.product_name.as_str(), line.free_quantity))
            .collect();
        assert_eq!(gifts, vec![("cola", 2), ("water", 1)]);
    }

    #[test]
    fn test_empty_receipt() {
        let receipt = Receipt::new(Vec::new(), true);
        assert!(receipt.is_empty());
        assert_eq!(receipt.total_quantity(), 0);
        assert_eq!(receipt.final_amount(), Money::zero());
        assert_eq!(receipt.membership_discount, Money::zero());
    }
}
