//! # Membership Discount
//!
//! Members get 30% off the part of the purchase that no promotion touched,
//! capped per receipt. Promotion-covered units are excluded so the two
//! benefits never stack on the same item.

use crate::money::Money;
use crate::types::PurchaseLine;

/// Discount rate in basis points (30%).
pub const MEMBERSHIP_DISCOUNT_BPS: u32 = 3_000;

/// Per-receipt ceiling on the membership discount.
pub const MEMBERSHIP_DISCOUNT_CAP: Money = Money::from_units(8_000);

/// Computes the membership discount for a priced purchase.
///
/// The base is the amount paid for units outside any promotion set. The
/// discount is floored to a whole currency unit and capped.
///
/// # Examples
/// ```
/// use corner_core::membership::membership_discount;
/// use corner_core::money::Money;
/// use corner_core::types::PurchaseLine;
///
/// let lines = vec![PurchaseLine {
///     product_name: "juice".to_string(),
///     quantity: 10,
///     unit_price: Money::from_units(1_000),
///     promotion_quantity: 0,
///     free_quantity: 0,
/// }];
/// assert_eq!(membership_discount(&lines), Money::from_units(3_000));
/// ```
pub fn membership_discount(lines: &[PurchaseLine]) -> Money {
    let base: Money = lines
        .iter()
        .map(|line| line.unit_price.multiply_quantity(line.non_promotion_quantity()))
        .sum();
    base.percentage_floor(MEMBERSHIP_DISCOUNT_BPS)
        .min(MEMBERSHIP_DISCOUNT_CAP)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, unit_price: i64, promotion_quantity: u32) -> PurchaseLine {
        PurchaseLine {
            product_name: "cola".to_string(),
            quantity,
            unit_price: Money::from_units(unit_price),
            promotion_quantity,
            free_quantity: 0,
        }
    }

    #[test]
    fn test_thirty_percent_of_unpromoted_amount() {
        assert_eq!(
            membership_discount(&[line(10, 1_000, 0)]),
            Money::from_units(3_000)
        );
    }

    #[test]
    fn test_capped_at_eight_thousand() {
        assert_eq!(
            membership_discount(&[line(10, 3_000, 0)]),
            Money::from_units(8_000)
        );
    }

    #[test]
    fn test_promotion_covered_units_excluded() {
        // 6 of 7 units sit inside promotion sets; base is 1 × 1,000
        assert_eq!(
            membership_discount(&[line(7, 1_000, 6)]),
            Money::from_units(300)
        );
        assert_eq!(membership_discount(&[line(6, 1_000, 6)]), Money::zero());
    }

    #[test]
    fn test_empty_purchase_has_no_discount() {
        assert_eq!(membership_discount(&[]), Money::zero());
    }

    #[test]
    fn test_discount_floors_fractional_units() {
        // 30% of 1,111 is 333.3 → 333
        assert_eq!(
            membership_discount(&[line(1, 1_111, 0)]),
            Money::from_units(333)
        );
    }

    #[test]
    fn test_sums_across_lines_before_flooring() {
        let lines = [line(1, 1_115, 0), line(1, 1_115, 0)];
        // base 2,230 → 669, not the 334 + 334 of per-line flooring
        assert_eq!(membership_discount(&lines), Money::from_units(669));
    }
}
