//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 30% membership discount on 10,500:                                   │
//! │    10500 * 0.3 = 3150.0000000000005 on some paths → Lost trust!         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    Prices in this store are whole currency units (no sub-unit coins),   │
//! │    so Money is an i64 count of units. Percentages floor explicitly.     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use corner_core::money::Money;
//!
//! // Create from whole units (the only constructor)
//! let price = Money::from_units(1_000);
//!
//! // Arithmetic operations
//! let line_total = price * 3u32;              // 3,000
//! let total = line_total + Money::from_units(500);
//!
//! assert_eq!(total.units(), 3_500);
//! assert_eq!(total.to_string(), "3,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Discount math subtracts; totals never go negative, but
///   intermediate values may during receipt assembly
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for purchase-record snapshots
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──► PurchaseLine.unit_price ──► line totals              │
/// │                                                                         │
/// │  Receipt.total_amount ──► promotion discount ──► membership discount    │
/// │                                 │                                       │
/// │                                 └──► final amount on the receipt        │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::money::Money;
    ///
    /// let price = Money::from_units(1_000);
    /// assert_eq!(price.units(), 1_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.units(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::money::Money;
    ///
    /// let unit_price = Money::from_units(1_200);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.units(), 3_600);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Cola 1,000
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 3,000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Applies a percentage expressed in basis points, flooring the result.
    ///
    /// ## Arguments
    /// * `bps` - Basis points (3000 = 30%)
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::money::Money;
    ///
    /// let base = Money::from_units(10_500);
    /// let cut = base.percentage_floor(3_000); // 30% of 10,500
    /// assert_eq!(cut.units(), 3_150);
    /// ```
    ///
    /// ## Why Floor?
    /// Discounts are rounded DOWN so the store never gives away a unit it
    /// did not promise. `floor(0.30 × 333) = 99`, not 100.
    pub fn percentage_floor(&self, bps: u32) -> Money {
        // i128 guards against overflow on very large totals
        let scaled = (self.0 as i128 * bps as i128) / 10_000;
        Money::from_units(scaled as i64)
    }

    /// Returns the smaller of two money values.
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::money::Money;
    ///
    /// let computed = Money::from_units(9_000);
    /// let cap = Money::from_units(8_000);
    /// assert_eq!(computed.min(cap).units(), 8_000);
    /// ```
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation groups thousands with commas: `12,500`.
///
/// ## Note
/// Receipts print amounts right-aligned; width handling stays in the
/// rendering layer, only digit grouping lives here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by u32 (for quantity calculations).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (receipt totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
