//! # Domain Types
//!
//! Core domain types shared across the workspace: products, categories,
//! promotions, and priced purchase lines.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Domain Type Flow                                 │
//! │                                                                         │
//! │  Product ──────► Catalog (≤ 2 variants per name)                        │
//! │     │                                                                   │
//! │     │ promotion: Option<String> ──► Promotion (by name)                 │
//! │     │                                  │                                │
//! │     ▼                                  ▼                                │
//! │  PricingEngine ──────────────► PurchaseLine (priced, split into         │
//! │                                 paid / covered / free quantities)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// Shelf category for catalog browsing and admin statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Drinks: cola, cider, juice, water.
    Beverage,
    /// Chips, cookies, candy, chocolate.
    Snack,
    /// Prepared food: kimbap, sandwiches, lunch boxes.
    Food,
    /// Ramen, cup noodles, instant rice.
    Instant,
    /// Vitamins, protein bars, chicken breast.
    Health,
    /// Household goods: tissue, soap, umbrellas.
    Daily,
    /// Everything else.
    Etc,
}

impl ProductCategory {
    /// All categories in display order.
    pub const ALL: [ProductCategory; 7] = [
        ProductCategory::Beverage,
        ProductCategory::Snack,
        ProductCategory::Food,
        ProductCategory::Instant,
        ProductCategory::Health,
        ProductCategory::Daily,
        ProductCategory::Etc,
    ];

    /// The name shown in listings and accepted in seed files.
    pub const fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Beverage => "Beverage",
            ProductCategory::Snack => "Snack",
            ProductCategory::Food => "Food",
            ProductCategory::Instant => "Instant",
            ProductCategory::Health => "Health",
            ProductCategory::Daily => "Daily",
            ProductCategory::Etc => "Etc",
        }
    }

    /// Looks a category up by its display name, case-insensitively.
    pub fn from_display_name(name: &str) -> Option<ProductCategory> {
        let trimmed = name.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(trimmed))
    }

    /// Guesses a category from keywords in a product name.
    ///
    /// Seed rows may omit the category column; this keeps listings grouped
    /// sensibly without forcing every row to carry one.
    ///
    /// ## Example
    /// ```rust
    /// use corner_core::types::ProductCategory;
    ///
    /// assert_eq!(ProductCategory::infer("zero cola"), ProductCategory::Beverage);
    /// assert_eq!(ProductCategory::infer("cup ramen"), ProductCategory::Instant);
    /// assert_eq!(ProductCategory::infer("mystery box"), ProductCategory::Etc);
    /// ```
    pub fn infer(product_name: &str) -> ProductCategory {
        let name = product_name.to_ascii_lowercase();
        let matches_any = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

        if matches_any(&["cola", "cider", "juice", "water", "ade", "tea", "coffee", "milk"]) {
            ProductCategory::Beverage
        } else if matches_any(&["chip", "cookie", "candy", "chocolate", "jelly", "cracker"]) {
            ProductCategory::Snack
        } else if matches_any(&["ramen", "noodle", "instant rice", "cup rice"]) {
            ProductCategory::Instant
        } else if matches_any(&["kimbap", "sandwich", "burger", "lunch", "salad", "sausage"]) {
            ProductCategory::Food
        } else if matches_any(&["vitamin", "protein", "energy bar", "chicken breast"]) {
            ProductCategory::Health
        } else if matches_any(&["tissue", "soap", "toothbrush", "towel", "umbrella", "battery"]) {
            ProductCategory::Daily
        } else {
            ProductCategory::Etc
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog variant of a product.
///
/// A product name maps to at most two variants: one carrying a promotion
/// and one without. Both share the name but track stock independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name shown in listings and on receipts.
    pub name: String,

    /// Unit price in whole currency units. Always positive.
    pub price: Money,

    /// Units on the shelf for THIS variant.
    pub stock: u32,

    /// Name of the promotion this variant participates in, if any.
    pub promotion: Option<String>,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Shelf category.
    pub category: ProductCategory,
}

impl Product {
    /// Whether this is the promotional variant of its name.
    #[inline]
    pub fn is_promotional(&self) -> bool {
        self.promotion.is_some()
    }

    /// Whether any units remain on the shelf.
    #[inline]
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether this variant alone can cover `quantity` units.
    #[inline]
    pub fn can_cover(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A buy-N-get-M free promotion with an inclusive active window.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use corner_core::types::Promotion;
///
/// let promo = Promotion {
///     name: "carbonated 2+1".to_string(),
///     buy: 2,
///     get: 1,
///     starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     ends_on: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
/// };
///
/// assert_eq!(promo.required_set_size(), 3);
/// assert_eq!(promo.label(), "2+1");
/// assert!(promo.is_active(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Promotion name referenced by `Product::promotion`.
    pub name: String,

    /// Units the customer must pay for per set. Always positive.
    pub buy: u32,

    /// Units granted free per completed set. Always positive.
    pub get: u32,

    /// First day the promotion applies.
    pub starts_on: NaiveDate,

    /// Last day the promotion applies (inclusive).
    pub ends_on: NaiveDate,
}

impl Promotion {
    /// Units that make up one complete promotion set (`buy + get`).
    #[inline]
    pub const fn required_set_size(&self) -> u32 {
        self.buy + self.get
    }

    /// Whether the promotion applies on `date`. Both endpoints count.
    #[inline]
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && date <= self.ends_on
    }

    /// Whether buying `quantity` units leaves the customer exactly one
    /// bonus short of a complete set.
    ///
    /// For a 2+1 promotion: 2 → true, 3 → false, 5 → true, 6 → false.
    /// The pricing engine uses this to offer "add one more, get it free".
    pub fn one_more_free(&self, quantity: u32) -> bool {
        let set_size = self.required_set_size();
        if set_size == 0 {
            return false;
        }
        quantity % set_size == self.buy
    }

    /// Short form shown in product listings, e.g. `2+1`.
    pub fn label(&self) -> String {
        format!("{}+{}", self.buy, self.get)
    }
}

// =============================================================================
// Purchase Line
// =============================================================================

/// One priced line of a purchase, after all decisions were applied.
///
/// ## Quantity Split
/// ```text
/// ┌───────────── quantity (paid) ─────────────┐  ┌─ free_quantity ─┐
/// │ promotion_quantity │ non-promotion (rest) │  │  bonus units    │
/// └────────────────────┴──────────────────────┘  └─────────────────┘
///          consumed stock = quantity + free_quantity
/// ```
/// The non-promotion part is recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// Product name this line refers to.
    pub product_name: String,

    /// Units the customer pays for.
    pub quantity: u32,

    /// Price per unit at pricing time.
    pub unit_price: Money,

    /// Paid units covered by complete promotion sets.
    pub promotion_quantity: u32,

    /// Bonus units granted on top of `quantity`.
    pub free_quantity: u32,
}

impl PurchaseLine {
    /// Amount the customer pays for this line.
    #[inline]
    pub fn total_amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Value of the bonus units (what the promotion saved).
    #[inline]
    pub fn promotion_discount(&self) -> Money {
        self.unit_price.multiply_quantity(self.free_quantity)
    }

    /// Paid units NOT covered by promotion sets. Recomputed, never stored,
    /// so it cannot drift from the split.
    #[inline]
    pub fn non_promotion_quantity(&self) -> u32 {
        self.quantity - self.promotion_quantity
    }

    /// Units the line removes from the shelf: paid plus free.
    #[inline]
    pub fn consumed_quantity(&self) -> u32 {
        self.quantity + self.free_quantity
    }

    /// Whether the promotion touched this line at all.
    #[inline]
    pub fn has_promotion_benefit(&self) -> bool {
        self.promotion_quantity > 0 || self.free_quantity > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_plus_one() -> Promotion {
        Promotion {
            name: "carbonated 2+1".to_string(),
            buy: 2,
            get: 1,
            starts_on: date(2024, 1, 1),
            ends_on: date(2024, 12, 31),
        }
    }

    #[test]
    fn test_category_display_and_parse() {
        for category in ProductCategory::ALL {
            let parsed = ProductCategory::from_display_name(category.display_name());
            assert_eq!(parsed, Some(category));
        }
        assert_eq!(
            ProductCategory::from_display_name("  beverage  "),
            Some(ProductCategory::Beverage)
        );
        assert_eq!(ProductCategory::from_display_name("frozen"), None);
    }

    #[test]
    fn test_category_inference() {
        assert_eq!(ProductCategory::infer("zero cola"), ProductCategory::Beverage);
        assert_eq!(ProductCategory::infer("Potato Chips"), ProductCategory::Snack);
        assert_eq!(ProductCategory::infer("cup ramen"), ProductCategory::Instant);
        assert_eq!(ProductCategory::infer("tuna kimbap"), ProductCategory::Food);
        assert_eq!(ProductCategory::infer("vitamin water"), ProductCategory::Beverage);
        assert_eq!(ProductCategory::infer("protein shake mix"), ProductCategory::Health);
        assert_eq!(ProductCategory::infer("travel tissue"), ProductCategory::Daily);
        assert_eq!(ProductCategory::infer("gift card"), ProductCategory::Etc);
    }

    #[test]
    fn test_promotion_window_is_inclusive() {
        let promo = two_plus_one();
        assert!(promo.is_active(date(2024, 1, 1)));
        assert!(promo.is_active(date(2024, 6, 15)));
        assert!(promo.is_active(date(2024, 12, 31)));
        assert!(!promo.is_active(date(2023, 12, 31)));
        assert!(!promo.is_active(date(2025, 1, 1)));
    }

    #[test]
    fn test_one_more_free_truth_table() {
        let promo = two_plus_one();
        assert!(!promo.one_more_free(1));
        assert!(promo.one_more_free(2));
        assert!(!promo.one_more_free(3));
        assert!(!promo.one_more_free(4));
        assert!(promo.one_more_free(5));
        assert!(!promo.one_more_free(6));

        let one_plus_one = Promotion {
            name: "md pick".to_string(),
            buy: 1,
            get: 1,
            ..two_plus_one()
        };
        assert!(one_plus_one.one_more_free(1));
        assert!(!one_plus_one.one_more_free(2));
        assert!(one_plus_one.one_more_free(3));
    }

    #[test]
    fn test_promotion_label() {
        assert_eq!(two_plus_one().label(), "2+1");
    }

    #[test]
    fn test_purchase_line_arithmetic() {
        let line = PurchaseLine {
            product_name: "cola".to_string(),
            quantity: 6,
            unit_price: Money::from_units(1_000),
            promotion_quantity: 6,
            free_quantity: 2,
        };
        assert_eq!(line.total_amount().units(), 6_000);
        assert_eq!(line.promotion_discount().units(), 2_000);
        assert_eq!(line.non_promotion_quantity(), 0);
        assert_eq!(line.consumed_quantity(), 8);
        assert!(line.has_promotion_benefit());
    }

    #[test]
    fn test_purchase_line_without_benefit() {
        let line = PurchaseLine {
            product_name: "juice".to_string(),
            quantity: 3,
            unit_price: Money::from_units(1_800),
            promotion_quantity: 0,
            free_quantity: 0,
        };
        assert_eq!(line.total_amount().units(), 5_400);
        assert_eq!(line.promotion_discount().units(), 0);
        assert_eq!(line.non_promotion_quantity(), 3);
        assert_eq!(line.consumed_quantity(), 3);
        assert!(!line.has_promotion_benefit());
    }

    #[test]
    fn test_product_stock_checks() {
        let product = Product {
            name: "cola".to_string(),
            price: Money::from_units(1_000),
            stock: 7,
            promotion: Some("carbonated 2+1".to_string()),
            description: None,
            category: ProductCategory::Beverage,
        };
        assert!(product.is_promotional());
        assert!(product.has_stock());
        assert!(product.can_cover(7));
        assert!(!product.can_cover(8));
    }
}
