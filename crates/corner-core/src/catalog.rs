//! # Catalog Module
//!
//! In-memory product and promotion registries.
//!
//! ## Variant Buckets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Layout                                   │
//! │                                                                         │
//! │  "cola"  ──► [ Product { promotion: Some("carbonated 2+1"), stock: 7 } │
//! │              , Product { promotion: None,                  stock: 10 } ]│
//! │                                                                         │
//! │  "juice" ──► [ Product { promotion: None,                  stock: 4 } ] │
//! │                                                                         │
//! │  Rules:                                                                 │
//! │  • callers keep at most ONE promotional and ONE regular variant         │
//! │    per name; lookups are first-match by promotion flag                  │
//! │  • seed rows list the promotional variant first                         │
//! │  • stock is tracked per variant, never below zero                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-writer by design. The store owns one catalog and mutates it from
//! one thread; nothing here is `Sync`-hardened.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Product, ProductCategory, Promotion};

// =============================================================================
// Variant Kind
// =============================================================================

/// Which of a product's two possible variants an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// The variant carrying a promotion.
    Promotional,
    /// The plain variant without one.
    Regular,
}

impl VariantKind {
    /// Whether `product` is the variant this kind addresses.
    #[inline]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            VariantKind::Promotional => product.is_promotional(),
            VariantKind::Regular => !product.is_promotional(),
        }
    }

    /// The kind of an existing product.
    #[inline]
    pub fn of(product: &Product) -> VariantKind {
        if product.is_promotional() {
            VariantKind::Promotional
        } else {
            VariantKind::Regular
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Promotional => f.write_str("promotional"),
            VariantKind::Regular => f.write_str("regular"),
        }
    }
}

// =============================================================================
// Category Summary
// =============================================================================

/// Per-category counts for the admin inventory view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: ProductCategory,
    pub product_count: usize,
    pub total_stock: u32,
}

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog: name → up to two variants.
///
/// ## Example
/// ```rust
/// use corner_core::catalog::{Catalog, VariantKind};
/// use corner_core::money::Money;
/// use corner_core::types::{Product, ProductCategory};
///
/// let mut catalog = Catalog::new();
/// catalog.add_variant(Product {
///     name: "cola".to_string(),
///     price: Money::from_units(1_000),
///     stock: 10,
///     promotion: Some("carbonated 2+1".to_string()),
///     description: None,
///     category: ProductCategory::Beverage,
/// });
///
/// assert_eq!(catalog.total_stock("cola"), 10);
/// assert!(catalog.promotional_variant("cola").is_some());
/// assert!(catalog.regular_variant("cola").is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: BTreeMap<String, Vec<Product>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: BTreeMap::new(),
        }
    }

    /// Appends a variant to its name's bucket.
    ///
    /// The catalog itself does not police uniqueness; callers keep the
    /// one-promotional-one-regular shape (seed files list the promotional
    /// row first, admin paths check before adding). Lookups are first-match,
    /// so a stray duplicate is shadowed, never double-counted by them.
    pub fn add_variant(&mut self, product: Product) {
        self.products
            .entry(product.name.clone())
            .or_default()
            .push(product);
    }

    /// Whether any variant exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    /// The promotional variant of `name`, if one exists.
    pub fn promotional_variant(&self, name: &str) -> Option<&Product> {
        self.variant(name, VariantKind::Promotional)
    }

    /// The regular variant of `name`, if one exists.
    pub fn regular_variant(&self, name: &str) -> Option<&Product> {
        self.variant(name, VariantKind::Regular)
    }

    fn variant(&self, name: &str, kind: VariantKind) -> Option<&Product> {
        self.products
            .get(name)?
            .iter()
            .find(|product| kind.matches(product))
    }

    /// Combined stock across both variants. Unknown names report 0.
    pub fn total_stock(&self, name: &str) -> u32 {
        self.products
            .get(name)
            .map(|bucket| bucket.iter().map(|product| product.stock).sum())
            .unwrap_or(0)
    }

    /// Removes `amount` units from one variant's shelf.
    ///
    /// Stock never goes below zero: over-deducting is an error and leaves
    /// the variant untouched.
    pub fn deduct(&mut self, name: &str, kind: VariantKind, amount: u32) -> CoreResult<()> {
        let bucket = self
            .products
            .get_mut(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        let variant = bucket
            .iter_mut()
            .find(|product| kind.matches(product))
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        if variant.stock < amount {
            return Err(CoreError::InsufficientStock {
                product: name.to_string(),
                available: variant.stock,
                requested: amount,
            });
        }
        variant.stock -= amount;
        Ok(())
    }

    /// Updates price and stock of the regular variant under `name`.
    ///
    /// Promotional variants are managed through their promotion window and
    /// stock only; a name with no regular variant cannot be updated.
    pub fn update_product(&mut self, name: &str, price: Money, stock: u32) -> CoreResult<()> {
        let target = self
            .products
            .get_mut(name)
            .and_then(|bucket| bucket.iter_mut().find(|product| !product.is_promotional()))
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        target.price = price;
        target.stock = stock;
        Ok(())
    }

    /// Every variant, names sorted, promotional variant first within a name.
    pub fn all_products(&self) -> Vec<&Product> {
        self.products.values().flatten().collect()
    }

    /// Every distinct product name, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }

    /// Variants belonging to `category`, in listing order.
    pub fn products_in_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products
            .values()
            .flatten()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Per-category variant counts and stock totals; empty categories are
    /// skipped.
    pub fn category_summary(&self) -> Vec<CategorySummary> {
        ProductCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let members = self.products_in_category(category);
                if members.is_empty() {
                    return None;
                }
                Some(CategorySummary {
                    category,
                    product_count: members.len(),
                    total_stock: members.iter().map(|product| product.stock).sum(),
                })
            })
            .collect()
    }

    /// Variants whose shelf count is at or below `threshold`, emptiest
    /// first.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        let mut low: Vec<&Product> = self
            .products
            .values()
            .flatten()
            .filter(|product| product.stock <= threshold)
            .collect();
        low.sort_by_key(|product| product.stock);
        low
    }
}

// =============================================================================
// Promotion Catalog
// =============================================================================

/// Registry of promotions, looked up by name from `Product::promotion`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionCatalog {
    promotions: BTreeMap<String, Promotion>,
}

impl PromotionCatalog {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PromotionCatalog {
            promotions: BTreeMap::new(),
        }
    }

    /// Registers a promotion. Names are unique.
    pub fn insert(&mut self, promotion: Promotion) -> ValidationResult<()> {
        if self.promotions.contains_key(&promotion.name) {
            return Err(ValidationError::Duplicate {
                field: "promotion".to_string(),
                value: promotion.name.clone(),
            });
        }
        self.promotions.insert(promotion.name.clone(), promotion);
        Ok(())
    }

    /// Looks a promotion up by name regardless of its window.
    pub fn find(&self, name: &str) -> Option<&Promotion> {
        self.promotions.get(name)
    }

    /// Looks a promotion up by name, returning it only while active on
    /// `date` (both window endpoints count).
    pub fn active(&self, name: &str, date: NaiveDate) -> Option<&Promotion> {
        self.promotions
            .get(name)
            .filter(|promotion| promotion.is_active(date))
    }

    /// All promotions, sorted by name.
    pub fn all(&self) -> Vec<&Promotion> {
        self.promotions.values().collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
