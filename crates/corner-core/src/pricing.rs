//! # Pricing Engine
//!
//! The core of the checkout pipeline: turns `(name, quantity)` requests into
//! priced purchase lines, applying promotion benefits and the two in-flight
//! customer decisions.
//!
//! ## Pipeline Per Line
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     price_line(name, qty, date)                         │
//! │                                                                         │
//! │  resolve variants ──► ProductNotFound if neither exists                 │
//! │        │                                                                │
//! │  qty ≥ 1? ──► InvalidQuantity                                           │
//! │        │                                                                │
//! │  qty ≤ total stock? ──► InsufficientStock                               │
//! │        │                                                                │
//! │  promo variant with stock and an active window?                         │
//! │        │ no ──► full-price line (covered 0, free 0)                     │
//! │        ▼ yes                                                            │
//! │  upsell? (one unit short of a set, stock headroom)                      │
//! │        │ ask: offer_free_item ── accept ──► qty += get                  │
//! │        ▼                                                                │
//! │  benefit split: sets = min(qty, promoStock) / (buy+get)                 │
//! │        ▼                                                                │
//! │  uncovered units? verify regular stock, ask: confirm_full_price         │
//! │        │ decline ──► truncate qty to the covered portion                │
//! │        ▼                                                                │
//! │  PurchaseLine { qty, promo variant price, covered, free }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing NEVER mutates the catalog. Deduction happens later, in one
//! atomic commit, after every line of the purchase priced successfully.

use chrono::NaiveDate;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

use crate::catalog::{Catalog, PromotionCatalog};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::request::PurchaseRequest;
use crate::types::{Product, Promotion, PurchaseLine};

// =============================================================================
// Decision Callbacks
// =============================================================================

/// The caller-supplied yes/no decisions a checkout can ask for.
///
/// The console adapter asks a human; automated callers answer from a
/// script. Prompting ORDER is part of the contract: for each line, the
/// free-item offer comes before the full-price confirmation, and every
/// line finishes its prompts before the next line starts.
pub trait Decisions {
    /// "Add one more unit of `product` free of charge?"
    fn offer_free_item(&mut self, product: &str) -> bool;

    /// "`uncovered` units of `product` fall outside the promotion. Buy them
    /// at full price?"
    fn confirm_full_price(&mut self, product: &str, uncovered: u32) -> bool;

    /// "Apply the membership discount?" Asked once per checkout, only for
    /// members.
    fn accept_membership_discount(&mut self) -> bool;
}

/// Pre-recorded answers for automated checkouts.
///
/// Answers are consumed front to back across ALL prompts in order; when the
/// script runs out, the fallback answer is used.
///
/// ## Example
/// ```rust
/// use corner_core::pricing::{Decisions, ScriptedDecisions};
///
/// let mut script = ScriptedDecisions::new([true, false]);
/// assert!(script.offer_free_item("cola"));
/// assert!(!script.confirm_full_price("cola", 1));
/// assert!(!script.accept_membership_discount()); // script empty → fallback
/// ```
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<bool>,
    fallback: bool,
}

impl ScriptedDecisions {
    /// Answers prompts from `answers` in order, then declines.
    pub fn new<I: IntoIterator<Item = bool>>(answers: I) -> Self {
        ScriptedDecisions {
            answers: answers.into_iter().collect(),
            fallback: false,
        }
    }

    /// Says yes to everything.
    pub fn accept_all() -> Self {
        ScriptedDecisions {
            answers: VecDeque::new(),
            fallback: true,
        }
    }

    /// Says no to everything.
    pub fn decline_all() -> Self {
        ScriptedDecisions {
            answers: VecDeque::new(),
            fallback: false,
        }
    }

    fn next_answer(&mut self) -> bool {
        self.answers.pop_front().unwrap_or(self.fallback)
    }
}

impl Decisions for ScriptedDecisions {
    fn offer_free_item(&mut self, _product: &str) -> bool {
        self.next_answer()
    }

    fn confirm_full_price(&mut self, _product: &str, _uncovered: u32) -> bool {
        self.next_answer()
    }

    fn accept_membership_discount(&mut self) -> bool {
        self.next_answer()
    }
}

// =============================================================================
// Promotion Benefit Split
// =============================================================================

/// Outcome of splitting a quantity against a promotion's set size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionBenefit {
    /// Units covered by complete promotion sets.
    pub promotion_quantity: u32,
    /// Bonus units granted on top, one `get` per complete set.
    pub free_quantity: u32,
    /// Units left outside any set, payable at full price.
    pub non_promotion_quantity: u32,
}

impl PromotionBenefit {
    /// Splits `quantity` into covered / free / uncovered parts.
    ///
    /// Complete sets are limited by BOTH the quantity and the promotion
    /// stock: `sets = min(quantity, promotion_stock) / (buy + get)`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use corner_core::pricing::PromotionBenefit;
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
    /// let benefit = PromotionBenefit::calculate(7, &promo, 10);
    /// assert_eq!(benefit.promotion_quantity, 6);
    /// assert_eq!(benefit.free_quantity, 2);
    /// assert_eq!(benefit.non_promotion_quantity, 1);
    /// ```
    pub fn calculate(quantity: u32, promotion: &Promotion, promotion_stock: u32) -> Self {
        let set_size = promotion.required_set_size();
        if set_size == 0 {
            return PromotionBenefit {
                promotion_quantity: 0,
                free_quantity: 0,
                non_promotion_quantity: quantity,
            };
        }
        let max_sets = quantity.min(promotion_stock) / set_size;
        let promotion_quantity = max_sets * set_size;
        PromotionBenefit {
            promotion_quantity,
            free_quantity: max_sets * promotion.get,
            non_promotion_quantity: quantity - promotion_quantity,
        }
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Prices purchase requests against the catalog and promotion registry.
///
/// Borrows both immutably: pricing is read-only by construction.
pub struct PricingEngine<'a> {
    catalog: &'a Catalog,
    promotions: &'a PromotionCatalog,
}

impl<'a> PricingEngine<'a> {
    pub fn new(catalog: &'a Catalog, promotions: &'a PromotionCatalog) -> Self {
        PricingEngine {
            catalog,
            promotions,
        }
    }

    /// Prices every request, each line fully (prompts included) before the
    /// next. The first failing line fails the whole batch; nothing has been
    /// deducted at that point.
    ///
    /// Duplicate names share the shelf: later lines only see the stock
    /// earlier lines of this purchase left unconsumed, so a jointly
    /// impossible purchase fails here, not at commit.
    pub fn price(
        &self,
        requests: &[PurchaseRequest],
        date: NaiveDate,
        decisions: &mut dyn Decisions,
    ) -> CoreResult<Vec<PurchaseLine>> {
        let mut reserved: BTreeMap<&str, u32> = BTreeMap::new();
        let mut lines = Vec::with_capacity(requests.len());
        for request in requests {
            let name = request.name.as_str();
            let already = reserved.get(name).copied().unwrap_or(0);
            if already > 0 {
                let available = self.catalog.total_stock(name).saturating_sub(already);
                if request.quantity > available {
                    return Err(CoreError::InsufficientStock {
                        product: name.to_string(),
                        available,
                        requested: request.quantity,
                    });
                }
            }
            let line = self.price_line(request, date, decisions)?;
            *reserved.entry(name).or_default() += line.consumed_quantity();
            lines.push(line);
        }
        Ok(lines)
    }

    /// Prices one request into one line. See the module diagram for the
    /// exact step order.
    pub fn price_line(
        &self,
        request: &PurchaseRequest,
        date: NaiveDate,
        decisions: &mut dyn Decisions,
    ) -> CoreResult<PurchaseLine> {
        let name = request.name.as_str();
        let promotional = self.catalog.promotional_variant(name);
        let regular = self.catalog.regular_variant(name);

        if promotional.is_none() && regular.is_none() {
            return Err(CoreError::ProductNotFound(name.to_string()));
        }
        if request.quantity == 0 {
            return Err(CoreError::InvalidQuantity {
                product: name.to_string(),
            });
        }

        let available = self.catalog.total_stock(name);
        if request.quantity > available {
            return Err(CoreError::InsufficientStock {
                product: name.to_string(),
                available,
                requested: request.quantity,
            });
        }

        let promo_path = promotional
            .filter(|variant| variant.stock > 0)
            .and_then(|variant| {
                let promotion_name = variant.promotion.as_deref()?;
                let promotion = self.promotions.active(promotion_name, date)?;
                Some((variant, promotion))
            })
            .filter(|(_, promotion)| promotion.required_set_size() > 0);

        match promo_path {
            Some((promo_variant, promotion)) => self.price_with_promotion(
                name,
                request.quantity,
                promo_variant,
                regular,
                promotion,
                decisions,
            ),
            None => {
                debug!(product = name, "no usable promotion, pricing at full price");
                let source = regular.or(promotional);
                let unit_price = source.map(|variant| variant.price).unwrap_or_default();
                Ok(full_price_line(name, request.quantity, unit_price))
            }
        }
    }

    fn price_with_promotion(
        &self,
        name: &str,
        requested: u32,
        promo_variant: &Product,
        regular: Option<&Product>,
        promotion: &Promotion,
        decisions: &mut dyn Decisions,
    ) -> CoreResult<PurchaseLine> {
        let unit_price = promo_variant.price;
        let promotion_stock = promo_variant.stock;
        let regular_stock = regular.map(|variant| variant.stock).unwrap_or(0);
        let mut effective_quantity = requested;

        // One unit short of completing another set, with stock to grant it?
        if promotion.one_more_free(effective_quantity)
            && promotion_stock >= effective_quantity + promotion.get
        {
            debug!(product = name, get = promotion.get, "offering free top-up");
            if decisions.offer_free_item(name) {
                effective_quantity += promotion.get;
            }
        }

        let benefit = PromotionBenefit::calculate(effective_quantity, promotion, promotion_stock);

        if benefit.non_promotion_quantity > 0 {
            if regular_stock < benefit.non_promotion_quantity {
                return Err(CoreError::InsufficientStock {
                    product: name.to_string(),
                    available: regular_stock,
                    requested: benefit.non_promotion_quantity,
                });
            }
            if !decisions.confirm_full_price(name, benefit.non_promotion_quantity) {
                debug!(
                    product = name,
                    dropped = benefit.non_promotion_quantity,
                    "full price declined, truncating to covered units"
                );
                return Ok(PurchaseLine {
                    product_name: name.to_string(),
                    quantity: benefit.promotion_quantity,
                    unit_price,
                    promotion_quantity: benefit.promotion_quantity,
                    free_quantity: benefit.free_quantity,
                });
            }
        }

        Ok(PurchaseLine {
            product_name: name.to_string(),
            quantity: effective_quantity,
            unit_price,
            promotion_quantity: benefit.promotion_quantity,
            free_quantity: benefit.free_quantity,
        })
    }
}

fn full_price_line(name: &str, quantity: u32, unit_price: Money) -> PurchaseLine {
    PurchaseLine {
        product_name: name.to_string(),
        quantity,
        unit_price,
        promotion_quantity: 0,
        free_quantity: 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
