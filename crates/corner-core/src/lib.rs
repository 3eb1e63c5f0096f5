//! # corner-core: Pure Checkout Logic for Corner Store
//!
//! This crate is the **heart** of Corner Store. It contains the whole
//! pricing pipeline as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Corner Store Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Console (apps/cli)                          │   │
//! │  │    menus ──► prompts ──► rendered tables and receipts           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  corner-store (State Layer)                     │   │
//! │  │    seed loading, user accounts, carts, checkout sequencing      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ corner-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  catalog  │  │  pricing  │  │ inventory │  │  receipt  │   │   │
//! │  │   │ variants  │  │ promo math│  │  commit   │  │  totals   │   │   │
//! │  │   │ lookups   │  │ decisions │  │ promo 1st │  │membership │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO CONSOLE • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Promotion, PurchaseLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`catalog`] - Product variants and promotion definitions
//! - [`pricing`] - The promotion-aware pricing engine and its decision hooks
//! - [`inventory`] - Plan-then-apply stock deduction
//! - [`receipt`] - Receipt assembly and derived totals
//! - [`membership`] - Membership discount rule
//! - [`cart`] - Per-customer shopping cart
//! - [`history`] - Append-only purchase log and sales summary
//! - [`request`] - Purchase grammar and console input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Console, file system and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole currency units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Caller Decides**: Interactive choices enter through the [`pricing::Decisions`]
//!    trait, so tests script them and the console asks a human
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use corner_core::catalog::{Catalog, PromotionCatalog};
//! use corner_core::money::Money;
//! use corner_core::pricing::{PricingEngine, ScriptedDecisions};
//! use corner_core::request::PurchaseRequest;
//! use corner_core::types::{Product, ProductCategory, Promotion};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_variant(Product {
//!     name: "cola".to_string(),
//!     price: Money::from_units(1_000),
//!     stock: 10,
//!     promotion: Some("carbonated 2+1".to_string()),
//!     description: None,
//!     category: ProductCategory::Beverage,
//! });
//!
//! let mut promotions = PromotionCatalog::new();
//! promotions
//!     .insert(Promotion {
//!         name: "carbonated 2+1".to_string(),
//!         buy: 2,
//!         get: 1,
//!         starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         ends_on: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//!     })
//!     .unwrap();
//!
//! // Three units of a 2+1: one full set, one unit of it free.
//! let engine = PricingEngine::new(&catalog, &promotions);
//! let lines = engine
//!     .price(
//!         &[PurchaseRequest { name: "cola".to_string(), quantity: 3 }],
//!         NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!         &mut ScriptedDecisions::accept_all(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(lines[0].quantity, 3);
//! assert_eq!(lines[0].promotion_quantity, 3);
//! assert_eq!(lines[0].free_quantity, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod history;
pub mod inventory;
pub mod membership;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod request;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use corner_core::Money` instead of
// `use corner_core::money::Money`

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CategorySummary, PromotionCatalog, VariantKind};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use history::{PurchaseHistory, PurchaseRecord, SalesSummary};
pub use inventory::{DeductionStep, InventoryUpdater};
pub use money::Money;
pub use pricing::{Decisions, PricingEngine, ScriptedDecisions};
pub use receipt::Receipt;
pub use request::PurchaseRequest;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default stock level at or below which a product shows in the admin
/// low-stock report.
///
/// ## Why a constant?
/// The report threshold is a store policy, not data. The console layer can
/// override it per invocation; this is the value used when nobody asks for
/// anything else.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;
