//! # Store Facade
//!
//! One value owning all mutable store state: catalog, promotions, customer
//! accounts, per-customer carts, and the purchase log. Everything the
//! console does goes through here, which is what makes the single-writer
//! assumption real.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Store                                        │
//! │                                                                         │
//! │   catalog      promotions      users        carts        history        │
//! │   variants     definitions     directory    per user     per user       │
//! │      ▲             ▲              ▲            ▲            ▲           │
//! │      │             │              │            │            │           │
//! │   admin ops     admin ops     sign_up/login  add/view   checkout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use corner_core::cart::Cart;
use corner_core::catalog::{Catalog, CategorySummary, PromotionCatalog};
use corner_core::error::{CoreError, ValidationError};
use corner_core::history::{PurchaseHistory, SalesSummary};
use corner_core::money::Money;
use corner_core::request::{validate_product_name, validate_promotion_values};
use corner_core::types::{Product, ProductCategory, Promotion};

use corner_core::request::PurchaseRequest;

use crate::error::StoreResult;
use crate::users::{Admin, Customer, UserDirectory};

/// The whole store.
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) catalog: Catalog,
    pub(crate) promotions: PromotionCatalog,
    pub(crate) history: PurchaseHistory,
    users: UserDirectory,
    carts: BTreeMap<String, Cart>,
}

impl Store {
    pub fn new(catalog: Catalog, promotions: PromotionCatalog) -> Store {
        Store {
            catalog,
            promotions,
            history: PurchaseHistory::new(),
            users: UserDirectory::new(),
            carts: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Catalog Queries
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn promotions(&self) -> &PromotionCatalog {
        &self.promotions
    }

    pub fn all_products(&self) -> Vec<&Product> {
        self.catalog.all_products()
    }

    pub fn category_summary(&self) -> Vec<CategorySummary> {
        self.catalog.category_summary()
    }

    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.catalog.low_stock(threshold)
    }

    /// The variant a cart snapshot should use: promotional when one exists,
    /// regular otherwise.
    pub fn product_for_cart(&self, name: &str) -> StoreResult<Product> {
        self.catalog
            .promotional_variant(name)
            .or_else(|| self.catalog.regular_variant(name))
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()).into())
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// Adds a brand-new regular product.
    ///
    /// Promotional variants only enter through seed files; the admin form
    /// creates regular shelf stock. A second regular variant under one name
    /// would corrupt lookups, so that is rejected here rather than left to
    /// the catalog's blind append.
    pub fn add_product(
        &mut self,
        name: &str,
        price: Money,
        stock: u32,
        description: Option<String>,
        category: Option<ProductCategory>,
    ) -> StoreResult<()> {
        validate_product_name(name)?;
        if self.catalog.regular_variant(name).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product".to_string(),
                value: name.to_string(),
            }
            .into());
        }
        let category = category.unwrap_or_else(|| ProductCategory::infer(name));
        debug!(product = name, %price, stock, "adding product");
        self.catalog.add_variant(Product {
            name: name.to_string(),
            price,
            stock,
            promotion: None,
            description,
            category,
        });
        Ok(())
    }

    /// Repriced/restocked by the admin form. Targets the regular variant.
    pub fn update_product(&mut self, name: &str, price: Money, stock: u32) -> StoreResult<()> {
        self.catalog.update_product(name, price, stock)?;
        debug!(product = name, %price, stock, "product updated");
        Ok(())
    }

    pub fn add_promotion(&mut self, promotion: Promotion) -> StoreResult<()> {
        validate_promotion_values(promotion.buy, promotion.get)?;
        debug!(promotion = promotion.name.as_str(), "adding promotion");
        self.promotions.insert(promotion)?;
        Ok(())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub fn sign_up(
        &mut self,
        name: &str,
        phone_number: &str,
        password: &str,
        confirm: &str,
    ) -> StoreResult<Customer> {
        self.users.sign_up(name, phone_number, password, confirm)
    }

    pub fn login(&self, phone_number: &str, password: &str) -> StoreResult<Customer> {
        self.users.login(phone_number, password)
    }

    pub fn register_admin(&mut self, number: &str, password: &str) -> StoreResult<Admin> {
        self.users.register_admin(number, password)
    }

    pub fn admin_login(&self, number: &str, password: &str) -> StoreResult<Admin> {
        self.users.admin_login(number, password)
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// The user's cart, created on first touch.
    pub fn cart(&mut self, user_id: &str) -> &mut Cart {
        self.carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id))
    }

    pub fn cart_view(&self, user_id: &str) -> Option<&Cart> {
        self.carts.get(user_id)
    }

    /// Resolves the product and drops it in the user's cart.
    pub fn add_to_cart(&mut self, user_id: &str, name: &str, quantity: u32) -> StoreResult<()> {
        let product = self.product_for_cart(name)?;
        self.cart(user_id).add(product, quantity)?;
        Ok(())
    }

    /// Adds every request to the cart, or none of them: all names resolve
    /// before the cart is touched, so one unknown product leaves the cart
    /// exactly as it was.
    pub fn add_all_to_cart(
        &mut self,
        user_id: &str,
        requests: &[PurchaseRequest],
    ) -> StoreResult<()> {
        let products = requests
            .iter()
            .map(|request| self.product_for_cart(&request.name))
            .collect::<StoreResult<Vec<_>>>()?;
        let cart = self.cart(user_id);
        for (product, request) in products.into_iter().zip(requests) {
            cart.add(product, request.quantity)?;
        }
        Ok(())
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn history(&self) -> &PurchaseHistory {
        &self.history
    }

    pub fn sales_summary(&self) -> Option<SalesSummary> {
        self.history.sales_summary()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use corner_core::error::CoreError;

    fn seeded_store() -> Store {
        let mut catalog = Catalog::new();
        catalog.add_variant(Product {
            name: "cola".to_string(),
            price: Money::from_units(1_000),
            stock: 10,
            promotion: Some("carbonated 2+1".to_string()),
            description: None,
            category: ProductCategory::Beverage,
        });
        catalog.add_variant(Product {
            name: "cola".to_string(),
            price: Money::from_units(1_000),
            stock: 10,
            promotion: None,
            description: None,
            category: ProductCategory::Beverage,
        });
        catalog.add_variant(Product {
            name: "chips".to_string(),
            price: Money::from_units(1_700),
            stock: 4,
            promotion: None,
            description: None,
            category: ProductCategory::Snack,
        });

        let mut promotions = PromotionCatalog::new();
        promotions
            .insert(Promotion {
                name: "carbonated 2+1".to_string(),
                buy: 2,
                get: 1,
                starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                ends_on: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            })
            .unwrap();

        Store::new(catalog, promotions)
    }

    #[test]
    fn test_add_product_rejects_existing_regular() {
        let mut store = seeded_store();
        let err = store
            .add_product("cola", Money::from_units(1_200), 5, None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Core(CoreError::Validation(ValidationError::Duplicate {
                ..
            }))
        ));
    }

    #[test]
    fn test_add_product_infers_category() {
        let mut store = seeded_store();
        store
            .add_product("green tea", Money::from_units(1_500), 8, None, None)
            .unwrap();
        let added = store.catalog().regular_variant("green tea").unwrap();
        assert_eq!(added.category, ProductCategory::Beverage);
        assert!(added.promotion.is_none());
    }

    #[test]
    fn test_update_product_unknown_name() {
        let mut store = seeded_store();
        let err = store
            .update_product("ghost", Money::from_units(1_000), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Core(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_update_product_changes_regular_variant() {
        let mut store = seeded_store();
        store
            .update_product("cola", Money::from_units(1_100), 20)
            .unwrap();
        let regular = store.catalog().regular_variant("cola").unwrap();
        assert_eq!(regular.price, Money::from_units(1_100));
        assert_eq!(regular.stock, 20);
        // the promotional variant is untouched
        assert_eq!(
            store.catalog().promotional_variant("cola").unwrap().price,
            Money::from_units(1_000)
        );
    }

    #[test]
    fn test_add_promotion_validates_counts() {
        let mut store = seeded_store();
        let err = store
            .add_promotion(Promotion {
                name: "broken".to_string(),
                buy: 0,
                get: 1,
                starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                ends_on: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Core(CoreError::Validation(
                ValidationError::MustBePositive { .. }
            ))
        ));
    }

    #[test]
    fn test_product_for_cart_prefers_promotional() {
        let store = seeded_store();
        let cola = store.product_for_cart("cola").unwrap();
        assert!(cola.is_promotional());

        let chips = store.product_for_cart("chips").unwrap();
        assert!(!chips.is_promotional());

        assert!(store.product_for_cart("ghost").is_err());
    }

    #[test]
    fn test_carts_are_per_user() {
        let mut store = seeded_store();
        store.add_to_cart("alice", "cola", 2).unwrap();
        store.add_to_cart("bob", "chips", 1).unwrap();

        assert_eq!(store.cart_view("alice").unwrap().total_item_count(), 2);
        assert_eq!(store.cart_view("bob").unwrap().total_item_count(), 1);
        assert!(store.cart_view("carol").is_none());
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let mut store = seeded_store();
        assert!(store.add_to_cart("alice", "ghost", 1).is_err());
        assert!(store.cart_view("alice").is_none());
    }

    #[test]
    fn test_add_all_to_cart_is_all_or_nothing() {
        let mut store = seeded_store();
        let requests = vec![
            PurchaseRequest {
                name: "cola".to_string(),
                quantity: 2,
            },
            PurchaseRequest {
                name: "ghost".to_string(),
                quantity: 1,
            },
        ];
        assert!(store.add_all_to_cart("alice", &requests).is_err());
        // the valid first line was not applied
        assert!(store.cart_view("alice").is_none());

        let requests = vec![
            PurchaseRequest {
                name: "cola".to_string(),
                quantity: 2,
            },
            PurchaseRequest {
                name: "chips".to_string(),
                quantity: 1,
            },
        ];
        store.add_all_to_cart("alice", &requests).unwrap();
        assert_eq!(store.cart_view("alice").unwrap().total_item_count(), 3);
    }

    #[test]
    fn test_low_stock_delegation() {
        let store = seeded_store();
        let low = store.low_stock(5);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "chips");
    }

    #[test]
    fn test_account_flow() {
        let mut store = seeded_store();
        store
            .sign_up("alice", "010-1234-5678", "secret1!x", "secret1!x")
            .unwrap();
        let customer = store.login("010-1234-5678", "secret1!x").unwrap();
        assert!(customer.is_member);
        assert_eq!(store.users().customer_count(), 1);
    }

    #[test]
    fn test_admin_account_flow() {
        let mut store = seeded_store();
        store.register_admin("1001", "adminpass1!").unwrap();
        let admin = store.admin_login("1001", "adminpass1!").unwrap();
        assert_eq!(admin.number, "1001");
        assert!(store.admin_login("1001", "nope1!aaa").is_err());
    }
}
