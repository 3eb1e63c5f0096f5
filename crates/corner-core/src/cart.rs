//! # Shopping Cart
//!
//! One cart per signed-in customer. Items hold a product snapshot taken at
//! add time, so a later price change does not silently reprice the cart.
//! Quantities never sit at zero: adding merges, and an update that would
//! empty an item is rejected instead of clamped — removal is its own
//! explicit operation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::request::PurchaseRequest;
use crate::types::Product;

// =============================================================================
// Cart Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn total_price(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Items are kept in the order first added, which is also checkout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Cart {
        Cart {
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    /// Adds `quantity` units, merging into an existing item of the same
    /// product name.
    pub fn add(&mut self, product: Product, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity {
                product: product.name,
            });
        }
        match self.item_mut(&product.name) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem { product, quantity }),
        }
        Ok(())
    }

    /// Sets an item to an exact quantity. Zero is rejected; dropping an item
    /// goes through [`Cart::remove`].
    pub fn update_quantity(&mut self, product_name: &str, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity {
                product: product_name.to_string(),
            });
        }
        let item = self
            .item_mut(product_name)
            .ok_or_else(|| CoreError::ProductNotFound(product_name.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Returns whether an item was actually removed.
    pub fn remove(&mut self, product_name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.name != product_name);
        self.items.len() < before
    }

    pub fn item(&self, product_name: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.name == product_name)
    }

    fn item_mut(&mut self, product_name: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.name == product_name)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total_item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of snapshot prices. Checkout recomputes against live catalog
    /// prices; this is for showing the cart.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::total_price).sum()
    }

    /// The cart as purchase requests, in item order, ready for pricing.
    pub fn requests(&self) -> Vec<PurchaseRequest> {
        self.items
            .iter()
            .map(|item| PurchaseRequest {
                name: item.product.name.clone(),
                quantity: item.quantity,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductCategory;

    fn product(name: &str, price: i64) -> Product {
        Product {
            name: name.to_string(),
            price: Money::from_units(price),
            stock: 10,
            promotion: None,
            description: None,
            category: ProductCategory::infer(name),
        }
    }

    fn cart_with(names: &[(&str, u32)]) -> Cart {
        let mut cart = Cart::new("010-1234-5678");
        for (name, quantity) in names {
            cart.add(product(name, 1_000), *quantity).unwrap();
        }
        cart
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = cart_with(&[("cola", 2)]);
        cart.add(product("cola", 1_000), 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item("cola").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_zero_rejected() {
        let mut cart = Cart::new("u");
        let err = cart.add(product("cola", 1_000), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let cart = cart_with(&[("water", 1), ("cola", 2), ("chips", 3)]);
        let order: Vec<_> = cart
            .items()
            .iter()
            .map(|item| item.product.name.as_str())
            .collect();
        assert_eq!(order, vec!["water", "cola", "chips"]);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = cart_with(&[("cola", 2)]);
        cart.update_quantity("cola", 7).unwrap();
        assert_eq!(cart.item("cola").unwrap().quantity, 7);
    }

    #[test]
    fn test_update_to_zero_is_an_error_not_a_removal() {
        let mut cart = cart_with(&[("cola", 2)]);
        let err = cart.update_quantity("cola", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        assert_eq!(cart.item("cola").unwrap().quantity, 2);
    }

    #[test]
    fn test_update_missing_item() {
        let mut cart = Cart::new("u");
        let err = cart.update_quantity("cola", 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_remove_reports_whether_found() {
        let mut cart = cart_with(&[("cola", 2)]);
        assert!(cart.remove("cola"));
        assert!(!cart.remove("cola"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_use_snapshot_prices() {
        let mut cart = Cart::new("u");
        cart.add(product("cola", 1_000), 2).unwrap();
        cart.add(product("chips", 1_500), 1).unwrap();

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Money::from_units(3_500));
    }

    #[test]
    fn test_requests_mirror_items() {
        let cart = cart_with(&[("cola", 2), ("chips", 1)]);
        let requests = cart.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "cola");
        assert_eq!(requests[0].quantity, 2);
        assert_eq!(requests[1].name, "chips");
        assert_eq!(requests[1].quantity, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = cart_with(&[("cola", 2), ("chips", 1)]);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }
}
