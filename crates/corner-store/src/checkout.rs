//! # Checkout Sequencing
//!
//! The one place the whole pipeline runs in order:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        checkout(customer)                               │
//! │                                                                         │
//! │  cart ──► price every line          may prompt: free item? full price?  │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        membership gate              member AND opts in when asked       │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        build receipt                                                    │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        commit inventory             promotional stock first             │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        record history, clear cart                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock mutates only at the commit step, after every line priced
//! successfully. A failure anywhere leaves stock, history and the cart
//! exactly as they were.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use corner_core::history::PurchaseRecord;
use corner_core::inventory::InventoryUpdater;
use corner_core::pricing::{Decisions, PricingEngine};
use corner_core::receipt::Receipt;
use corner_core::request::PurchaseRequest;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::users::Customer;

impl Store {
    /// Prices, commits and records a purchase in one call.
    ///
    /// `date` decides which promotions are active; `now` stamps the history
    /// record. Both come from the caller so this layer stays clock-free.
    pub fn purchase(
        &mut self,
        customer: &Customer,
        requests: &[PurchaseRequest],
        date: NaiveDate,
        decisions: &mut dyn Decisions,
        now: DateTime<Utc>,
    ) -> StoreResult<PurchaseRecord> {
        let lines = PricingEngine::new(&self.catalog, &self.promotions)
            .price(requests, date, decisions)?;

        let apply_membership = customer.is_member && decisions.accept_membership_discount();
        let receipt = Receipt::new(lines, apply_membership);

        InventoryUpdater::new(&mut self.catalog).commit(&receipt.lines)?;

        let record =
            PurchaseRecord::new(customer.id.as_str(), receipt.lines.clone(), receipt, now);
        self.history.record(record.clone());
        info!(
            user = customer.id.as_str(),
            amount = %record.total_amount(),
            lines = record.lines.len(),
            "purchase complete"
        );
        Ok(record)
    }

    /// Checks the customer's cart out and clears it on success.
    pub fn checkout(
        &mut self,
        customer: &Customer,
        date: NaiveDate,
        decisions: &mut dyn Decisions,
        now: DateTime<Utc>,
    ) -> StoreResult<PurchaseRecord> {
        let requests: Vec<PurchaseRequest> = self
            .cart_view(&customer.id)
            .map(|cart| cart.requests())
            .unwrap_or_default();
        if requests.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let record = self.purchase(customer, &requests, date, decisions, now)?;
        self.cart(&customer.id).clear();
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
