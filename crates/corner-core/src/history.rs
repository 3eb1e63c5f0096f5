//! # Purchase History
//!
//! Append-only log of completed checkouts, one list per user. Records are
//! immutable once written; every view (recent purchases, spend totals,
//! store-wide sales summary) is derived on read.
//!
//! The log never reads a clock. Timestamps arrive with the record so that
//! the caller decides what "now" means.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::money::Money;
use crate::receipt::Receipt;
use crate::types::PurchaseLine;

/// How many records a customer's recent-purchases view shows.
pub const RECENT_PURCHASE_LIMIT: usize = 10;

/// How many products the sales summary ranks.
pub const TOP_PRODUCT_LIMIT: usize = 5;

// =============================================================================
// Purchase Record
// =============================================================================

/// One completed checkout, frozen at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: Uuid,
    pub user_id: String,
    pub lines: Vec<PurchaseLine>,
    pub receipt: Receipt,
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn new(
        user_id: impl Into<String>,
        lines: Vec<PurchaseLine>,
        receipt: Receipt,
        purchased_at: DateTime<Utc>,
    ) -> PurchaseRecord {
        PurchaseRecord {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            lines,
            receipt,
            purchased_at,
        }
    }

    /// What the customer actually paid.
    pub fn total_amount(&self) -> Money {
        self.receipt.final_amount()
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn product_names(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|line| line.product_name.as_str())
            .collect()
    }

    pub fn contains_product(&self, product_name: &str) -> bool {
        self.lines
            .iter()
            .any(|line| line.product_name == product_name)
    }
}

// =============================================================================
// History Log
// =============================================================================

/// Per-user purchase log for the process lifetime.
#[derive(Debug, Default)]
pub struct PurchaseHistory {
    records: BTreeMap<String, Vec<PurchaseRecord>>,
}

impl PurchaseHistory {
    pub fn new() -> PurchaseHistory {
        PurchaseHistory::default()
    }

    pub fn record(&mut self, record: PurchaseRecord) {
        debug!(
            user = record.user_id.as_str(),
            id = %record.id,
            amount = %record.total_amount(),
            "recording purchase"
        );
        self.records
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
    }

    /// A user's records, most recent first.
    pub fn for_user(&self, user_id: &str) -> Vec<&PurchaseRecord> {
        let mut records: Vec<&PurchaseRecord> = self
            .records
            .get(user_id)
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
        records
    }

    pub fn recent(&self, user_id: &str, limit: usize) -> Vec<&PurchaseRecord> {
        let mut records = self.for_user(user_id);
        records.truncate(limit);
        records
    }

    pub fn find(&self, id: Uuid) -> Option<&PurchaseRecord> {
        self.records
            .values()
            .flatten()
            .find(|record| record.id == id)
    }

    pub fn purchase_count(&self, user_id: &str) -> usize {
        self.records.get(user_id).map_or(0, Vec::len)
    }

    pub fn total_spent(&self, user_id: &str) -> Money {
        self.records
            .get(user_id)
            .into_iter()
            .flatten()
            .map(PurchaseRecord::total_amount)
            .sum()
    }

    /// A user's records with `from ≤ purchased_at ≤ to`, most recent first.
    pub fn between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&PurchaseRecord> {
        self.for_user(user_id)
            .into_iter()
            .filter(|record| from <= record.purchased_at && record.purchased_at <= to)
            .collect()
    }

    /// Store-wide statistics across every user, or `None` before the first
    /// sale.
    pub fn sales_summary(&self) -> Option<SalesSummary> {
        let records: Vec<&PurchaseRecord> = self.records.values().flatten().collect();
        SalesSummary::compute(&records)
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// The admin's sales dashboard numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub total_sales: Money,
    pub order_count: usize,
    pub item_count: u32,
    pub average_order: Money,
    /// `(product name, units sold)` ranked by units, best seller first.
    /// Ties break alphabetically.
    pub top_products: Vec<(String, u32)>,
}

impl SalesSummary {
    fn compute(records: &[&PurchaseRecord]) -> Option<SalesSummary> {
        if records.is_empty() {
            return None;
        }
        let total_sales: Money = records.iter().map(|record| record.total_amount()).sum();
        let order_count = records.len();
        let item_count = records.iter().map(|record| record.total_quantity()).sum();

        let mut units_by_product: BTreeMap<&str, u32> = BTreeMap::new();
        for record in records {
            for line in &record.lines {
                *units_by_product.entry(line.product_name.as_str()).or_default() += line.quantity;
            }
        }
        let mut top_products: Vec<(String, u32)> = units_by_product
            .into_iter()
            .map(|(name, units)| (name.to_string(), units))
            .collect();
        top_products.sort_by(|a, b| b.1.cmp(&a.1));
        top_products.truncate(TOP_PRODUCT_LIMIT);

        Some(SalesSummary {
            total_sales,
            order_count,
            item_count,
            average_order: Money::from_units(total_sales.units() / order_count as i64),
            top_products,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(name: &str, quantity: u32, unit_price: i64) -> PurchaseLine {
        PurchaseLine {
            product_name: name.to_string(),
            quantity,
            unit_price: Money::from_units(unit_price),
            promotion_quantity: 0,
            free_quantity: 0,
        }
    }

    fn record_at(user: &str, hour: u32, lines: Vec<PurchaseLine>) -> PurchaseRecord {
        let receipt = Receipt::new(lines.clone(), false);
        PurchaseRecord::new(
            user,
            lines,
            receipt,
            Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_for_user_is_recent_first() {
        let mut history = PurchaseHistory::new();
        history.record(record_at("alice", 9, vec![line("cola", 1, 1_000)]));
        history.record(record_at("alice", 15, vec![line("chips", 1, 1_500)]));
        history.record(record_at("bob", 12, vec![line("water", 1, 500)]));

        let records = history.for_user("alice");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_names(), vec!["chips"]);
        assert_eq!(records[1].product_names(), vec!["cola"]);
    }

    #[test]
    fn test_recent_truncates() {
        let mut history = PurchaseHistory::new();
        for hour in 0..5 {
            history.record(record_at("alice", hour, vec![line("cola", 1, 1_000)]));
        }
        assert_eq!(history.recent("alice", 3).len(), 3);
        assert_eq!(history.recent("alice", RECENT_PURCHASE_LIMIT).len(), 5);
    }

    #[test]
    fn test_between_is_inclusive_on_both_ends() {
        let mut history = PurchaseHistory::new();
        for hour in [8, 10, 12, 14] {
            history.record(record_at("alice", hour, vec![line("cola", 1, 1_000)]));
        }

        let from = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let records = history.between("alice", from, to);

        assert_eq!(records.len(), 2);
        // still most recent first
        assert_eq!(records[0].purchased_at, to);
        assert_eq!(records[1].purchased_at, from);
    }

    #[test]
    fn test_find_by_id() {
        let mut history = PurchaseHistory::new();
        let record = record_at("alice", 9, vec![line("cola", 2, 1_000)]);
        let id = record.id;
        history.record(record);

        assert_eq!(history.find(id).map(|r| r.user_id.as_str()), Some("alice"));
        assert!(history.find(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_user_totals() {
        let mut history = PurchaseHistory::new();
        history.record(record_at("alice", 9, vec![line("cola", 2, 1_000)]));
        history.record(record_at("alice", 10, vec![line("chips", 1, 1_500)]));

        assert_eq!(history.purchase_count("alice"), 2);
        assert_eq!(history.total_spent("alice"), Money::from_units(3_500));
        assert_eq!(history.purchase_count("ghost"), 0);
        assert_eq!(history.total_spent("ghost"), Money::zero());
    }

    #[test]
    fn test_record_helpers() {
        let record = record_at(
            "alice",
            9,
            vec![line("cola", 2, 1_000), line("chips", 3, 1_500)],
        );
        assert_eq!(record.total_quantity(), 5);
        assert_eq!(record.total_amount(), Money::from_units(6_500));
        assert!(record.contains_product("chips"));
        assert!(!record.contains_product("water"));
    }

    #[test]
    fn test_sales_summary() {
        let mut history = PurchaseHistory::new();
        history.record(record_at("alice", 9, vec![line("cola", 3, 1_000)]));
        history.record(record_at(
            "bob",
            10,
            vec![line("cola", 1, 1_000), line("chips", 2, 1_500)],
        ));

        let summary = history.sales_summary().unwrap();
        assert_eq!(summary.total_sales, Money::from_units(7_000));
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.item_count, 6);
        assert_eq!(summary.average_order, Money::from_units(3_500));
        assert_eq!(
            summary.top_products,
            vec![("cola".to_string(), 4), ("chips".to_string(), 2)]
        );
    }

    #[test]
    fn test_sales_summary_ranks_at_most_five() {
        let mut history = PurchaseHistory::new();
        let lines = vec![
            line("a", 6, 100),
            line("b", 5, 100),
            line("c", 4, 100),
            line("d", 3, 100),
            line("e", 2, 100),
            line("f", 1, 100),
        ];
        history.record(record_at("alice", 9, lines));

        let summary = history.sales_summary().unwrap();
        assert_eq!(summary.top_products.len(), TOP_PRODUCT_LIMIT);
        assert_eq!(summary.top_products[0], ("a".to_string(), 6));
        assert_eq!(summary.top_products[4], ("e".to_string(), 2));
    }

    #[test]
    fn test_sales_summary_empty() {
        assert!(PurchaseHistory::new().sales_summary().is_none());
    }
}
