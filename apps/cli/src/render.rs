//! Rendering listings, carts, receipts and admin reports to stdout.
//!
//! Layout conventions follow the store's printed receipt: names left, the
//! numbers right, amounts grouped by thousands via [`Money`]'s `Display`.

use corner_core::cart::Cart;
use corner_core::catalog::{Catalog, CategorySummary};
use corner_core::history::{PurchaseRecord, SalesSummary};
use corner_core::receipt::Receipt;
use corner_core::types::{Product, ProductCategory};
use corner_core::Money;

/// Boxed section header.
pub fn banner(title: &str) {
    println!("\n╔════════════════════════════════════╗");
    println!("║{title:^36}║");
    println!("╚════════════════════════════════════╝");
}

// =============================================================================
// Product Listing
// =============================================================================

/// The customer-facing shelf listing.
///
/// Variants print promotional-first. A name carrying ONLY a promotional
/// variant gets a synthetic sold-out regular row, so the customer can see
/// that full-price stock does not exist separately.
pub fn print_products(catalog: &Catalog) {
    for name in catalog.names() {
        let promotional = catalog.promotional_variant(name);
        let regular = catalog.regular_variant(name);

        if let Some(product) = promotional {
            print_shelf_row(product);
        }
        if let Some(product) = regular {
            print_shelf_row(product);
        } else if let Some(product) = promotional {
            println!("- {} {} Out of stock", product.name, product.price);
        }
    }
}

fn print_shelf_row(product: &Product) {
    let stock = if product.stock == 0 {
        "Out of stock".to_string()
    } else {
        format!("{} in stock", product.stock)
    };
    match &product.promotion {
        Some(promotion) => println!("- {} {} {stock} {promotion}", product.name, product.price),
        None => println!("- {} {} {stock}", product.name, product.price),
    }
}

pub fn print_welcome(store_name: &str) {
    println!("\nWelcome to {store_name}.");
    println!("These are the products we currently carry.\n");
}

// =============================================================================
// Cart
// =============================================================================

pub fn print_cart(cart: &Cart) {
    banner("Cart");
    if cart.is_empty() {
        println!("The cart is empty.");
        return;
    }
    for item in cart.items() {
        println!(
            "{} x {} = {}",
            item.product.name,
            item.quantity,
            item.total_price()
        );
    }
    println!("────────────────────────────");
    println!("{} item(s) in total", cart.total_item_count());
    println!("Subtotal: {}", cart.total_price());
}

// =============================================================================
// Receipt
// =============================================================================

pub fn print_receipt(store_name: &str, receipt: &Receipt) {
    println!("\n=========== {store_name} ===========");
    println!("{:<20}{:>5}{:>12}", "Item", "Qty", "Amount");
    for line in &receipt.lines {
        println!(
            "{:<20}{:>5}{:>12}",
            line.product_name,
            line.quantity,
            line.total_amount().to_string()
        );
    }

    let free: Vec<_> = receipt.free_items().collect();
    if !free.is_empty() {
        println!("------------- free items -------------");
        for line in free {
            println!("{:<20}{:>5}", line.product_name, line.free_quantity);
        }
    }

    println!("======================================");
    println!(
        "{:<20}{:>5}{:>12}",
        "Total",
        receipt.total_quantity(),
        receipt.total_amount().to_string()
    );
    print_discount_row("Promotion discount", receipt.promotion_discount());
    print_discount_row("Membership discount", receipt.membership_discount);
    println!(
        "{:<25}{:>12}",
        "Amount due",
        receipt.final_amount().to_string()
    );
}

fn print_discount_row(label: &str, amount: Money) {
    println!("{label:<25}{:>12}", format!("-{amount}"));
}

// =============================================================================
// Purchase History
// =============================================================================

pub fn print_histories(records: &[&PurchaseRecord]) {
    banner("Purchase history");
    for record in records {
        println!("\n[{}]", record.purchased_at.format("%Y-%m-%d %H:%M"));
        println!("Order: {}", short_id(record));
        println!("Items: {}", record.product_names().join(", "));
        println!("Quantity: {}", record.total_quantity());
        println!("Paid: {}", record.total_amount());
        println!("─────────────────────────────────────");
    }
}

pub fn print_history_detail(store_name: &str, record: &PurchaseRecord) {
    banner("Purchase detail");
    println!("Order: {}", record.id);
    println!("Purchased at: {}", record.purchased_at.format("%Y-%m-%d %H:%M:%S"));
    println!("\nItems:");
    for line in &record.lines {
        println!(
            "  - {} x {} ({})",
            line.product_name, line.quantity, line.unit_price
        );
    }
    print_receipt(store_name, &record.receipt);
}

// =============================================================================
// Admin Reports
// =============================================================================

pub fn print_admin_inventory(catalog: &Catalog, low_stock_threshold: u32) {
    banner("Inventory");
    for category in ProductCategory::ALL {
        let products = catalog.products_in_category(category);
        if products.is_empty() {
            continue;
        }
        println!("\n[{category}]");
        for product in products {
            let variant_note = product
                .promotion
                .as_deref()
                .map(|promotion| format!(" ({promotion})"))
                .unwrap_or_default();
            println!(
                "  {} - {} in stock ({}) {}{variant_note}",
                product.name,
                product.stock,
                product.price,
                stock_status(product.stock, low_stock_threshold),
            );
        }
    }
    println!();
}

pub fn print_category_statistics(summaries: &[CategorySummary]) {
    banner("Stock by category");
    for summary in summaries {
        println!(
            "{}: {} product(s), {} unit(s) in stock",
            summary.category, summary.product_count, summary.total_stock
        );
    }
    println!();
}

pub fn print_sales_summary(summary: Option<&SalesSummary>) {
    banner("Sales");
    let Some(summary) = summary else {
        println!("No sales yet.");
        return;
    };
    println!("Total sales: {}", summary.total_sales);
    println!("Orders: {}", summary.order_count);
    println!("Items sold: {}", summary.item_count);
    println!("Average order: {}", summary.average_order);

    println!("\nTop products:");
    for (rank, (name, units)) in summary.top_products.iter().enumerate() {
        println!("  {}. {name} - {units} sold", rank + 1);
    }
    println!();
}

pub fn print_low_stock(products: &[&Product]) {
    banner("Low stock");
    if products.is_empty() {
        println!("No products are running low.");
        return;
    }
    for product in products {
        let status = if product.stock == 0 {
            "sold out".to_string()
        } else {
            format!("{} left", product.stock)
        };
        println!("! {} - {status}", product.name);
    }
    println!();
}

// =============================================================================
// Helpers
// =============================================================================

fn stock_status(stock: u32, threshold: u32) -> &'static str {
    if stock == 0 {
        "SOLD OUT"
    } else if stock <= threshold {
        "LOW"
    } else {
        "OK"
    }
}

/// First 8 characters of the order id, what the history listing shows and
/// what the detail lookup matches on.
pub fn short_id(record: &PurchaseRecord) -> String {
    record.id.to_string().chars().take(8).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
