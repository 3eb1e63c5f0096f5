//! Menu navigation and the session loops.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            run()                                        │
//! │                                                                         │
//! │  mode menu ──► customer mode ──► login / sign up / guest                │
//! │      │              │                                                   │
//! │      │              └──► action loop: browse, cart, buy now,            │
//! │      │                   checkout, history ... until Leave              │
//! │      │                                                                  │
//! │      └──────► admin mode ──► action loop: inventory, add/update         │
//! │                              product, promotion, sales, low stock       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every store error prints as `[ERROR] ...` and falls back to the menu;
//! nothing below this layer ever retries.

use std::io;

use chrono::{Local, Utc};
use tracing::info;

use corner_core::history::RECENT_PURCHASE_LIMIT;
use corner_core::types::ProductCategory;
use corner_store::users::{Admin, Customer};
use corner_store::{Store, User};

use crate::config::CliConfig;
use crate::input::{
    read_date, read_line, read_positive_int, read_price, read_purchase_items, read_yes_no,
    ConsoleDecisions,
};
use crate::render;

// =============================================================================
// Menus
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Customer,
    Admin,
    Exit,
}

impl Mode {
    const ALL: [Mode; 3] = [Mode::Customer, Mode::Admin, Mode::Exit];

    fn display_name(&self) -> &'static str {
        match self {
            Mode::Customer => "Customer mode",
            Mode::Admin => "Admin mode",
            Mode::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomerAction {
    ViewProducts,
    AddToCart,
    ViewCart,
    BuyNow,
    Checkout,
    ViewHistory,
    Leave,
}

impl CustomerAction {
    const ALL: [CustomerAction; 7] = [
        CustomerAction::ViewProducts,
        CustomerAction::AddToCart,
        CustomerAction::ViewCart,
        CustomerAction::BuyNow,
        CustomerAction::Checkout,
        CustomerAction::ViewHistory,
        CustomerAction::Leave,
    ];

    fn display_name(&self) -> &'static str {
        match self {
            CustomerAction::ViewProducts => "View products",
            CustomerAction::AddToCart => "Add to cart",
            CustomerAction::ViewCart => "View cart",
            CustomerAction::BuyNow => "Buy now",
            CustomerAction::Checkout => "Check out the cart",
            CustomerAction::ViewHistory => "Purchase history",
            CustomerAction::Leave => "Leave the store",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminAction {
    ViewInventory,
    AddProduct,
    UpdateProduct,
    AddPromotion,
    ViewSales,
    LowStock,
}

impl AdminAction {
    const ALL: [AdminAction; 6] = [
        AdminAction::ViewInventory,
        AdminAction::AddProduct,
        AdminAction::UpdateProduct,
        AdminAction::AddPromotion,
        AdminAction::ViewSales,
        AdminAction::LowStock,
    ];

    fn display_name(&self) -> &'static str {
        match self {
            AdminAction::ViewInventory => "Inventory",
            AdminAction::AddProduct => "Add product",
            AdminAction::UpdateProduct => "Update product",
            AdminAction::AddPromotion => "Add promotion",
            AdminAction::ViewSales => "Sales statistics",
            AdminAction::LowStock => "Low-stock report",
        }
    }
}

/// Picks an entry from `options` by its 1-based menu number, re-prompting
/// until the number lands on one.
fn select_from<T: Copy>(options: &[T], names: impl Fn(&T) -> &'static str) -> io::Result<T> {
    loop {
        for (index, option) in options.iter().enumerate() {
            println!("{}. {}", index + 1, names(option));
        }
        let choice = read_line("Select: ")?;
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| options.get(index).copied());
        match picked {
            Some(option) => return Ok(option),
            None => println!("[ERROR] Not a valid selection."),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// One console session over one store.
pub struct Session<'a> {
    store: &'a mut Store,
    config: &'a CliConfig,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a mut Store, config: &'a CliConfig) -> Session<'a> {
        Session { store, config }
    }

    /// The outer mode loop. Each pass authenticates someone into a [`User`]
    /// and dispatches on the role; returns when the user exits or input
    /// ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            render::banner(&self.config.store_name);
            let user = match select_from(&Mode::ALL, Mode::display_name)? {
                Mode::Customer => User::Customer(self.open_customer_session()?),
                Mode::Admin => match self.open_admin_session()? {
                    Some(admin) => User::Admin(admin),
                    None => continue,
                },
                Mode::Exit => return Ok(()),
            };
            info!(
                user = user.id(),
                name = user.display_name(),
                member = user.is_member(),
                "session opened"
            );
            match user {
                User::Customer(customer) => self.run_customer(&customer)?,
                User::Admin(admin) => self.run_admin(&admin)?,
            }
        }
    }

    // =========================================================================
    // Customer Mode
    // =========================================================================

    fn run_customer(&mut self, customer: &Customer) -> io::Result<()> {
        loop {
            render::banner("Customer menu");
            let action = select_from(&CustomerAction::ALL, CustomerAction::display_name)?;
            let outcome = match action {
                CustomerAction::ViewProducts => {
                    self.view_products();
                    Ok(())
                }
                CustomerAction::AddToCart => self.add_to_cart(customer),
                CustomerAction::ViewCart => self.view_cart(customer),
                CustomerAction::BuyNow => self.buy_now(customer),
                CustomerAction::Checkout => self.checkout(customer),
                CustomerAction::ViewHistory => self.view_history(customer),
                CustomerAction::Leave => return Ok(()),
            };
            match outcome {
                Ok(()) => {}
                Err(SessionError::Io(err)) => return Err(err),
                Err(err) => println!("[ERROR] {err}"),
            }
        }
    }

    /// Login, sign-up or guest. Invalid credentials re-show the menu.
    fn open_customer_session(&mut self) -> io::Result<Customer> {
        loop {
            println!();
            let attempt: Result<Customer, SessionError> =
                match select_from(&CustomerEntry::ALL, CustomerEntry::display_name)? {
                    CustomerEntry::Login => self.login(),
                    CustomerEntry::SignUp => self.sign_up(),
                    CustomerEntry::Guest => Ok(Customer::guest()),
                };
            match attempt {
                Ok(customer) => {
                    println!("\nHello, {}!", customer.name);
                    return Ok(customer);
                }
                Err(SessionError::Io(err)) => return Err(err),
                Err(err) => println!("[ERROR] {err}"),
            }
        }
    }

    fn login(&mut self) -> Result<Customer, SessionError> {
        let phone = read_line("Phone number (e.g. 010-1234-5678): ")?;
        let password = read_line("Password: ")?;
        Ok(self.store.login(&phone, &password)?)
    }

    fn sign_up(&mut self) -> Result<Customer, SessionError> {
        let name = read_line("Name: ")?;
        let phone = read_line("Phone number (e.g. 010-1234-5678): ")?;
        let password = read_line("Password (8+ chars, letter + digit + special): ")?;
        let confirm = read_line("Confirm password: ")?;
        let customer = self.store.sign_up(&name, &phone, &password, &confirm)?;
        println!("\n* Welcome aboard, {}. Membership is active.", customer.name);
        Ok(customer)
    }

    fn view_products(&self) {
        render::print_welcome(&self.config.store_name);
        render::print_products(self.store.catalog());
    }

    fn add_to_cart(&mut self, customer: &Customer) -> Result<(), SessionError> {
        self.view_products();
        let requests = read_purchase_items()?;
        // one rejected line leaves the cart untouched
        self.store.add_all_to_cart(&customer.id, &requests)?;
        println!("\n* Cart updated.");
        if let Some(cart) = self.store.cart_view(&customer.id) {
            render::print_cart(cart);
        }
        Ok(())
    }

    fn view_cart(&mut self, customer: &Customer) -> Result<(), SessionError> {
        let Some(cart) = self.store.cart_view(&customer.id) else {
            println!("\nThe cart is empty.");
            return Ok(());
        };
        if cart.is_empty() {
            println!("\nThe cart is empty.");
            return Ok(());
        }
        render::print_cart(cart);

        if read_yes_no("Modify the cart?")? {
            self.modify_cart(customer)?;
        }
        Ok(())
    }

    fn modify_cart(&mut self, customer: &Customer) -> Result<(), SessionError> {
        render::banner("Modify cart");
        match select_from(&CartEdit::ALL, CartEdit::display_name)? {
            CartEdit::ChangeQuantity => {
                let name = read_line("Product: ")?;
                let quantity = read_positive_int("New quantity: ", "quantity")?;
                self.store.cart(&customer.id).update_quantity(&name, quantity)?;
                println!("\n* Cart updated.");
            }
            CartEdit::RemoveItem => {
                let name = read_line("Product to remove: ")?;
                if self.store.cart(&customer.id).remove(&name) {
                    println!("\n* {name} removed.");
                } else {
                    println!("\n{name} is not in the cart.");
                }
            }
            CartEdit::Clear => {
                self.store.cart(&customer.id).clear();
                println!("\n* Cart emptied.");
            }
        }
        if let Some(cart) = self.store.cart_view(&customer.id) {
            render::print_cart(cart);
        }
        Ok(())
    }

    /// Direct purchase without touching the cart.
    fn buy_now(&mut self, customer: &Customer) -> Result<(), SessionError> {
        self.view_products();
        let requests = read_purchase_items()?;
        let record = self.store.purchase(
            customer,
            &requests,
            Local::now().date_naive(),
            &mut ConsoleDecisions,
            Utc::now(),
        )?;
        render::print_receipt(&self.config.store_name, &record.receipt);
        println!("\n* Purchase complete. Thank you!");
        Ok(())
    }

    fn checkout(&mut self, customer: &Customer) -> Result<(), SessionError> {
        let Some(cart) = self.store.cart_view(&customer.id) else {
            println!("\nThe cart is empty.");
            return Ok(());
        };
        if cart.is_empty() {
            println!("\nThe cart is empty.");
            return Ok(());
        }
        render::print_cart(cart);

        if !read_yes_no("Proceed to payment?")? {
            return Ok(());
        }
        let record = self.store.checkout(
            customer,
            Local::now().date_naive(),
            &mut ConsoleDecisions,
            Utc::now(),
        )?;
        render::print_receipt(&self.config.store_name, &record.receipt);
        println!("\n* Purchase complete. Thank you!");
        Ok(())
    }

    fn view_history(&mut self, customer: &Customer) -> Result<(), SessionError> {
        let records = self
            .store
            .history()
            .recent(&customer.id, RECENT_PURCHASE_LIMIT);
        if records.is_empty() {
            println!("\nNo purchases yet.");
            return Ok(());
        }
        render::print_histories(&records);

        if read_yes_no("View one order in detail?")? {
            let wanted = read_line("Order number: ")?;
            let found = records
                .iter()
                .find(|record| record.id.to_string().starts_with(&wanted));
            match found {
                Some(record) => render::print_history_detail(&self.config.store_name, record),
                None => println!("[ERROR] No order matches {wanted}."),
            }
        }
        Ok(())
    }

    // =========================================================================
    // Admin Mode
    // =========================================================================

    /// Admin login. A failed attempt offers a retry or falls back to the
    /// mode menu.
    fn open_admin_session(&mut self) -> io::Result<Option<Admin>> {
        loop {
            println!();
            let number = read_line("Admin number: ")?;
            let password = read_line("Password: ")?;
            match self.store.admin_login(&number, &password) {
                Ok(admin) => {
                    println!("\nHello, admin {}.", admin.number);
                    return Ok(Some(admin));
                }
                Err(err) => {
                    println!("[ERROR] {err}");
                    if !read_yes_no("Try again?")? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn run_admin(&mut self, admin: &Admin) -> io::Result<()> {
        info!(admin = admin.number.as_str(), "admin session");

        loop {
            render::banner("Admin menu");
            let action = select_from(&AdminAction::ALL, AdminAction::display_name)?;
            let outcome = match action {
                AdminAction::ViewInventory => self.view_inventory(),
                AdminAction::AddProduct => self.add_product(),
                AdminAction::UpdateProduct => self.update_product(),
                AdminAction::AddPromotion => self.add_promotion(),
                AdminAction::ViewSales => {
                    render::print_sales_summary(self.store.sales_summary().as_ref());
                    Ok(())
                }
                AdminAction::LowStock => {
                    render::print_low_stock(&self.store.low_stock(self.config.low_stock_threshold));
                    Ok(())
                }
            };
            match outcome {
                Ok(()) => {}
                Err(SessionError::Io(err)) => return Err(err),
                Err(err) => println!("[ERROR] {err}"),
            }

            if !read_yes_no("Keep managing?")? {
                return Ok(());
            }
        }
    }

    fn view_inventory(&mut self) -> Result<(), SessionError> {
        render::print_admin_inventory(self.store.catalog(), self.config.low_stock_threshold);
        if read_yes_no("Show stock totals per category?")? {
            render::print_category_statistics(&self.store.category_summary());
        }
        Ok(())
    }

    fn add_product(&mut self) -> Result<(), SessionError> {
        let name = read_line("Product name: ")?;
        let price = read_price("Price: ")?;
        let stock = read_positive_int("Quantity: ", "quantity")?;
        let description = Some(read_line("Description (optional): ")?).filter(|text| !text.is_empty());

        println!("\nPick a category:");
        let category = select_from(&ProductCategory::ALL, |c| c.display_name())?;

        self.store
            .add_product(&name, price, stock, description, Some(category))?;
        println!("\n* Product '{name}' added.");
        Ok(())
    }

    fn update_product(&mut self) -> Result<(), SessionError> {
        let name = read_line("Product to update: ")?;
        let price = read_price("New price: ")?;
        let stock = read_positive_int("New quantity: ", "quantity")?;
        self.store.update_product(&name, price, stock)?;
        println!("\n* Product '{name}' updated.");
        Ok(())
    }

    fn add_promotion(&mut self) -> Result<(), SessionError> {
        let name = read_line("Promotion name: ")?;
        let buy = read_positive_int("Buy count: ", "buy count")?;
        let get = read_positive_int("Get count: ", "get count")?;
        let starts_on = read_date("Start date (YYYY-MM-DD): ")?;
        let ends_on = read_date("End date (YYYY-MM-DD): ")?;

        self.store.add_promotion(corner_core::types::Promotion {
            name: name.clone(),
            buy,
            get,
            starts_on,
            ends_on,
        })?;
        println!("\n* Promotion '{name}' added.");
        Ok(())
    }
}

// =============================================================================
// Entry Menus and Session Errors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomerEntry {
    Login,
    SignUp,
    Guest,
}

impl CustomerEntry {
    const ALL: [CustomerEntry; 3] = [
        CustomerEntry::Login,
        CustomerEntry::SignUp,
        CustomerEntry::Guest,
    ];

    fn display_name(&self) -> &'static str {
        match self {
            CustomerEntry::Login => "Member login",
            CustomerEntry::SignUp => "Sign up",
            CustomerEntry::Guest => "Continue as guest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartEdit {
    ChangeQuantity,
    RemoveItem,
    Clear,
}

impl CartEdit {
    const ALL: [CartEdit; 3] = [CartEdit::ChangeQuantity, CartEdit::RemoveItem, CartEdit::Clear];

    fn display_name(&self) -> &'static str {
        match self {
            CartEdit::ChangeQuantity => "Change a quantity",
            CartEdit::RemoveItem => "Remove an item",
            CartEdit::Clear => "Empty the cart",
        }
    }
}

/// What an action can fail with: store errors get printed and the menu
/// continues; I/O errors bubble up and end the session.
#[derive(Debug)]
enum SessionError {
    Store(corner_store::StoreError),
    Io(io::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Store(err) => err.fmt(f),
            SessionError::Io(err) => err.fmt(f),
        }
    }
}

impl From<corner_store::StoreError> for SessionError {
    fn from(err: corner_store::StoreError) -> Self {
        SessionError::Store(err)
    }
}

impl From<corner_core::CoreError> for SessionError {
    fn from(err: corner_core::CoreError) -> Self {
        SessionError::Store(err.into())
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Io(err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_orders_are_stable() {
        // menu numbers are part of the UI contract; a reorder would break
        // every muscle-memory user
        assert_eq!(CustomerAction::ALL[0], CustomerAction::ViewProducts);
        assert_eq!(CustomerAction::ALL[6], CustomerAction::Leave);
        assert_eq!(AdminAction::ALL[0], AdminAction::ViewInventory);
        assert_eq!(Mode::ALL[2], Mode::Exit);
    }

    #[test]
    fn test_display_names_are_unique_per_menu() {
        let mut names: Vec<_> = CustomerAction::ALL
            .iter()
            .map(CustomerAction::display_name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CustomerAction::ALL.len());
    }
}
