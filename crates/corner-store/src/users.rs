//! # User Accounts
//!
//! Customers and admins as a tagged union, plus the in-memory directory
//! customers sign up against. Matching on [`User`] is exhaustive at the
//! console boundary, so a new role cannot be half-wired.
//!
//! Passwords are stored and compared in plain text. The store is a
//! single-process simulation and its accounts are throwaway; treating them
//! as real credentials would only pretend otherwise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use corner_core::error::{ValidationError, ValidationResult};

use crate::error::{StoreError, StoreResult};

/// Minimum sign-up password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// User Types
// =============================================================================

/// A customer account, or a guest session without one.
///
/// Guests have no phone number, no password and no membership, so the
/// membership discount never applies to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone_number: Option<String>,
    password: Option<String>,
    pub is_member: bool,
}

impl Customer {
    /// A signed-up member. Validation happens in
    /// [`UserDirectory::sign_up`]; this is only the factory.
    fn member(name: &str, phone_number: &str, password: &str) -> Customer {
        Customer {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            phone_number: Some(phone_number.to_string()),
            password: Some(password.to_string()),
            is_member: true,
        }
    }

    /// A one-off guest session.
    pub fn guest() -> Customer {
        Customer {
            id: Uuid::new_v4().to_string(),
            name: "guest".to_string(),
            phone_number: None,
            password: None,
            is_member: false,
        }
    }

    pub fn matches_password(&self, attempt: &str) -> bool {
        self.password.as_deref() == Some(attempt)
    }
}

/// An admin account, registered at startup and logged into by number and
/// password before the admin menus open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub number: String,
    password: String,
}

impl Admin {
    pub fn new(number: &str, password: &str) -> Admin {
        Admin {
            id: Uuid::new_v4().to_string(),
            number: number.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn matches_password(&self, attempt: &str) -> bool {
        self.password == attempt
    }
}

/// Everyone the console can be driven by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    Customer(Customer),
    Admin(Admin),
}

impl User {
    pub fn id(&self) -> &str {
        match self {
            User::Customer(customer) => &customer.id,
            User::Admin(admin) => &admin.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            User::Customer(customer) => &customer.name,
            User::Admin(admin) => &admin.number,
        }
    }

    pub fn is_member(&self) -> bool {
        match self {
            User::Customer(customer) => customer.is_member,
            User::Admin(_) => false,
        }
    }
}

// =============================================================================
// Validation Rules
// =============================================================================

/// Phone numbers must look like `010-1234-5678`.
pub fn validate_phone_number(value: &str) -> ValidationResult<()> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 13
        && bytes[3] == b'-'
        && bytes[8] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, byte)| i == 3 || i == 8 || byte.is_ascii_digit());
    if !shaped {
        return Err(ValidationError::InvalidPhoneNumber {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Passwords need [`MIN_PASSWORD_LENGTH`]+ characters with at least one
/// letter, one digit and one special character.
pub fn validate_password(value: &str) -> ValidationResult<()> {
    let long_enough = value.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_letter = value.chars().any(char::is_alphabetic);
    let has_special = value.chars().any(|c| !c.is_alphanumeric());
    if !(long_enough && has_digit && has_letter && has_special) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirm: &str) -> ValidationResult<()> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

// =============================================================================
// User Directory
// =============================================================================

/// All signed-up customers keyed by phone number, and registered admins
/// keyed by admin number.
#[derive(Debug, Default)]
pub struct UserDirectory {
    customers: BTreeMap<String, Customer>,
    admins: BTreeMap<String, Admin>,
}

impl UserDirectory {
    pub fn new() -> UserDirectory {
        UserDirectory::default()
    }

    /// Registers a new member.
    ///
    /// Checks run in the order the sign-up form asks: phone shape, phone
    /// uniqueness, password policy, password confirmation.
    pub fn sign_up(
        &mut self,
        name: &str,
        phone_number: &str,
        password: &str,
        confirm: &str,
    ) -> StoreResult<Customer> {
        validate_phone_number(phone_number)?;
        if self.customers.contains_key(phone_number) {
            return Err(ValidationError::Duplicate {
                field: "phone number".to_string(),
                value: phone_number.to_string(),
            }
            .into());
        }
        validate_password(password)?;
        validate_password_match(password, confirm)?;

        let customer = Customer::member(name, phone_number, password);
        debug!(name = customer.name.as_str(), "customer signed up");
        self.customers
            .insert(phone_number.to_string(), customer.clone());
        Ok(customer)
    }

    pub fn login(&self, phone_number: &str, password: &str) -> StoreResult<Customer> {
        let customer = self
            .customers
            .get(phone_number)
            .ok_or_else(|| StoreError::UnknownPhoneNumber(phone_number.to_string()))?;
        if !customer.matches_password(password) {
            return Err(StoreError::LoginFailed);
        }
        debug!(name = customer.name.as_str(), "customer logged in");
        Ok(customer.clone())
    }

    /// Registers an admin account. Admin passwords follow the same policy
    /// as member passwords.
    pub fn register_admin(&mut self, number: &str, password: &str) -> StoreResult<Admin> {
        let number = number.trim();
        if number.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }
        if self.admins.contains_key(number) {
            return Err(ValidationError::Duplicate {
                field: "admin number".to_string(),
                value: number.to_string(),
            }
            .into());
        }
        validate_password(password)?;

        let admin = Admin::new(number, password);
        debug!(number = admin.number.as_str(), "admin registered");
        self.admins.insert(number.to_string(), admin.clone());
        Ok(admin)
    }

    pub fn admin_login(&self, number: &str, password: &str) -> StoreResult<Admin> {
        let number = number.trim();
        let admin = self
            .admins
            .get(number)
            .ok_or_else(|| StoreError::UnknownAdminNumber(number.to_string()))?;
        if !admin.matches_password(password) {
            return Err(StoreError::LoginFailed);
        }
        debug!(number = admin.number.as_str(), "admin logged in");
        Ok(admin.clone())
    }

    pub fn exists(&self, phone_number: &str) -> bool {
        self.customers.contains_key(phone_number)
    }

    pub fn find(&self, phone_number: &str) -> Option<&Customer> {
        self.customers.get(phone_number)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
