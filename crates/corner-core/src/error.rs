//! # Error Types
//!
//! Domain-specific error types for corner-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  corner-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  corner-store errors (separate crate)                                  │
//! │  └── StoreError       - Seed loading, user lookup, orchestration       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → console message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts)
//! 3. Errors are enum variants, never String
//! 4. User-facing shortfalls and internal ledger faults are DIFFERENT
//!    variants: `InsufficientStock` means "ask for less", `StockConsistency`
//!    means the pricing step and the commit step disagree about stock and
//!    the program has a bug

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found under any variant.
    ///
    /// ## When This Occurs
    /// - Purchase request names a product the catalog has never seen
    /// - Cart update targets a name that was never added
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Combined promotional + regular stock cannot cover the request.
    ///
    /// ## User Workflow
    /// ```text
    /// Request: [cola-12]
    ///      │
    ///      ▼
    /// total_stock("cola") = 10
    ///      │
    ///      ▼
    /// InsufficientStock { product: "cola", available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// Console shows the message and re-prompts
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// A quantity of zero reached the core.
    ///
    /// The input boundary rejects these before pricing; the core still
    /// refuses them rather than clamping, so a bypassed boundary fails fast.
    #[error("Invalid quantity for {product}: must be at least 1")]
    InvalidQuantity { product: String },

    /// Inventory commit found less stock than the pricing step promised.
    ///
    /// ## When This Occurs
    /// Never, unless the catalog was mutated between pricing and commit or
    /// the deduction plan itself is wrong. This is an internal fault, not a
    /// message for the customer.
    #[error("Inventory ledger out of balance for {product}: short {shortfall} units at commit")]
    StockConsistency { product: String, shortfall: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when console input doesn't meet the accepted-input
/// contract. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The whole input line was empty or whitespace.
    #[error("Input must not be empty")]
    EmptyInput,

    /// A purchase item token isn't shaped like `[name-quantity]`.
    #[error("Item '{token}' must use the [name-quantity] format")]
    MalformedItem { token: String },

    /// The quantity part of a token is missing, non-numeric, or below 1.
    #[error("Quantity in '{token}' must be a whole number of at least 1")]
    InvalidQuantityText { token: String },

    /// A product name carries bracket characters or is empty.
    #[error("Product name '{name}' is not allowed")]
    InvalidProductName { name: String },

    /// A date string isn't a real calendar date in YYYY-MM-DD form.
    #[error("Date '{text}' must be a real date in YYYY-MM-DD format")]
    InvalidDate { text: String },

    /// A yes/no answer is neither Y nor N.
    #[error("Answer '{text}' must be Y or N")]
    InvalidYesNo { text: String },

    /// A numeric field didn't parse as a whole number.
    #[error("{field} must be a whole number")]
    InvalidNumber { field: String },

    /// Numeric value must be positive (admin-entered prices, counts).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Phone number isn't in the ###-####-#### shape.
    #[error("Phone number '{value}' must use the 000-0000-0000 format")]
    InvalidPhoneNumber { value: String },

    /// Password fails the membership sign-up policy.
    #[error("Password must be at least 8 characters with a letter, a digit, and a special character")]
    WeakPassword,

    /// Sign-up password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Duplicate value (e.g., phone number already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
