//! # Store Error Types
//!
//! Error types for the state layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError / ValidationError (corner-core)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds seed, account and cart context         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Console prints the message and re-prompts                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use thiserror::Error;

use corner_core::error::{CoreError, ValidationError};

// =============================================================================
// Seed Error
// =============================================================================

/// Failures while loading the catalog or promotion seed files.
///
/// Every variant names the file and, where it applies, the 1-based line the
/// loader choked on, so a broken seed file is fixable from the message
/// alone.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read at all.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A data line has fewer comma-separated fields than the format needs.
    #[error("{file} line {line}: expected at least {expected} fields, found {found}")]
    MissingFields {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field failed validation (bad number, bad date, duplicate name).
    #[error("{file} line {line}: {source}")]
    InvalidField {
        file: String,
        line: usize,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Store Error
// =============================================================================

/// State-layer errors.
///
/// Everything the console may need to show a user funnels through here:
/// core pricing failures, seed problems at startup, and account mistakes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Business rule violation from the pricing core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Seed file problem at startup.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Login attempt for a phone number nobody signed up with.
    #[error("No account is registered for {0}")]
    UnknownPhoneNumber(String),

    /// Admin login attempt for an unregistered admin number.
    #[error("No admin is registered under number {0}")]
    UnknownAdminNumber(String),

    /// Login attempt with the wrong password.
    #[error("Password does not match")]
    LoginFailed,

    /// Checkout or cart view on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

// ValidationError arrives wrapped in CoreError so a single `?` works from
// both core calls and local input validation.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for state-layer operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_errors_name_file_and_line() {
        let err = SeedError::MissingFields {
            file: "products.csv".to_string(),
            line: 3,
            expected: 4,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "products.csv line 3: expected at least 4 fields, found 2"
        );
    }

    #[test]
    fn test_validation_error_converts_through_core() {
        let err: StoreError = ValidationError::EmptyInput.into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: Input must not be empty");
    }

    #[test]
    fn test_core_error_passes_through_transparently() {
        let err: StoreError = CoreError::ProductNotFound("cola".to_string()).into();
        assert_eq!(err.to_string(), "Product not found: cola");
    }
}
