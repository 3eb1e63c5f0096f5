//! # Purchase Requests and Input Validation
//!
//! The accepted-input contract for everything typed at the console. The
//! grammar for a purchase is bracketed `[name-quantity]` tokens separated
//! by commas:
//!
//! ```text
//! [cola-2],[chips-1]          two items
//! [cola-2], [chips-1]         spaces after the comma are fine
//! [energy-bar-2]              hyphenated name; the LAST dash splits
//! cola-2                      rejected: missing brackets
//! [cola2]                     rejected: missing dash
//! [cola-]                     rejected: empty quantity
//! [cola-0]                    rejected: quantity below 1
//! ```
//!
//! Everything here is parsing and validation only. Whether a product
//! exists or has stock is the pricing layer's question, answered later
//! against the catalog.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Earliest year accepted for promotion dates.
pub const MIN_PROMOTION_YEAR: i32 = 1900;

/// One `(name, quantity)` pair handed to the pricing engine.
///
/// Duplicate names across one purchase are allowed; each pair becomes its
/// own line and the inventory commit validates their joint consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub name: String,
    pub quantity: u32,
}

// =============================================================================
// Purchase Grammar
// =============================================================================

/// Parses a whole purchase input line into requests.
///
/// # Examples
/// ```
/// use corner_core::request::parse_purchase_input;
///
/// let requests = parse_purchase_input("[cola-2], [chips-1]").unwrap();
/// assert_eq!(requests.len(), 2);
/// assert_eq!(requests[0].name, "cola");
/// assert_eq!(requests[1].quantity, 1);
/// ```
pub fn parse_purchase_input(input: &str) -> ValidationResult<Vec<PurchaseRequest>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    input
        .split(',')
        .map(|token| parse_purchase_token(token.trim()))
        .collect()
}

fn parse_purchase_token(token: &str) -> ValidationResult<PurchaseRequest> {
    let inner = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ValidationError::MalformedItem {
            token: token.to_string(),
        })?;
    // the quantity sits after the LAST dash, so hyphenated names survive
    let (name, quantity_text) =
        inner
            .rsplit_once('-')
            .ok_or_else(|| ValidationError::MalformedItem {
                token: token.to_string(),
            })?;

    let name = name.trim();
    validate_product_name(name)?;

    let quantity: u32 =
        quantity_text
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidQuantityText {
                token: token.to_string(),
            })?;
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantityText {
            token: token.to_string(),
        });
    }

    Ok(PurchaseRequest {
        name: name.to_string(),
        quantity,
    })
}

/// A product name must be non-blank and free of bracket characters, which
/// would otherwise corrupt the purchase grammar.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['[', ']']) {
        return Err(ValidationError::InvalidProductName {
            name: name.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Scalar Answers
// =============================================================================

/// `Y`/`y` is yes, `N`/`n` is no, anything else is an error.
pub fn parse_yes_no(input: &str) -> ValidationResult<bool> {
    match input.trim() {
        "Y" | "y" => Ok(true),
        "N" | "n" => Ok(false),
        other => Err(ValidationError::InvalidYesNo {
            text: other.to_string(),
        }),
    }
}

/// Parses a strictly positive integer for the named field.
///
/// `-5` parses as a number and then fails the positivity check, so the
/// caller sees "must be positive" rather than "not a number".
pub fn parse_positive_int(input: &str, field: &str) -> ValidationResult<u32> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
        })?;
    u32::try_from(value)
        .ok()
        .filter(|parsed| *parsed > 0)
        .ok_or_else(|| ValidationError::MustBePositive {
            field: field.to_string(),
        })
}

/// Parses an admin-entered price in whole currency units.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "price".to_string(),
        })?;
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(Money::from_units(value))
}

/// Buy and get counts of a promotion must both be at least 1.
pub fn validate_promotion_values(buy: u32, get: u32) -> ValidationResult<()> {
    if buy == 0 {
        return Err(ValidationError::MustBePositive {
            field: "buy count".to_string(),
        });
    }
    if get == 0 {
        return Err(ValidationError::MustBePositive {
            field: "get count".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Dates
// =============================================================================

/// Parses a `YYYY-MM-DD` date.
///
/// The shape is checked before chrono sees it, so lenient forms like
/// `2024-1-1` are rejected along with impossible calendar dates and years
/// before [`MIN_PROMOTION_YEAR`].
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    let text = input.trim();
    let invalid = || ValidationError::InvalidDate {
        text: text.to_string(),
    };

    if !has_date_shape(text) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())?;
    if date.year() < MIN_PROMOTION_YEAR {
        return Err(invalid());
    }
    Ok(date)
}

fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, byte)| i == 4 || i == 7 || byte.is_ascii_digit())
}

// =============================================================================
// Unit Tests
// =============================================================================
