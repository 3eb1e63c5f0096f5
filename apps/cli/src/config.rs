//! Console configuration.
//!
//! Loaded from environment variables with fallback to defaults, so running
//! `corner` from the workspace root needs no setup at all.

use std::env;

use thiserror::Error;

use corner_core::DEFAULT_LOW_STOCK_THRESHOLD;

/// Startup configuration for the console.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the product seed file
    pub products_path: String,

    /// Path of the promotion seed file
    pub promotions_path: String,

    /// Store name shown in banners and on receipts
    pub store_name: String,

    /// Stock level at or below which the admin low-stock report lists a
    /// product
    pub low_stock_threshold: u32,

    /// Admin number registered at startup
    pub admin_number: String,

    /// Password for the startup admin account
    pub admin_password: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = CliConfig {
            products_path: env::var("CORNER_PRODUCTS_FILE")
                .unwrap_or_else(|_| "data/products.csv".to_string()),

            promotions_path: env::var("CORNER_PROMOTIONS_FILE")
                .unwrap_or_else(|_| "data/promotions.csv".to_string()),

            store_name: env::var("CORNER_STORE_NAME")
                .unwrap_or_else(|_| "Corner Store".to_string()),

            low_stock_threshold: env::var("CORNER_LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_LOW_STOCK_THRESHOLD.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CORNER_LOW_STOCK_THRESHOLD".to_string()))?,

            admin_number: env::var("CORNER_ADMIN_NUMBER").unwrap_or_else(|_| "1001".to_string()),

            // the default must satisfy the password policy the store enforces
            admin_password: env::var("CORNER_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "corner1!admin".to_string()),
        };
        Ok(config)
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
