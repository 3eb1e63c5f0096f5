//! # Corner Console
//!
//! The interactive front-end for the Corner store simulation.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          corner (binary)                                │
//! │                                                                         │
//! │  tracing init ──► CliConfig::load ──► seed catalog + promotions         │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                       Store::new ──► Session::run       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod input;
mod render;
mod session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use corner_store::{seed, Store};

use crate::config::CliConfig;
use crate::session::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides; default keeps the console output readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = CliConfig::load()?;
    info!(
        products = config.products_path.as_str(),
        promotions = config.promotions_path.as_str(),
        "loading seed files"
    );

    let catalog = seed::load_catalog(&config.products_path)?;
    let promotions = seed::load_promotions(&config.promotions_path)?;
    let mut store = Store::new(catalog, promotions);
    store.register_admin(&config.admin_number, &config.admin_password)?;

    match Session::new(&mut store, &config).run() {
        Ok(()) => {}
        // Ctrl-D anywhere is a normal way to leave the store
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {}
        Err(err) => return Err(err.into()),
    }
    println!("\nGoodbye.");
    Ok(())
}
