//! # corner-store: State Layer for Corner Store
//!
//! Everything mutable in one store process lives behind this crate: the
//! seeded catalog, promotion definitions, customer accounts, per-customer
//! carts, and the purchase log.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Corner Store Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Console (apps/cli)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ corner-store (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   store   │  │   seed    │  │   users   │  │ checkout  │   │   │
//! │  │   │  facade   │  │  loading  │  │ directory │  │ sequence  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  corner-core (pure logic)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The [`Store`] facade owning all mutable state
//! - [`checkout`] - End-to-end checkout sequencing on the facade
//! - [`seed`] - Seed-file loading for products and promotions
//! - [`users`] - Customer/admin accounts and the sign-up directory
//! - [`error`] - State-layer error types
//!
//! ## Design Principles
//!
//! 1. **Single writer**: the console drives one `Store` value; no locks
//! 2. **No clock, no prompts**: dates, timestamps and decisions arrive as
//!    parameters from the caller
//! 3. **All-or-nothing checkout**: stock mutates only after every line of a
//!    purchase priced successfully

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod seed;
pub mod store;
pub mod users;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{SeedError, StoreError, StoreResult};
pub use store::Store;
pub use users::{Admin, Customer, User, UserDirectory};
