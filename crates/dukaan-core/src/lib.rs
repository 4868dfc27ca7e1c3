//! # dukaan-core: Pure Business Logic for Dukaan POS
//!
//! This crate is the **heart** of Dukaan POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Dukaan POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Layer (external collaborator)         │   │
//! │  │    Forms ──► Dashboards ──► Printable invoice export            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  ledger   │  │  invoice  │  │  report   │  │   │
//! │  │   │  Customer │  │  totals   │  │  document │  │ dashboard │  │   │
//! │  │   │  Product  │  │  balance  │  │  builder  │  │  metrics  │  │   │
//! │  │   │  Sale     │  │  math     │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 dukaan-store (Record Store)                     │   │
//! │  │        Owned collections, JSON blob persistence                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Sale, Settings)
//! - [`money`] - Integer money and basis-point rates (no floating point!)
//! - [`ledger`] - Invoice totals and customer settlement math
//! - [`invoice`] - Printable invoice document builder
//! - [`report`] - Dashboard aggregation
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dukaan_core::ledger::compute_invoice;
//! use dukaan_core::money::{Money, Rate};
//! use dukaan_core::types::LineItem;
//!
//! let items = vec![LineItem {
//!     product_id: 1,
//!     name: Some("Gold Flake Kings".to_string()),
//!     price: Some(Money::from_rupees(350)),
//!     quantity: 5,
//!     subtotal: Money::from_rupees(1750),
//! }];
//!
//! let totals = compute_invoice(&items, Rate::zero(), Rate::from_percent(5.0));
//! assert_eq!(totals.subtotal, Money::from_rupees(1750));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod ledger;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::Money` instead of
// `use dukaan_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use types::*;
