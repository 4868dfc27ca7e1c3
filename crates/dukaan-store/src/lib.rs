//! # dukaan-store: Persistence Layer for Dukaan POS
//!
//! This crate owns the record collections (customers, products, sales,
//! settings) and mirrors them to JSON blob storage on every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dukaan POS Data Flow                               │
//! │                                                                         │
//! │  Caller (forms, dashboards, invoice export)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dukaan-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RecordStore  │    │   BlobStore   │    │   Fixtures   │  │   │
//! │  │   │  (store.rs)   │    │   (blob.rs)   │    │(fixtures.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ collections   │───►│ Memory / Dir  │    │ default      │  │   │
//! │  │   │ id assignment │    │ whole-value   │    │ records      │  │   │
//! │  │   │ sale commit   │    │ JSON blobs    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Data Directory (DirBlobStore)                    │   │
//! │  │   customers.json  products.json  sales.json  settings.json     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The record store: collections, ids, the sale commit flow
//! - [`blob`] - The blob storage port and its implementations
//! - [`fixtures`] - Default records for never-persisted collections
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukaan_store::{DirBlobStore, IdPolicy, RecordStore};
//!
//! let blobs = DirBlobStore::open("./data")?;
//! let mut store = RecordStore::open(blobs, IdPolicy::default())?;
//!
//! let sale = store.commit_sale(draft)?;
//! println!("committed sale #{}", sale.id);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;
pub mod fixtures;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobStore, DirBlobStore, MemoryBlobStore};
pub use error::{StoreError, StoreResult};
pub use store::{IdPolicy, RecordStore};
