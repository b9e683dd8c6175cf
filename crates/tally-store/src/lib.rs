//! # tally-store: Flat-File Documents for Tally
//!
//! Stores, lists and retrieves named text documents (purchase orders,
//! invoices, anything else) in a single directory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally Data Flow                                 │
//! │                                                                         │
//! │  HTTP handler (GET /files/{name})  or  tally-invoice CLI               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   FileStore   │    │   documents   │    │    error     │  │   │
//! │  │   │  (store.rs)   │◄───│ load_order    │    │  StoreError  │  │   │
//! │  │   │ list/read/    │    │ invoice_doc.. │    │  DocumentErr │  │   │
//! │  │   │ write         │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ./files/ (one file per document)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_store::{FileStore, StoreConfig};
//!
//! let store = FileStore::open(StoreConfig::new("./files")).await?;
//! store.write("notes.txt", "hello").await?;
//! let names = store.list().await?;
//! let content = store.read("notes.txt").await?;
//! ```

pub mod cli;
pub mod documents;
pub mod error;
pub mod store;

pub use documents::{invoice_document, load_order};
pub use error::{DocumentError, DocumentResult, StoreError, StoreResult};
pub use store::{FileStore, StoreConfig};
