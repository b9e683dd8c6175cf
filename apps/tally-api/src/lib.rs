//! # Tally API
//!
//! HTTP server for flat-file documents and invoice calculation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally API Routes                               │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌──────────────────────────────────────┐  │
//! │  │  files                 │  │  invoices                            │  │
//! │  │                        │  │                                      │  │
//! │  │ • GET  /files          │  │ • POST /invoices                     │  │
//! │  │ • POST /files          │  │ • POST /files/{name}/invoice         │  │
//! │  │ • GET  /files/{name}   │  │ • GET  /discounts                    │  │
//! │  └────────────────────────┘  └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  ┌────────────────────────┐                                            │
//! │  │  health                │                                            │
//! │  │ • GET  /health         │                                            │
//! │  └────────────────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `BIND_ADDRESS` - Interface to bind (default: 0.0.0.0)
//! - `HTTP_PORT` - HTTP server port (default: 8000)
//! - `FILES_DIR` - Directory served by /files (default: ./files)
//! - `CREATE_FILES_DIR` - Create the directory if missing (default: true)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use tally_core::InvoiceCalculator;
use tally_store::FileStore;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::router;

/// Shared application state.
pub struct AppState {
    pub store: FileStore,
    pub calculator: InvoiceCalculator,
}

impl AppState {
    /// State with the standard invoice policies.
    pub fn new(store: FileStore) -> Arc<Self> {
        Arc::new(AppState {
            store,
            calculator: InvoiceCalculator::standard(),
        })
    }
}
