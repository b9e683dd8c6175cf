//! # `tally-invoice` Command
//!
//! Argument parsing and the invoice run behind the `tally-invoice` binary.
//! The binary only installs logging, calls [`run`] and prints the result.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tally_core::{Invoice, InvoiceCalculator};

use crate::documents::invoice_document;
use crate::store::{FileStore, StoreConfig};

/// Compute the invoice of a stored purchase order.
#[derive(Debug, Parser)]
#[command(name = "tally-invoice", version)]
pub struct InvoiceArgs {
    /// Directory holding the documents.
    #[arg(long, env = "FILES_DIR", default_value = "./files")]
    pub dir: PathBuf,

    /// Name of the purchase order document.
    pub order: String,

    /// Store the invoice under this name as well as printing it.
    #[arg(long)]
    pub output: Option<String>,
}

/// Invoices `args.order` from `args.dir` with the standard policies.
///
/// The directory must already exist; a missing directory is reported
/// rather than created.
pub async fn run(args: &InvoiceArgs) -> anyhow::Result<Invoice> {
    let store = FileStore::open(StoreConfig::new(&args.dir).create_if_missing(false))
        .await
        .with_context(|| format!("opening {}", args.dir.display()))?;

    let calculator = InvoiceCalculator::standard();
    invoice_document(&store, &calculator, &args.order, args.output.as_deref())
        .await
        .with_context(|| format!("invoicing {}", args.order))
}
