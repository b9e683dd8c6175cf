//! # Invoice a Stored Purchase Order
//!
//! Reads a purchase order from the files directory, prints its invoice and
//! optionally stores the invoice next to it.
//!
//! ## Usage
//! ```bash
//! # Print the invoice for ./files/compra_1.json
//! cargo run -p tally-store --bin tally-invoice -- compra_1.json
//!
//! # Use another directory and keep the result
//! cargo run -p tally-store --bin tally-invoice -- --dir ./data compra_1.json --output factura_1.json
//! ```

use clap::Parser;
use tally_store::cli::{run, InvoiceArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = InvoiceArgs::parse();
    let invoice = run(&args).await?;

    println!("{}", serde_json::to_string_pretty(&invoice)?);

    if let Some(output) = &args.output {
        eprintln!("Invoice stored as {output}");
    }

    Ok(())
}
