//! # Seed Data Generator
//!
//! Populates a data directory with the default records for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./data (default)
//! cargo run -p dukaan-store --bin seed
//!
//! # Specify data directory
//! cargo run -p dukaan-store --bin seed -- --dir ./my-data
//! ```
//!
//! Writes one JSON file per collection: `customers.json`, `products.json`,
//! `sales.json`, `settings.json`. Refuses to overwrite a directory that
//! already holds records.

use std::env;

use dukaan_store::{BlobStore, DirBlobStore, IdPolicy, RecordStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut dir = String::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dukaan POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory path (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Dukaan POS Seed Data Generator");
    println!("=================================");
    println!("Data directory: {}", dir);
    println!();

    let blobs = DirBlobStore::open(&dir)?;

    // Refuse to clobber existing data
    if blobs.load("customers")?.is_some() {
        println!("⚠ Directory already holds records");
        println!("  Skipping seed to avoid overwriting.");
        println!("  Delete the JSON files to regenerate.");
        return Ok(());
    }

    // Opening against an empty directory loads the built-in fixtures;
    // persist_all writes them out.
    let mut store = RecordStore::open(blobs, IdPolicy::default())?;
    store.persist_all()?;

    println!("✓ Seeded {} customers", store.customers().len());
    println!("✓ Seeded {} products", store.products().len());
    println!("✓ Seeded {} sales", store.sales().len());
    println!("✓ Seeded settings for '{}'", store.settings().shop_name);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
