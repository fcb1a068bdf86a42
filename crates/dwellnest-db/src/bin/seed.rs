//! # Catalog Seeder
//!
//! Loads listings into an empty database for development.
//!
//! ## Usage
//! ```bash
//! # Seed the eight sample listings
//! cargo run -p dwellnest-db --bin seed
//!
//! # Specify database path
//! cargo run -p dwellnest-db --bin seed -- --db ./data/dwellnest.db
//!
//! # Seed from a JSON listing file instead
//! cargo run -p dwellnest-db --bin seed -- --from ./listings.json
//! ```

use std::env;
use std::fs;

use dwellnest_core::Catalog;
use dwellnest_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./dwellnest_dev.db");
    let mut source: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--from" | "-f" => {
                if i + 1 < args.len() {
                    source = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("DwellNest Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./dwellnest_dev.db)");
                println!("  -f, --from <FILE>    JSON listing file (default: built-in sample)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("DwellNest Catalog Seeder");
    println!("========================");
    println!("Database: {}", db_path);

    let catalog = match &source {
        Some(path) => {
            println!("Source:   {}", path);
            Catalog::from_json(&fs::read_to_string(path)?)?
        }
        None => {
            println!("Source:   built-in sample");
            Catalog::sample()?
        }
    };
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.properties().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} properties", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let inserted = db.properties().insert_catalog(&catalog).await?;
    println!("✓ Inserted {} properties", inserted);

    // Read back through the same path the app uses
    let loaded = db.properties().load_catalog().await?;
    println!("  Cities: {}", loaded.cities().join(", "));
    if let Some((min, max)) = loaded.price_bounds() {
        println!("  Prices: ₹{} - ₹{}", min, max);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
