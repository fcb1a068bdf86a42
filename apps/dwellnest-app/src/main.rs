//! # DwellNest Entry Point
//!
//! Starts the application and logs the default listing.
//!
//! ```bash
//! # Default data directory
//! cargo run -p dwellnest-app
//!
//! # Throwaway database, verbose
//! DWELLNEST_DB_PATH=./dwellnest_dev.db RUST_LOG=debug cargo run -p dwellnest-app
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match dwellnest_app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dwellnest: {}", e);
            ExitCode::FAILURE
        }
    }
}
