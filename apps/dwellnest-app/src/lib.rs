//! # dwellnest-app: Application Layer
//!
//! Wires the query engine and the database into the operations the
//! front end calls.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DwellNest Application                            │
//! │                                                                         │
//! │  main.rs ────► init tracing, resolve DB path, App::start, report        │
//! │                                                                         │
//! │  commands/ ──► list_properties, update_filters, get_quote,              │
//! │                submit_booking, admin_list, admin_add_property, ...      │
//! │                                                                         │
//! │  state/ ─────► DbState, CatalogState, ListingState,                     │
//! │                AdminListState, ConfigState                              │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  dwellnest.db (local file, WAL mode)                             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dwellnest_core::Catalog;
use dwellnest_db::{Database, DbConfig};
use error::StartupError;
use state::{AdminListState, CatalogState, ConfigState, DbState, ListingState};

/// Every state holder, built once at startup.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DbState,
    pub catalog: CatalogState,
    pub listing: ListingState,
    pub admin: AdminListState,
    pub config: ConfigState,
}

impl App {
    /// Opens the database, seeds it when empty and loads the catalog.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1. Connect to Database                                             │
    /// │     • SQLite with WAL mode, run pending migrations                  │
    /// │                                                                     │
    /// │  2. Seed when empty                                                 │
    /// │     • The eight sample listings                                     │
    /// │                                                                     │
    /// │  3. Load Catalog                                                    │
    /// │     • Validated, amenities reconciled, version 1                    │
    /// │                                                                     │
    /// │  4. Initialize State Objects                                        │
    /// │     • Empty filters, admin table sorted by id                       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn start(db_config: DbConfig, config: ConfigState) -> Result<App, StartupError> {
        let db = Database::new(db_config).await?;
        info!("Database connected and migrations applied");

        if db.properties().count().await? == 0 {
            let seeded = db.properties().insert_catalog(&Catalog::sample()?).await?;
            info!(seeded, "Empty database seeded with sample listings");
        }

        let catalog = db.properties().load_catalog().await?;
        info!(count = catalog.len(), cities = ?catalog.cities(), "Catalog loaded");

        Ok(App {
            db: DbState::new(db),
            catalog: CatalogState::new(catalog),
            listing: ListingState::with_price_ceiling(config.price_ceiling),
            admin: AdminListState::new(),
            config,
        })
    }
}

/// Runs the application: start up, log the default listing, shut down.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(app = %config.app_name, "Starting DwellNest");

    let db_path = get_database_path()?;
    info!(?db_path, "Database path determined");

    let app = App::start(DbConfig::new(db_path), config).await?;

    let listing = commands::listing::list_properties(&app.catalog, &app.listing);
    info!(count = listing.count, "Default listing");
    for property in &listing.properties {
        info!(
            id = property.id,
            title = %property.title,
            city = %property.city,
            price = %app.config.format_currency(property.price_rupees),
            rating = property.rating,
            featured = property.is_featured,
            "Listing"
        );
    }

    app.db.inner().close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dwellnest=trace` - Show trace for dwellnest crates only
/// - Default: INFO, DEBUG for dwellnest crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,dwellnest=debug,sqlx=warn";

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.dwellnest.dwellnest/dwellnest.db`
/// - **Windows**: `%APPDATA%\dwellnest\dwellnest\data\dwellnest.db`
/// - **Linux**: `~/.local/share/dwellnest/dwellnest.db`
///
/// ## Development Override
/// Set `DWELLNEST_DB_PATH` environment variable to use a custom path.
fn get_database_path() -> Result<PathBuf, StartupError> {
    if let Ok(path) = std::env::var("DWELLNEST_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "dwellnest", "dwellnest").ok_or(StartupError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("dwellnest.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================
