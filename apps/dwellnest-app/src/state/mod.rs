//! # Application State
//!
//! One state holder per concern, each passed only to the commands that need
//! it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application State                                │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │  DbState     │  │ CatalogState │  │ ListingState │  │ ConfigState │  │
//! │  │              │  │              │  │              │  │             │  │
//! │  │  Database    │  │ Arc<Catalog> │  │ FilterState  │  │ service fee │  │
//! │  │  (SQLite     │  │ + version    │  │ + memo       │  │ currency    │  │
//! │  │   pool)      │  │              │  │              │  │             │  │
//! │  └──────────────┘  └──────┬───────┘  └──────┬───────┘  └─────────────┘  │
//! │                           │  version        │                           │
//! │                           └────────►────────┘ memo valid only for the   │
//! │                                               version it was built on   │
//! │                                                                         │
//! │  AdminListState: search term + column sort for the property table      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • DbState: Database has internal connection pool (thread-safe)         │
//! │  • CatalogState / ListingState / AdminListState: Arc<Mutex<T>>          │
//! │  • ConfigState: Read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod admin;
mod catalog;
mod config;
mod db;
mod listing;

pub use admin::AdminListState;
pub use catalog::{CatalogSnapshot, CatalogState};
pub use config::ConfigState;
pub use db::DbState;
pub use listing::ListingState;
