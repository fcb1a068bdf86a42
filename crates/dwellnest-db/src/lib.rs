//! # dwellnest-db: Database Layer for DwellNest
//!
//! SQLite persistence for the property catalog and submitted bookings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DwellNest Data Flow                              │
//! │                                                                         │
//! │  App startup / admin edit                 Booking command               │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   dwellnest-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ PropertyRepo    │   │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ BookingRepo     │   │ 001, 002     │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PropertyRepository::load_catalog() ──► dwellnest_core::Catalog        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dwellnest_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/dwellnest.db")).await?;
//! let catalog = db.properties().load_catalog().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::booking::{Booking, BookingRepository, NewBooking};
pub use repository::property::PropertyRepository;
