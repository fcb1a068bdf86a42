//! # dwellnest-core: Listing Query & Pricing Engine for DwellNest
//!
//! Pure logic behind the property listing page, the booking quote and the
//! admin table. No database, no clock, no globals.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DwellNest Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 dwellnest-app (state + commands)                │   │
//! │  │   ListingState ──► list_properties   AdminListState ──► admin   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ dwellnest-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │  filter  │─►│   sort   │─►│  query   │  │ pricing  │       │   │
//! │  │   │predicates│  │comparators│ │ composer │  │  quote   │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐                     │   │
//! │  │   │ catalog  │  │  admin   │  │validation│                     │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              dwellnest-db (SQLite catalog + bookings)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Property, FilterState, SortMode, StayConfiguration
//! - [`catalog`] - Validated, immutable property collection
//! - [`filter`] - Filter predicate set
//! - [`sort`] - Sort comparator set
//! - [`query`] - Filter + sort composer
//! - [`pricing`] - Booking price quote
//! - [`admin`] - Search + column sort for the management table
//! - [`money`] - Whole-rupee amounts
//! - [`validation`] - Listing and booking input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dwellnest_core::{Amenity, Catalog, FilterState, SortMode};
//!
//! let catalog = Catalog::sample().unwrap();
//! let state = FilterState::default()
//!     .with_city("Mumbai")
//!     .with_amenity(Amenity::Parking)
//!     .with_sort(SortMode::PriceLow);
//!
//! let results = catalog.query(&state);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Luxury PG with Terrace");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod pricing;
pub mod query;
pub mod sort;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use admin::{AdminSort, AdminSortField, SortDirection};
pub use catalog::{Catalog, PropertyRecord};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Rupees;
pub use pricing::PriceQuote;
pub use query::query;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat service fee added to every booking, in rupees.
pub const SERVICE_FEE_RUPEES: i64 = 1_000;

/// Lower bound of the default price slider.
pub const DEFAULT_PRICE_FLOOR: i64 = 0;

/// Upper bound of the default price slider.
///
/// Covers every listing in the reference catalog, so the default price
/// predicate excludes nothing there.
pub const DEFAULT_PRICE_CEILING: i64 = 20_000;

pub const MAX_SEARCH_QUERY_LEN: usize = 100;

pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of city and location strings.
pub const MAX_TEXT_FIELD_LEN: usize = 200;

pub const MAX_RATING: f64 = 5.0;

/// Highest accepted monthly price, in rupees.
///
/// Keeps `rent + deposit + fee` and twelve months of rent well inside `i64`.
pub const MAX_PRICE_RUPEES: i64 = 10_000_000;
