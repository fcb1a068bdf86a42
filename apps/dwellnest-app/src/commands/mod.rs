//! # Commands Module
//!
//! Every operation the front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── listing.rs  ◄─── Filtered/sorted listing, navigation, cities
//! ├── booking.rs  ◄─── Price quote and booking submission
//! ├── admin.rs    ◄─── Admin table, add/update/delete listings
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Pure catalog read, no database
//! fn list_cities(catalog: &CatalogState) -> Vec<String>
//!
//! // Reads the listing view and the catalog
//! fn list_properties(catalog: &CatalogState, listing: &ListingState) -> ListingDto
//!
//! // Writes to SQLite, then swaps the catalog
//! async fn admin_delete_property(db: &DbState, catalog: &CatalogState, id: i64)
//! ```
//!
//! Commands return DTOs (camelCase JSON) or [`ApiError`](crate::error::ApiError).

pub mod admin;
pub mod booking;
pub mod config;
pub mod listing;
