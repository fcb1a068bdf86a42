//! # Repository Module
//!
//! Database repository implementations for DwellNest.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App command                                                            │
//! │       │  db.properties().load_catalog()                                 │
//! │       ▼                                                                 │
//! │  PropertyRepository                                                     │
//! │  ├── list_all / get_by_id / count                                       │
//! │  ├── insert / update / delete                                           │
//! │  └── load_catalog ──► dwellnest_core::Catalog                           │
//! │                                                                         │
//! │  BookingRepository                                                      │
//! │  ├── insert(NewBooking) ──► Booking                                     │
//! │  └── get_by_id / list_for_property                                      │
//! │       │                                                                 │
//! │       ▼  SQL                                                            │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are decoded into private `*Row` structs (`sqlx::FromRow`) and then
//! converted into domain types, so a malformed row surfaces as
//! `DbError::Corrupt` instead of a panic.

pub mod booking;
pub mod property;
