//! # Sort Comparator Set
//!
//! One comparator per [`SortMode`]. All of them are used with a stable sort,
//! so properties with equal keys keep their catalog order.
//!
//! ## Featured Order (default)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Compound key: (featured first, then rating descending)                 │
//! │                                                                         │
//! │   A  featured   4.0  ─┐                                                 │
//! │   B  regular    4.9   │   sort   ──►   C  featured 4.5                  │
//! │   C  featured   4.5  ─┘                A  featured 4.0                  │
//! │                                        B  regular  4.9                  │
//! │                                                                         │
//! │  B has the best rating but never jumps the featured partition.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;

use crate::types::{Property, SortMode};

impl SortMode {
    /// Compares two properties under this mode.
    ///
    /// Returns `Equal` for equal keys; stability of the caller's sort keeps
    /// catalog order for those.
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortMode::Featured => by_featured(a, b).then_with(|| by_rating_desc(a, b)),
            SortMode::PriceLow => a.price_rupees.cmp(&b.price_rupees),
            SortMode::PriceHigh => b.price_rupees.cmp(&a.price_rupees),
            SortMode::Rating => by_rating_desc(a, b),
        }
    }
}

/// Featured before non-featured.
fn by_featured(a: &Property, b: &Property) -> Ordering {
    b.is_featured.cmp(&a.is_featured)
}

/// Higher rating first. `total_cmp` keeps this a total order.
fn by_rating_desc(a: &Property, b: &Property) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

/// Sorts borrowed properties in place with a stable sort.
///
/// Only the slice of references is reordered; the properties themselves are
/// untouched.
pub fn sort_properties(properties: &mut [&Property], mode: SortMode) {
    properties.sort_by(|a, b| mode.compare(a, b));
}

// =============================================================================
// Unit Tests
// =============================================================================
