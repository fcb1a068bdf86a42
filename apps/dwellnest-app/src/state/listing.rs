//! # Listing State
//!
//! The listing view's filter selections plus a memo of the last result.
//!
//! ## Memo
//! ```text
//! results(catalog)
//!     │
//!     ▼
//! memo.version == catalog.version && memo.filters == filters ?
//!     │ yes                           │ no
//!     ▼                               ▼
//! reuse memo.ids               catalog.query(&filters) ──► store ids
//!     │                               │
//!     └───────────────┬───────────────┘
//!                     ▼
//!        ids ──► &Property (in result order)
//! ```
//!
//! The memo stores ids rather than references so it never outlives the
//! catalog snapshot it was computed from. Any catalog replace changes the
//! version and forces a fresh query.
//!
//! The price slider's upper end comes from configuration. It seeds the
//! initial selections, "Clear All" and any bound a form leaves out.

use std::sync::{Arc, Mutex};

use tracing::debug;

use dwellnest_core::{Amenity, FilterState, PriceRange, Property, SortMode, DEFAULT_PRICE_FLOOR};

use super::CatalogState;

#[derive(Debug)]
struct Memo {
    version: u64,
    filters: FilterState,
    ids: Vec<i64>,
}

#[derive(Debug, Default)]
struct Listing {
    default_price: PriceRange,
    filters: FilterState,
    memo: Option<Memo>,
    evaluations: u64,
}

impl Listing {
    fn initial_filters(&self) -> FilterState {
        FilterState {
            price: self.default_price,
            ..FilterState::default()
        }
    }
}

/// Filter selections for the listing view.
#[derive(Debug, Clone, Default)]
pub struct ListingState {
    inner: Arc<Mutex<Listing>>,
}

impl ListingState {
    /// Listing state with the built-in price slider range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing state whose slider runs from zero to `ceiling` rupees.
    pub fn with_price_ceiling(ceiling: i64) -> Self {
        let mut listing = Listing {
            default_price: PriceRange::new(DEFAULT_PRICE_FLOOR, ceiling),
            ..Listing::default()
        };
        listing.filters = listing.initial_filters();

        ListingState {
            inner: Arc::new(Mutex::new(listing)),
        }
    }

    /// The slider range used when no bound is selected.
    pub fn default_price(&self) -> PriceRange {
        self.inner.lock().expect("Listing mutex poisoned").default_price
    }

    /// Returns a copy of the current selections.
    pub fn filters(&self) -> FilterState {
        self.with_filters(|f| f.clone())
    }

    /// Replaces every selection at once (navigation, a filter form submit).
    pub fn replace(&self, filters: FilterState) {
        self.with_filters_mut(|f| *f = filters);
    }

    /// Selects a city; `None` removes the city filter.
    pub fn set_city(&self, city: Option<String>) {
        self.with_filters_mut(|f| f.city = city);
    }

    pub fn set_price_range(&self, min: i64, max: i64) {
        self.with_filters_mut(|f| f.price = dwellnest_core::PriceRange::new(min, max));
    }

    /// Turns one amenity requirement on or off.
    pub fn set_amenity(&self, amenity: Amenity, required: bool) {
        self.with_filters_mut(|f| f.amenities.set(amenity, required));
    }

    pub fn set_sort(&self, sort: SortMode) {
        self.with_filters_mut(|f| f.sort = sort);
    }

    pub fn set_location(&self, location: Option<String>) {
        self.with_filters_mut(|f| f.location = location);
    }

    /// "Clear All". The price range returns to the configured slider range.
    pub fn clear(&self) {
        let mut listing = self.inner.lock().expect("Listing mutex poisoned");
        listing.filters = listing.initial_filters();
    }

    /// Runs `f` over the current result list.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let dtos = listing.with_results(&catalog, |props| {
    ///     props.iter().map(|p| PropertyDto::from(*p)).collect::<Vec<_>>()
    /// });
    /// ```
    pub fn with_results<F, R>(&self, catalog: &CatalogState, f: F) -> R
    where
        F: FnOnce(&FilterState, &[&Property]) -> R,
    {
        let snapshot = catalog.snapshot();
        let mut listing = self.inner.lock().expect("Listing mutex poisoned");

        let fresh = matches!(
            &listing.memo,
            Some(memo) if memo.version == snapshot.version && memo.filters == listing.filters
        );

        if !fresh {
            let ids: Vec<i64> = snapshot
                .catalog
                .query(&listing.filters)
                .into_iter()
                .map(|p| p.id)
                .collect();
            debug!(
                version = snapshot.version,
                count = ids.len(),
                sort = %listing.filters.sort,
                "Listing query evaluated"
            );
            listing.memo = Some(Memo {
                version: snapshot.version,
                filters: listing.filters.clone(),
                ids,
            });
            listing.evaluations += 1;
        }

        let ids = listing.memo.as_ref().map(|m| m.ids.as_slice()).unwrap_or_default();
        let properties: Vec<&Property> = ids.iter().filter_map(|id| snapshot.catalog.get(*id)).collect();

        f(&listing.filters, &properties)
    }

    /// Number of times the query actually ran (memo misses).
    pub fn evaluations(&self) -> u64 {
        self.inner.lock().expect("Listing mutex poisoned").evaluations
    }

    fn with_filters<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FilterState) -> R,
    {
        let listing = self.inner.lock().expect("Listing mutex poisoned");
        f(&listing.filters)
    }

    fn with_filters_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FilterState) -> R,
    {
        let mut listing = self.inner.lock().expect("Listing mutex poisoned");
        f(&mut listing.filters)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dwellnest_core::Catalog;

    fn ids(listing: &ListingState, catalog: &CatalogState) -> Vec<i64> {
        listing.with_results(catalog, |_, props| props.iter().map(|p| p.id).collect())
    }

    #[test]
    fn test_default_listing() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::new();

        assert_eq!(ids(&listing, &catalog), vec![2, 1, 5, 4, 6, 7, 3, 8]);
    }

    #[test]
    fn test_setters_narrow_results() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::new();

        listing.set_city(Some("Bangalore".to_string()));
        listing.set_amenity(Amenity::Ac, true);
        listing.set_sort(SortMode::PriceLow);
        assert_eq!(ids(&listing, &catalog), vec![4, 1, 2]);

        listing.set_amenity(Amenity::Ac, false);
        listing.set_price_range(0, 9_000);
        assert_eq!(ids(&listing, &catalog), vec![3]);

        listing.clear();
        assert_eq!(listing.filters(), FilterState::default());
        assert_eq!(ids(&listing, &catalog).len(), 8);
    }

    #[test]
    fn test_location_filter() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::new();

        listing.set_location(Some("layout".to_string()));
        assert_eq!(ids(&listing, &catalog), vec![2, 3]);

        listing.set_location(None);
        assert_eq!(ids(&listing, &catalog).len(), 8);
    }

    #[test]
    fn test_configured_price_ceiling() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::with_price_ceiling(12_000);

        assert_eq!(listing.default_price(), PriceRange::new(0, 12_000));
        assert_eq!(ids(&listing, &catalog), vec![1, 4, 3, 8]);

        listing.set_price_range(0, 20_000);
        assert_eq!(ids(&listing, &catalog).len(), 8);

        listing.clear();
        assert_eq!(listing.filters().price, PriceRange::new(0, 12_000));
        assert_eq!(ids(&listing, &catalog), vec![1, 4, 3, 8]);
    }

    #[test]
    fn test_memo_reused_until_filters_change() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::new();

        ids(&listing, &catalog);
        ids(&listing, &catalog);
        assert_eq!(listing.evaluations(), 1);

        // Setting the same value again leaves the memo valid
        listing.set_sort(SortMode::Featured);
        ids(&listing, &catalog);
        assert_eq!(listing.evaluations(), 1);

        listing.set_sort(SortMode::Rating);
        ids(&listing, &catalog);
        assert_eq!(listing.evaluations(), 2);
    }

    #[test]
    fn test_memo_invalidated_by_catalog_replace() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let listing = ListingState::new();

        assert_eq!(ids(&listing, &catalog).len(), 8);

        catalog.replace(Catalog::empty());
        assert!(ids(&listing, &catalog).is_empty());
        assert_eq!(listing.evaluations(), 2);
    }
}
