//! # Query Composer
//!
//! Applies a [`FilterState`] to a catalog: filter, then stable sort.
//!
//! ```text
//! catalog (order N)                 FilterState
//!      │                                 │
//!      └──────────► filter (AND) ◄───────┘
//!                       │
//!                       ▼
//!                 stable sort by state.sort
//!                       │
//!                       ▼
//!           Vec<&Property>  (borrows the catalog)
//! ```
//!
//! Deterministic: the same catalog and the same state always give the same
//! ordered result. Nothing is cached here; callers that want memoization key
//! it on the catalog version plus the `FilterState`.

use crate::catalog::Catalog;
use crate::sort::sort_properties;
use crate::types::{FilterState, Property};

/// Runs one listing query.
///
/// ## Example
/// ```rust
/// use dwellnest_core::{query, Catalog, FilterState};
///
/// let catalog = Catalog::sample().unwrap();
/// let state = FilterState::default().with_city("bangalore");
/// let ids: Vec<i64> = query(catalog.as_slice(), &state).iter().map(|p| p.id).collect();
/// assert_eq!(ids, vec![2, 1, 4, 3]);
/// ```
pub fn query<'a>(catalog: &'a [Property], state: &FilterState) -> Vec<&'a Property> {
    let mut results: Vec<&Property> = catalog.iter().filter(|p| state.matches(p)).collect();
    sort_properties(&mut results, state.sort);
    results
}

impl Catalog {
    /// Runs [`query`] over this catalog.
    pub fn query(&self, state: &FilterState) -> Vec<&Property> {
        query(self.as_slice(), state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amenity, AmenityFlags, SortMode};
    use proptest::prelude::*;

    fn ids(results: &[&Property]) -> Vec<i64> {
        results.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_state_returns_featured_order() {
        let catalog = Catalog::sample().unwrap();
        let results = catalog.query(&FilterState::default());
        // Featured (by rating): 2 (4.9), 1 (4.8), 5 (4.7); then the rest by rating.
        assert_eq!(ids(&results), vec![2, 1, 5, 4, 6, 7, 3, 8]);
    }

    #[test]
    fn test_city_filter_is_case_insensitive() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default().with_city("bangalore");
        let mut found = ids(&catalog.query(&state));
        found.sort_unstable();
        assert_eq!(found, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_inverted_price_range_is_empty() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default().with_price_range(20_000, 1_000);
        assert!(catalog.query(&state).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_empty() {
        let state = FilterState::default().with_sort(SortMode::Rating);
        assert!(query(&[], &state).is_empty());
        assert!(Catalog::empty().query(&FilterState::default()).is_empty());
    }

    #[test]
    fn test_combined_filters_and_price_sort() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default()
            .with_amenity(Amenity::Ac)
            .with_price_range(10_000, 15_000)
            .with_sort(SortMode::PriceLow);
        assert_eq!(ids(&catalog.query(&state)), vec![4, 1, 7, 6, 2]);

        let state = state.with_sort(SortMode::PriceHigh);
        assert_eq!(ids(&catalog.query(&state)), vec![2, 6, 7, 1, 4]);
    }

    #[test]
    fn test_parking_filter() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default().with_amenity(Amenity::Parking);
        assert_eq!(ids(&catalog.query(&state)), vec![1, 5]);
    }

    #[test]
    fn test_location_filter() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default().with_location("layout");
        assert_eq!(ids(&catalog.query(&state)), vec![2, 3]);

        let state = FilterState::default().with_location("   ");
        assert_eq!(catalog.query(&state).len(), 8);
    }

    #[test]
    fn test_unknown_city_is_empty() {
        let catalog = Catalog::sample().unwrap();
        let state = FilterState::default().with_city("Chennai");
        assert!(catalog.query(&state).is_empty());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    const CITIES: [&str; 3] = ["Bangalore", "Mumbai", "Delhi"];

    fn arb_property() -> impl Strategy<Value = Property> {
        (
            0usize..3,
            0i64..25_000,
            0u8..=50,
            any::<[bool; 4]>(),
            any::<bool>(),
        )
            .prop_map(|(city, price, rating, flags, featured)| {
                let [wifi, ac, food, parking] = flags;
                Property {
                    id: 0,
                    title: "Generated PG".to_string(),
                    location: format!("Sector {}, {}", price % 7, CITIES[city]),
                    city: CITIES[city].to_string(),
                    price_rupees: price,
                    rating: f64::from(rating) / 10.0,
                    room_type: "Single Room".to_string(),
                    description: String::new(),
                    image_url: None,
                    amenities: AmenityFlags { wifi, ac, food, parking },
                    extra_amenities: Vec::new(),
                    is_featured: featured,
                }
            })
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<Property>> {
        prop::collection::vec(arb_property(), 0..24).prop_map(|mut props| {
            for (i, p) in props.iter_mut().enumerate() {
                p.id = i as i64 + 1;
            }
            props
        })
    }

    fn arb_sort() -> impl Strategy<Value = SortMode> {
        prop::sample::select(SortMode::ALL.to_vec())
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            prop::option::of(prop::sample::select(vec!["Bangalore", "mumbai", "DELHI", ""])),
            0i64..25_000,
            0i64..25_000,
            any::<[bool; 4]>(),
            prop::option::of(prop::sample::select(vec!["sector 1", "Sector", "xyz", ""])),
            arb_sort(),
        )
            .prop_map(|(city, min, max, flags, location, sort)| {
                let [wifi, ac, food, parking] = flags;
                FilterState {
                    city: city.map(str::to_string),
                    price: crate::types::PriceRange::new(min, max),
                    amenities: AmenityFlags { wifi, ac, food, parking },
                    location: location.map(str::to_string),
                    dwelling_kind: None,
                    sort,
                }
            })
    }

    proptest! {
        /// Switching on one more amenity never grows the result.
        #[test]
        fn prop_adding_amenity_is_monotone(
            catalog in arb_catalog(),
            state in arb_state(),
            amenity in prop::sample::select(Amenity::ALL.to_vec()),
        ) {
            let before = query(&catalog, &state).len();
            let after = query(&catalog, &state.clone().with_amenity(amenity)).len();
            prop_assert!(after <= before);
        }

        /// Narrowing the price range never grows the result.
        #[test]
        fn prop_narrowing_price_is_monotone(
            catalog in arb_catalog(),
            state in arb_state(),
            shrink in 0i64..5_000,
        ) {
            let before = query(&catalog, &state).len();
            let mut narrow = state.clone();
            narrow.price = crate::types::PriceRange::new(state.price.min + shrink, state.price.max - shrink);
            prop_assert!(query(&catalog, &narrow).len() <= before);
        }

        /// Membership equals the AND of every active predicate.
        #[test]
        fn prop_membership_is_and_of_predicates(
            catalog in arb_catalog(),
            state in arb_state(),
        ) {
            let predicates = state.active_predicates();
            let expected: Vec<i64> = catalog
                .iter()
                .filter(|p| predicates.iter().all(|pr| pr.evaluate(p)))
                .map(|p| p.id)
                .collect();
            let mut found = ids(&query(&catalog, &state));
            found.sort_unstable();
            prop_assert_eq!(found, expected);
        }

        /// The same catalog and state always give the same ordered ids, and
        /// never more properties than the catalog holds.
        #[test]
        fn prop_repeated_query_is_identical(
            catalog in arb_catalog(),
            state in arb_state(),
        ) {
            let first = ids(&query(&catalog, &state));
            let second = ids(&query(&catalog, &state));
            prop_assert!(first.len() <= catalog.len());
            prop_assert_eq!(first, second);
        }

        /// Re-running a query on its own output changes nothing.
        #[test]
        fn prop_query_is_idempotent(
            catalog in arb_catalog(),
            state in arb_state(),
        ) {
            let first: Vec<Property> = query(&catalog, &state).into_iter().cloned().collect();
            let second = query(&first, &state);
            prop_assert_eq!(ids(&second), first.iter().map(|p| p.id).collect::<Vec<_>>());
        }

        /// Results are ordered by the sort key and ties keep catalog order.
        #[test]
        fn prop_sort_is_ordered_and_stable(
            catalog in arb_catalog(),
            sort in arb_sort(),
        ) {
            let state = FilterState::default().with_price_range(0, i64::MAX).with_sort(sort);
            let results = query(&catalog, &state);
            prop_assert_eq!(results.len(), catalog.len());

            for pair in results.windows(2) {
                let ord = sort.compare(pair[0], pair[1]);
                prop_assert!(ord != std::cmp::Ordering::Greater);
                if ord == std::cmp::Ordering::Equal {
                    // ids follow catalog order
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        /// Dwelling kind never affects the result.
        #[test]
        fn prop_dwelling_kind_is_inert(
            catalog in arb_catalog(),
            state in arb_state(),
        ) {
            let mut tagged = state.clone();
            tagged.dwelling_kind = Some(crate::types::DwellingKind::Hostel);
            prop_assert_eq!(ids(&query(&catalog, &state)), ids(&query(&catalog, &tagged)));
        }
    }
}
