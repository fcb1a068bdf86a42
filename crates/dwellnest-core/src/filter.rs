//! # Filter Predicate Set
//!
//! Pure predicates evaluating one property against one filter dimension.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FilterState                                                            │
//! │  { city: "bangalore", price: 0..=12000, wifi: true, ac: false, ... }    │
//! │       │                                                                 │
//! │       ▼  active_predicates()                                            │
//! │  [ City("bangalore"), Price(0..=12000), Amenity(Wifi) ]                 │
//! │       │                                                                 │
//! │       ▼  AND                                                            │
//! │  property survives iff every active predicate returns true             │
//! │                                                                         │
//! │  Inactive predicates (no city, unset amenity, blank location)           │
//! │  are simply absent from the list, so they never exclude.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The price predicate is always active. With the default range
//! (0..=20000) it behaves as "no filter" for the reference catalog.

use crate::error::{CoreError, CoreResult};
use crate::types::{
    Amenity, AmenityFlags, FilterParams, FilterState, NavigationParams, PriceRange, Property,
    SortMode,
};

// =============================================================================
// Predicate Functions
// =============================================================================

/// City predicate. `None` (or blank) means no city filter.
pub fn matches_city(property: &Property, city: Option<&str>) -> bool {
    match city.map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => property.city.trim().to_lowercase() == city.to_lowercase(),
        None => true,
    }
}

/// Price predicate, inclusive on both bounds. An inverted range rejects all.
#[inline]
pub fn matches_price(property: &Property, range: PriceRange) -> bool {
    range.contains(property.price_rupees)
}

/// Amenity predicate for a single flag.
///
/// `required == false` means the predicate is inactive and always passes.
#[inline]
pub fn matches_amenity(property: &Property, amenity: Amenity, required: bool) -> bool {
    !required || property.has(amenity)
}

/// All four amenity predicates at once.
pub fn matches_amenities(property: &Property, required: AmenityFlags) -> bool {
    Amenity::ALL
        .into_iter()
        .all(|a| matches_amenity(property, a, required.contains(a)))
}

/// Free-text location predicate: case-insensitive substring of `location`.
///
/// An empty query matches everything.
pub fn matches_location(property: &Property, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || property.location.to_lowercase().contains(&query.to_lowercase())
}

// =============================================================================
// Predicate Values
// =============================================================================

/// One active filter dimension, parameterized from a [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    City(String),
    Price(PriceRange),
    Amenity(Amenity),
    Location(String),
}

impl Predicate {
    /// Evaluates this predicate on one property.
    pub fn evaluate(&self, property: &Property) -> bool {
        match self {
            Predicate::City(city) => matches_city(property, Some(city.as_str())),
            Predicate::Price(range) => matches_price(property, *range),
            Predicate::Amenity(amenity) => matches_amenity(property, *amenity, true),
            Predicate::Location(query) => matches_location(property, query),
        }
    }
}

impl FilterState {
    /// Lists the predicates this state activates.
    ///
    /// ## Order
    /// City, price, amenities (canonical order), location. Order has no effect
    /// on the result; it only makes the list deterministic.
    pub fn active_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(7);

        if let Some(city) = self.selected_city() {
            predicates.push(Predicate::City(city.to_string()));
        }

        predicates.push(Predicate::Price(self.price));

        predicates.extend(self.amenities.iter().map(Predicate::Amenity));

        if let Some(query) = self.location_query() {
            predicates.push(Predicate::Location(query.to_string()));
        }

        predicates
    }

    /// AND of every active predicate.
    pub fn matches(&self, property: &Property) -> bool {
        matches_city(property, self.selected_city())
            && matches_price(property, self.price)
            && matches_amenities(property, self.amenities)
            && self
                .location_query()
                .map_or(true, |q| matches_location(property, q))
    }

    /// Seeds a filter state from navigation parameters.
    ///
    /// ## Parameter Handling
    /// ```text
    /// ?city=Mumbai          → city predicate
    /// ?location=Powai       → location predicate (wired in)
    /// ?type=pg              → kept as dwelling_kind, never evaluated
    /// ```
    ///
    /// ## Errors
    /// `InvalidArgument` for a `type` outside pg/flat/hostel.
    pub fn from_navigation(params: &NavigationParams) -> CoreResult<Self> {
        let mut state = FilterState::default();

        state.city = params.city.clone().filter(|c| !c.trim().is_empty());
        state.location = params.location.clone().filter(|l| !l.trim().is_empty());
        state.dwelling_kind = match params.kind.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => Some(kind.parse()?),
            _ => None,
        };

        Ok(state)
    }
}

impl FilterState {
    /// Converts string-typed input. Missing bounds fall back to `defaults`;
    /// an unknown sort name is an error.
    pub fn from_params(params: FilterParams, defaults: PriceRange) -> CoreResult<Self> {
        let sort = match params.sort.as_deref() {
            Some(s) => s.parse::<SortMode>()?,
            None => SortMode::default(),
        };

        Ok(FilterState {
            city: params.city,
            price: PriceRange::new(
                params.price_min.unwrap_or(defaults.min),
                params.price_max.unwrap_or(defaults.max),
            ),
            amenities: AmenityFlags {
                wifi: params.wifi,
                ac: params.ac,
                food: params.food,
                parking: params.parking,
            },
            location: params.location,
            dwelling_kind: None,
            sort,
        })
    }
}

impl TryFrom<FilterParams> for FilterState {
    type Error = CoreError;

    /// Converts with the default price range as the fallback.
    fn try_from(params: FilterParams) -> CoreResult<Self> {
        FilterState::from_params(params, PriceRange::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
