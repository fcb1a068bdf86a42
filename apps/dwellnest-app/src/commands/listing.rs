//! # Listing Commands
//!
//! The property listing view: filters, sort, navigation and the home page
//! strips.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Listing Flow                                      │
//! │                                                                         │
//! │  Home page city tile "Mumbai"                                           │
//! │       │  apply_navigation({ city: "Mumbai" })                           │
//! │       ▼                                                                 │
//! │  ListingState.replace(FilterState::from_navigation)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sidebar: tick AC, drag slider to 15000, pick "Price: Low to High"      │
//! │       │  update_filters({ city, priceMax: 15000, ac: true,              │
//! │       │                   sort: "price_low" })                          │
//! │       ▼                                                                 │
//! │  ListingState.with_results ──► Catalog::query (memoized)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ListingDto { filters, count, properties: [PropertyDto] }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, ListingState};
use dwellnest_core::validation::validate_search_query;
use dwellnest_core::{AmenityFlags, FilterParams, FilterState, NavigationParams, Property};

/// Property card / detail DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub city: String,
    pub price_rupees: i64,
    pub rating: f64,
    pub room_type: String,
    pub description: String,
    pub image_url: Option<String>,
    pub amenities: AmenityFlags,
    /// Display list: flagged amenities first, then extras.
    pub amenity_names: Vec<String>,
    pub is_featured: bool,
}

impl From<&Property> for PropertyDto {
    fn from(p: &Property) -> Self {
        PropertyDto {
            id: p.id,
            title: p.title.clone(),
            location: p.location.clone(),
            city: p.city.clone(),
            price_rupees: p.price_rupees,
            rating: p.rating,
            room_type: p.room_type.clone(),
            description: p.description.clone(),
            image_url: p.image_url.clone(),
            amenities: p.amenities,
            amenity_names: p.amenity_names(),
            is_featured: p.is_featured,
        }
    }
}

/// The listing view: active selections and the matching properties.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub filters: FilterState,
    /// "N properties found"
    pub count: usize,
    pub properties: Vec<PropertyDto>,
}

/// Returns the listing for the current selections.
pub fn list_properties(catalog: &CatalogState, listing: &ListingState) -> ListingDto {
    listing.with_results(catalog, |filters, properties| ListingDto {
        filters: filters.clone(),
        count: properties.len(),
        properties: properties.iter().map(|p| PropertyDto::from(*p)).collect(),
    })
}

/// Enters the listing view from a home page link or the search bar.
///
/// Replaces all selections: `city` and `location` pre-fill their filters,
/// `type` is kept on the state but does not narrow results.
///
/// ## Errors
/// - `VALIDATION_ERROR` when `location` is longer than 100 characters
/// - `INVALID_ARGUMENT` for a `type` other than pg/flat/hostel
pub fn apply_navigation(
    catalog: &CatalogState,
    listing: &ListingState,
    params: NavigationParams,
) -> Result<ListingDto, ApiError> {
    debug!(?params, "apply_navigation command");

    if let Some(location) = &params.location {
        validate_search_query(location).map_err(dwellnest_core::CoreError::from)?;
    }
    let mut filters = FilterState::from_navigation(&params)?;
    filters.price = listing.default_price();
    listing.replace(filters);

    Ok(list_properties(catalog, listing))
}

/// Applies the sidebar form.
///
/// A missing price bound falls back to the configured slider range; an
/// unknown sort name is rejected and leaves the current selections untouched.
pub fn update_filters(
    catalog: &CatalogState,
    listing: &ListingState,
    params: FilterParams,
) -> Result<ListingDto, ApiError> {
    debug!(?params, "update_filters command");

    if let Some(location) = &params.location {
        validate_search_query(location).map_err(dwellnest_core::CoreError::from)?;
    }
    let filters = FilterState::from_params(params, listing.default_price())?;
    listing.replace(filters);

    let dto = list_properties(catalog, listing);
    info!(count = dto.count, sort = %dto.filters.sort, "Listing updated");
    Ok(dto)
}

/// "Clear All".
pub fn clear_filters(catalog: &CatalogState, listing: &ListingState) -> ListingDto {
    debug!("clear_filters command");
    listing.clear();
    list_properties(catalog, listing)
}

/// Distinct cities for the city selector.
pub fn list_cities(catalog: &CatalogState) -> Vec<String> {
    let snapshot = catalog.snapshot();
    snapshot.catalog.cities().into_iter().map(str::to_string).collect()
}

/// Featured properties for the home page, in catalog order.
pub fn featured_properties(catalog: &CatalogState) -> Vec<PropertyDto> {
    let snapshot = catalog.snapshot();
    snapshot.catalog.featured().into_iter().map(PropertyDto::from).collect()
}

/// Property detail page.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog.
pub fn get_property(catalog: &CatalogState, id: i64) -> Result<PropertyDto, ApiError> {
    debug!(id, "get_property command");
    let snapshot = catalog.snapshot();
    let property = snapshot.catalog.require(id)?;
    Ok(PropertyDto::from(property))
}

// =============================================================================
// Unit Tests
// =============================================================================
