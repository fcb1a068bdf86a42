//! # Admin Commands
//!
//! The admin property table and listing maintenance.
//!
//! ```text
//! admin_list / admin_search / admin_toggle_sort
//!     └── AdminListState.with_results ──► admin_query (catalog snapshot)
//!
//! admin_add_property / admin_update_property / admin_delete_property
//!     └── PropertyRepository ──► CatalogState::reload ──► new version
//!                                     (listing memo is invalidated)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::listing::PropertyDto;
use crate::error::ApiError;
use crate::state::{AdminListState, CatalogState, DbState};
use dwellnest_core::validation::validate_search_query;
use dwellnest_core::{AdminSort, AdminSortField, AmenityFlags, CoreError, Property};

/// The admin table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListDto {
    pub search: String,
    pub sort: AdminSort,
    pub rows: Vec<PropertyDto>,
}

/// Add/edit listing form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub title: String,
    pub location: String,
    pub city: String,
    pub price_rupees: i64,
    #[serde(default)]
    pub rating: f64,
    pub room_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub amenities: AmenityFlags,
    #[serde(default)]
    pub extra_amenities: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl PropertyInput {
    fn into_property(self, id: i64) -> Property {
        Property {
            id,
            title: self.title,
            location: self.location,
            city: self.city,
            price_rupees: self.price_rupees,
            rating: self.rating,
            room_type: self.room_type,
            description: self.description,
            image_url: self.image_url,
            amenities: self.amenities,
            extra_amenities: self.extra_amenities,
            is_featured: self.is_featured,
        }
    }
}

/// Returns the table for the current search and sort.
pub fn admin_list(catalog: &CatalogState, admin: &AdminListState) -> AdminListDto {
    admin.with_results(catalog, |search, sort, rows| AdminListDto {
        search: search.to_string(),
        sort,
        rows: rows.iter().map(|p| PropertyDto::from(*p)).collect(),
    })
}

/// Sets the search box (title or location, case-insensitive).
pub fn admin_search(
    catalog: &CatalogState,
    admin: &AdminListState,
    term: String,
) -> Result<AdminListDto, ApiError> {
    let term = validate_search_query(&term).map_err(CoreError::from)?;
    debug!(term = %term, "admin_search command");
    admin.set_search(term);
    Ok(admin_list(catalog, admin))
}

/// Column-header click by column name (`id`, `title`, `price`, ...).
pub fn admin_toggle_sort(
    catalog: &CatalogState,
    admin: &AdminListState,
    field: String,
) -> Result<AdminListDto, ApiError> {
    let field: AdminSortField = field.parse()?;
    let sort = admin.toggle_sort(field);
    debug!(field = %sort.field, direction = ?sort.direction, "admin_toggle_sort command");
    Ok(admin_list(catalog, admin))
}

/// Adds a listing; the database assigns the id.
pub async fn admin_add_property(
    db: &DbState,
    catalog: &CatalogState,
    input: PropertyInput,
) -> Result<PropertyDto, ApiError> {
    debug!(title = %input.title, "admin_add_property command");

    let stored = db.inner().properties().insert(&input.into_property(0)).await?;
    catalog.reload(db.inner()).await?;

    info!(id = stored.id, city = %stored.city, "Property added");
    Ok(PropertyDto::from(&stored))
}

/// Replaces every field of an existing listing.
pub async fn admin_update_property(
    db: &DbState,
    catalog: &CatalogState,
    id: i64,
    input: PropertyInput,
) -> Result<PropertyDto, ApiError> {
    debug!(id, "admin_update_property command");

    db.inner().properties().update(&input.into_property(id)).await?;
    catalog.reload(db.inner()).await?;

    let snapshot = catalog.snapshot();
    let property = snapshot.catalog.require(id)?;
    info!(id, "Property updated");
    Ok(PropertyDto::from(property))
}

/// Deletes a listing and its bookings.
pub async fn admin_delete_property(
    db: &DbState,
    catalog: &CatalogState,
    id: i64,
) -> Result<(), ApiError> {
    debug!(id, "admin_delete_property command");

    db.inner().properties().delete(id).await?;
    catalog.reload(db.inner()).await?;

    info!(id, "Property deleted");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::listing::list_properties;
    use crate::error::ErrorCode;
    use crate::state::ListingState;
    use dwellnest_core::{Catalog, SortDirection};
    use dwellnest_db::{Database, DbConfig};

    async fn setup() -> (DbState, CatalogState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.properties().insert_catalog(&Catalog::sample().unwrap()).await.unwrap();
        let catalog = db.properties().load_catalog().await.unwrap();
        (DbState::new(db), CatalogState::new(catalog))
    }

    fn input(title: &str, price: i64) -> PropertyInput {
        PropertyInput {
            title: title.to_string(),
            location: "Salt Lake, Kolkata".to_string(),
            city: "Kolkata".to_string(),
            price_rupees: price,
            rating: 4.1,
            room_type: "Single Room".to_string(),
            description: "Quiet PG near the metro.".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                wifi: true,
                ..AmenityFlags::default()
            },
            extra_amenities: vec!["WiFi".to_string(), "Laundry".to_string()],
            is_featured: false,
        }
    }

    fn ids(dto: &AdminListDto) -> Vec<i64> {
        dto.rows.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_admin_search_and_sort() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let admin = AdminListState::new();

        assert_eq!(ids(&admin_list(&catalog, &admin)), vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let dto = admin_search(&catalog, &admin, "  Bangalore ".to_string()).unwrap();
        assert_eq!(dto.search, "Bangalore");
        assert_eq!(ids(&dto), vec![1, 2, 3, 4]);

        let dto = admin_toggle_sort(&catalog, &admin, "price".to_string()).unwrap();
        assert_eq!(ids(&dto), vec![3, 4, 1, 2]);

        let dto = admin_toggle_sort(&catalog, &admin, "price".to_string()).unwrap();
        assert_eq!(dto.sort.direction, SortDirection::Desc);
        assert_eq!(ids(&dto), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_admin_toggle_unknown_column() {
        let catalog = CatalogState::new(Catalog::sample().unwrap());
        let admin = AdminListState::new();

        let err = admin_toggle_sort(&catalog, &admin, "rating".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(admin.sort(), AdminSort::default());
    }

    #[tokio::test]
    async fn test_add_property_reloads_catalog() {
        let (db, catalog) = setup().await;
        let listing = ListingState::new();
        assert_eq!(list_properties(&catalog, &listing).count, 8);

        let added = admin_add_property(&db, &catalog, input("Lakeview PG", 7_500)).await.unwrap();
        assert_eq!(added.id, 9);
        // Flag amenity dropped from extras
        assert_eq!(added.amenity_names, vec!["WiFi", "Laundry"]);

        assert_eq!(catalog.version(), 2);
        assert_eq!(list_properties(&catalog, &listing).count, 9);
    }

    #[tokio::test]
    async fn test_add_property_validation() {
        let (db, catalog) = setup().await;

        let err = admin_add_property(&db, &catalog, input("", 7_500)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut conflicting = input("AC Claimed", 7_500);
        conflicting.extra_amenities = vec!["AC".to_string()];
        let err = admin_add_property(&db, &catalog, conflicting).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        // Nothing stored, catalog untouched
        assert_eq!(catalog.version(), 1);
        assert_eq!(db.inner().properties().count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_update_and_delete_property() {
        let (db, catalog) = setup().await;

        let updated = admin_update_property(&db, &catalog, 3, input("Renovated PG", 9_500))
            .await
            .unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(updated.price_rupees, 9_500);
        assert_eq!(catalog.snapshot().catalog.get(3).map(|p| p.city.as_str()), Some("Kolkata"));

        admin_delete_property(&db, &catalog, 3).await.unwrap();
        assert!(catalog.snapshot().catalog.get(3).is_none());
        assert_eq!(catalog.version(), 3);

        let err = admin_delete_property(&db, &catalog, 3).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = admin_update_property(&db, &catalog, 42, input("Ghost", 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
