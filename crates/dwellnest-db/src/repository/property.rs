//! # Property Repository
//!
//! Catalog persistence: the external source the query engine loads from,
//! and the target of admin edits.
//!
//! ## Catalog Refresh
//! ```text
//! admin_add_property / admin_delete_property
//!      │
//!      ▼
//! PropertyRepository::insert / delete
//!      │
//!      ▼
//! PropertyRepository::load_catalog() ──► new Catalog snapshot
//!      │
//!      ▼
//! CatalogState::replace (version bump, listing memo invalidated)
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use dwellnest_core::catalog::normalize_listing;
use dwellnest_core::{AmenityFlags, Catalog, Property};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        title,
        location,
        city,
        price_rupees,
        rating,
        room_type,
        description,
        image_url,
        has_wifi,
        has_ac,
        has_food,
        has_parking,
        extra_amenities,
        is_featured
    FROM properties
"#;

/// One `properties` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct PropertyRow {
    id: i64,
    title: String,
    location: String,
    city: String,
    price_rupees: i64,
    rating: f64,
    room_type: String,
    description: String,
    image_url: Option<String>,
    has_wifi: bool,
    has_ac: bool,
    has_food: bool,
    has_parking: bool,
    extra_amenities: String,
    is_featured: bool,
}

impl TryFrom<PropertyRow> for Property {
    type Error = DbError;

    fn try_from(row: PropertyRow) -> DbResult<Self> {
        let extra_amenities: Vec<String> = serde_json::from_str(&row.extra_amenities)
            .map_err(|e| DbError::corrupt("property", row.id, format!("extra_amenities: {}", e)))?;

        Ok(Property {
            id: row.id,
            title: row.title,
            location: row.location,
            city: row.city,
            price_rupees: row.price_rupees,
            rating: row.rating,
            room_type: row.room_type,
            description: row.description,
            image_url: row.image_url,
            amenities: AmenityFlags {
                wifi: row.has_wifi,
                ac: row.has_ac,
                food: row.has_food,
                parking: row.has_parking,
            },
            extra_amenities,
            is_featured: row.is_featured,
        })
    }
}

fn encode_extras(property: &Property) -> DbResult<String> {
    serde_json::to_string(&property.extra_amenities)
        .map_err(|e| DbError::Internal(format!("encode extra_amenities: {}", e)))
}

/// Repository for property database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.properties();
///
/// let catalog = repo.load_catalog().await?;
/// let property = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Lists every property in catalog order (ascending id).
    pub async fn list_all(&self) -> DbResult<Vec<Property>> {
        let rows: Vec<PropertyRow> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Loaded property rows");
        rows.into_iter().map(Property::try_from).collect()
    }

    /// Gets a property by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Property))` - Property found
    /// * `Ok(None)` - Property not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Property>> {
        let row: Option<PropertyRow> = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Property::try_from).transpose()
    }

    /// Builds a validated catalog snapshot from every stored property.
    ///
    /// ## Errors
    /// * `DbError::Core` - a stored listing breaks a catalog rule
    /// * `DbError::Corrupt` - a row cannot be decoded
    pub async fn load_catalog(&self) -> DbResult<Catalog> {
        let properties = self.list_all().await?;
        let catalog = Catalog::new(properties)?;
        info!(count = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Inserts a new property.
    ///
    /// The listing is validated and its amenity names reconciled with its
    /// flags before it reaches the database. An `id` of zero or less lets
    /// SQLite assign the next id.
    ///
    /// ## Returns
    /// * `Ok(Property)` - The stored property (with its final id)
    /// * `Err(DbError::UniqueViolation)` - id already exists
    /// * `Err(DbError::Core)` - validation or amenity conflict
    pub async fn insert(&self, property: &Property) -> DbResult<Property> {
        let property = normalize_listing(property.clone())?;
        debug!(id = property.id, title = %property.title, "Inserting property");

        let now = Utc::now();
        let explicit_id = (property.id > 0).then_some(property.id);
        let extras = encode_extras(&property)?;

        let result = sqlx::query(
            r#"
            INSERT INTO properties (
                id, title, location, city, price_rupees, rating, room_type,
                description, image_url, has_wifi, has_ac, has_food, has_parking,
                extra_amenities, is_featured, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)
            "#,
        )
        .bind(explicit_id)
        .bind(&property.title)
        .bind(&property.location)
        .bind(&property.city)
        .bind(property.price_rupees)
        .bind(property.rating)
        .bind(&property.room_type)
        .bind(&property.description)
        .bind(&property.image_url)
        .bind(property.amenities.wifi)
        .bind(property.amenities.ac)
        .bind(property.amenities.food)
        .bind(property.amenities.parking)
        .bind(extras)
        .bind(property.is_featured)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, property.id),
            other => other,
        })?;

        let id = result.last_insert_rowid();
        info!(id, "Property inserted");

        Ok(Property { id, ..property })
    }

    /// Updates an existing property.
    ///
    /// ## Returns
    /// * `Ok(())` - Property updated
    /// * `Err(DbError::NotFound)` - Property doesn't exist
    pub async fn update(&self, property: &Property) -> DbResult<()> {
        let property = normalize_listing(property.clone())?;
        debug!(id = property.id, "Updating property");

        let result = sqlx::query(
            r#"
            UPDATE properties SET
                title = ?2,
                location = ?3,
                city = ?4,
                price_rupees = ?5,
                rating = ?6,
                room_type = ?7,
                description = ?8,
                image_url = ?9,
                has_wifi = ?10,
                has_ac = ?11,
                has_food = ?12,
                has_parking = ?13,
                extra_amenities = ?14,
                is_featured = ?15,
                updated_at = ?16
            WHERE id = ?1
            "#,
        )
        .bind(property.id)
        .bind(&property.title)
        .bind(&property.location)
        .bind(&property.city)
        .bind(property.price_rupees)
        .bind(property.rating)
        .bind(&property.room_type)
        .bind(&property.description)
        .bind(&property.image_url)
        .bind(property.amenities.wifi)
        .bind(property.amenities.ac)
        .bind(property.amenities.food)
        .bind(property.amenities.parking)
        .bind(encode_extras(&property)?)
        .bind(property.is_featured)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Property", property.id));
        }

        Ok(())
    }

    /// Deletes a property. Its bookings go with it.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Property doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting property");

        let result = sqlx::query("DELETE FROM properties WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Property", id));
        }

        info!(id, "Property deleted");
        Ok(())
    }

    /// Counts stored properties.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts every property of `catalog` in one transaction.
    ///
    /// Used by the seeder and first-run startup.
    pub async fn insert_catalog(&self, catalog: &Catalog) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for property in catalog {
            sqlx::query(
                r#"
                INSERT INTO properties (
                    id, title, location, city, price_rupees, rating, room_type,
                    description, image_url, has_wifi, has_ac, has_food, has_parking,
                    extra_amenities, is_featured, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)
                "#,
            )
            .bind(property.id)
            .bind(&property.title)
            .bind(&property.location)
            .bind(&property.city)
            .bind(property.price_rupees)
            .bind(property.rating)
            .bind(&property.room_type)
            .bind(&property.description)
            .bind(&property.image_url)
            .bind(property.amenities.wifi)
            .bind(property.amenities.ac)
            .bind(property.amenities.food)
            .bind(property.amenities.parking)
            .bind(encode_extras(property)?)
            .bind(property.is_featured)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(count = catalog.len(), "Catalog inserted");
        Ok(catalog.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
