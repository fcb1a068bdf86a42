//! # Property Catalog
//!
//! An immutable, ordered collection of validated properties. The input to
//! every query.
//!
//! ## Loading
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw records (JSON, database rows)                                      │
//! │  { amenities: ["WiFi", "Laundry"], hasWifi: true, hasAC: false, ... }   │
//! │       │                                                                 │
//! │       ▼  Property::from(record)                                         │
//! │  flags { wifi }   extras ["WiFi", "Laundry"]                            │
//! │       │                                                                 │
//! │       ▼  Catalog::new                                                   │
//! │  1. validate_listing (title, city, price 0..=1 crore, rating 0..=5)     │
//! │  2. reconcile names vs flags                                            │
//! │       "WiFi" + flag set    → dropped from extras (derived instead)      │
//! │       "AC"   + flag unset  → AmenityConflict                            │
//! │  3. reject duplicate ids                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog (order preserved, never mutated)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog is a snapshot. Edits produce a new catalog; holders of the old
//! one keep seeing the old data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Amenity, AmenityFlags, Property};
use crate::validation;

// =============================================================================
// Raw Record
// =============================================================================

/// A listing as supplied by the catalog source, before reconciliation.
///
/// Field names follow the listing JSON (`hasWifi`, `hasAC`, `isFeatured`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: i64,
    pub rating: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    pub room_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default, rename = "hasAC")]
    pub has_ac: bool,
    #[serde(default)]
    pub has_food: bool,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub city: String,
}

impl From<PropertyRecord> for Property {
    /// Copies the record as-is. All names go to `extra_amenities`;
    /// [`Catalog::new`] reconciles them against the flags.
    fn from(r: PropertyRecord) -> Self {
        Property {
            id: r.id,
            title: r.title,
            location: r.location,
            city: r.city,
            price_rupees: r.price,
            rating: r.rating,
            room_type: r.room_type,
            description: r.description,
            image_url: r.image,
            amenities: AmenityFlags {
                wifi: r.has_wifi,
                ac: r.has_ac,
                food: r.has_food,
                parking: r.has_parking,
            },
            extra_amenities: r.amenities,
            is_featured: r.is_featured,
        }
    }
}

/// Validates one listing and reconciles its amenity names with its flags.
///
/// Runs for every property entering a catalog and for admin inserts.
pub fn normalize_listing(mut property: Property) -> CoreResult<Property> {
    validation::validate_listing(&property)?;
    reconcile_amenities(&mut property)?;
    Ok(property)
}

/// Drops flag amenities from the extras list, failing on a name whose flag
/// is unset.
fn reconcile_amenities(property: &mut Property) -> CoreResult<()> {
    let mut extras = Vec::with_capacity(property.extra_amenities.len());

    for name in property.extra_amenities.drain(..) {
        match Amenity::from_label(&name) {
            Some(amenity) if property.amenities.contains(amenity) => {}
            Some(amenity) => {
                return Err(CoreError::AmenityConflict {
                    id: property.id,
                    amenity: amenity.label().to_string(),
                })
            }
            None if extras.contains(&name) => {}
            None => extras.push(name),
        }
    }

    property.extra_amenities = extras;
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// Validated, ordered, immutable property collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    properties: Vec<Property>,
    index: HashMap<i64, usize>,
}

impl Catalog {
    /// Builds a catalog, validating and reconciling every property.
    ///
    /// ## Errors
    /// - `Validation` for a bad title, city, location, price or rating
    /// - `AmenityConflict` when a listed amenity contradicts its flag
    /// - `DuplicatePropertyId` when two properties share an id
    pub fn new(properties: Vec<Property>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(properties.len());
        let mut validated = Vec::with_capacity(properties.len());

        for (position, property) in properties.into_iter().enumerate() {
            let property = normalize_listing(property)?;

            if index.insert(property.id, position).is_some() {
                return Err(CoreError::DuplicatePropertyId(property.id));
            }
            validated.push(property);
        }

        Ok(Catalog {
            properties: validated,
            index,
        })
    }

    /// Builds a catalog from raw listing records.
    pub fn from_records(records: Vec<PropertyRecord>) -> CoreResult<Self> {
        Catalog::new(records.into_iter().map(Property::from).collect())
    }

    /// Parses a JSON array of listing records.
    ///
    /// ## Example
    /// ```rust
    /// use dwellnest_core::catalog::Catalog;
    ///
    /// let json = r#"[{
    ///     "id": 1, "title": "Budget Friendly PG", "location": "BTM Layout, Bangalore",
    ///     "price": 8000, "rating": 4.2, "roomType": "Shared Room",
    ///     "amenities": ["WiFi", "Food"], "hasWifi": true, "hasFood": true,
    ///     "city": "Bangalore"
    /// }]"#;
    /// let catalog = Catalog::from_json(json).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let records: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Catalog::from_records(records)
    }

    /// An empty catalog. Every query over it is empty.
    pub fn empty() -> Self {
        Catalog::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// All properties in catalog order.
    pub fn as_slice(&self) -> &[Property] {
        &self.properties
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// Looks up a property by id.
    pub fn get(&self, id: i64) -> Option<&Property> {
        self.index.get(&id).map(|&i| &self.properties[i])
    }

    /// Looks up a property by id, failing with `PropertyNotFound`.
    pub fn require(&self, id: i64) -> CoreResult<&Property> {
        self.get(id).ok_or(CoreError::PropertyNotFound(id))
    }

    /// Distinct city names in first-seen order (for the city selector).
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for p in &self.properties {
            if !cities.contains(&p.city.as_str()) {
                cities.push(&p.city);
            }
        }
        cities
    }

    /// Featured properties in catalog order (home page strip).
    pub fn featured(&self) -> Vec<&Property> {
        self.properties.iter().filter(|p| p.is_featured).collect()
    }

    /// Lowest and highest monthly price, `None` for an empty catalog.
    pub fn price_bounds(&self) -> Option<(i64, i64)> {
        let min = self.properties.iter().map(|p| p.price_rupees).min()?;
        let max = self.properties.iter().map(|p| p.price_rupees).max()?;
        Some((min, max))
    }

    /// The eight reference listings (Bangalore, Mumbai, Delhi).
    pub fn sample() -> CoreResult<Self> {
        Catalog::from_records(sample_records())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

// =============================================================================
// Sample Data
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn record(
    id: i64,
    title: &str,
    location: &str,
    price: i64,
    rating: f64,
    room_type: &str,
    amenities: &[&str],
    flags: [bool; 4],
    is_featured: bool,
    city: &str,
    description: &str,
) -> PropertyRecord {
    let [has_wifi, has_ac, has_food, has_parking] = flags;
    PropertyRecord {
        id,
        title: title.to_string(),
        location: location.to_string(),
        price,
        rating,
        image: None,
        description: description.to_string(),
        room_type: room_type.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        has_wifi,
        has_ac,
        has_food,
        has_parking,
        is_featured,
        city: city.to_string(),
    }
}

/// Raw records for [`Catalog::sample`], also used by the database seeder.
pub fn sample_records() -> Vec<PropertyRecord> {
    vec![
        record(
            1,
            "Premium PG Near Tech Park",
            "Koramangala, Bangalore",
            12_000,
            4.8,
            "Single Room",
            &["WiFi", "AC", "Food", "Laundry", "Cleaning", "TV"],
            [true, true, true, true],
            true,
            "Bangalore",
            "Modern PG accommodation with all amenities near major tech parks.",
        ),
        record(
            2,
            "Deluxe Co-living Space",
            "HSR Layout, Bangalore",
            15_000,
            4.9,
            "Private Room",
            &["WiFi", "AC", "Food", "Gym", "Recreation Room", "Housekeeping"],
            [true, true, true, false],
            true,
            "Bangalore",
            "Premium co-living space with modern amenities and private rooms.",
        ),
        record(
            3,
            "Budget Friendly PG",
            "BTM Layout, Bangalore",
            8_000,
            4.2,
            "Shared Room",
            &["WiFi", "Food", "Common Area", "Laundry"],
            [true, false, true, false],
            false,
            "Bangalore",
            "Affordable PG with basic amenities. Shared rooms available.",
        ),
        record(
            4,
            "Women's PG Near Metro",
            "Indiranagar, Bangalore",
            10_500,
            4.5,
            "Single Room",
            &["WiFi", "AC", "Food", "Laundry", "Security"],
            [true, true, true, false],
            false,
            "Bangalore",
            "Ladies PG accommodation with premium facilities and CCTV.",
        ),
        record(
            5,
            "Luxury PG with Terrace",
            "Powai, Mumbai",
            18_000,
            4.7,
            "Private Room",
            &["WiFi", "AC", "Food", "Gym", "Terrace Garden", "TV"],
            [true, true, true, true],
            true,
            "Mumbai",
            "High-end PG accommodation with terrace garden and premium amenities.",
        ),
        record(
            6,
            "Working Professional PG",
            "Andheri, Mumbai",
            14_000,
            4.4,
            "Single Room",
            &["WiFi", "AC", "Food", "Work Desk", "Power Backup"],
            [true, true, true, false],
            false,
            "Mumbai",
            "PG designed for working professionals with quiet zones and work areas.",
        ),
        record(
            7,
            "Centrally Located PG",
            "Connaught Place, Delhi",
            13_500,
            4.3,
            "Double Sharing",
            &["WiFi", "AC", "Food", "Housekeeping", "Security"],
            [true, true, true, false],
            false,
            "Delhi",
            "PG accommodation in the heart of Delhi with easy access to markets.",
        ),
        record(
            8,
            "Student Housing Near University",
            "North Campus, Delhi",
            9_000,
            4.0,
            "Triple Sharing",
            &["WiFi", "Food", "Study Area", "Library", "Common Room"],
            [true, false, true, false],
            false,
            "Delhi",
            "Affordable PG options for students near Delhi University.",
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = Catalog::sample().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.cities(), vec!["Bangalore", "Mumbai", "Delhi"]);
        assert_eq!(catalog.price_bounds(), Some((8_000, 18_000)));

        let featured: Vec<i64> = catalog.featured().iter().map(|p| p.id).collect();
        assert_eq!(featured, vec![1, 2, 5]);
    }

    #[test]
    fn test_broken_fixture_is_an_error() {
        let mut records = sample_records();
        records.push(records[0].clone());
        assert!(matches!(
            Catalog::from_records(records),
            Err(CoreError::DuplicatePropertyId(1))
        ));

        let mut records = sample_records();
        records[2].price = -1;
        assert!(Catalog::from_records(records).is_err());
    }

    #[test]
    fn test_amenity_names_are_derived_from_flags() {
        let catalog = Catalog::sample().unwrap();
        let premium = catalog.get(1).unwrap();

        // Parking is flagged but absent from the raw list; it still shows up.
        assert_eq!(
            premium.amenity_names(),
            vec!["WiFi", "AC", "Food", "Parking", "Laundry", "Cleaning", "TV"]
        );
        assert_eq!(premium.extra_amenities, vec!["Laundry", "Cleaning", "TV"]);
    }

    #[test]
    fn test_conflicting_amenity_is_rejected() {
        let mut records = sample_records();
        records[2].amenities.push("AC".to_string());

        let err = Catalog::from_records(records).unwrap_err();
        assert!(matches!(err, CoreError::AmenityConflict { id: 3, .. }));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut records = sample_records();
        records[7].id = 1;

        let err = Catalog::from_records(records).unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePropertyId(1)));
    }

    #[test]
    fn test_negative_price_is_rejected_at_load() {
        let mut records = sample_records();
        records[0].price = -1;

        let err = Catalog::from_records(records).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_get_and_require() {
        let catalog = Catalog::sample().unwrap();
        assert_eq!(catalog.get(5).map(|p| p.city.as_str()), Some("Mumbai"));
        assert!(catalog.get(99).is_none());
        assert!(matches!(
            catalog.require(99),
            Err(CoreError::PropertyNotFound(99))
        ));
    }

    #[test]
    fn test_from_json_reads_listing_field_names() {
        let json = r#"[{
            "id": 4, "title": "Women's PG Near Metro", "location": "Indiranagar, Bangalore",
            "price": 10500, "rating": 4.5, "roomType": "Single Room",
            "amenities": ["WiFi", "AC", "Security"],
            "hasWifi": true, "hasAC": true, "hasFood": false, "hasParking": false,
            "isFeatured": false, "city": "Bangalore"
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let p = catalog.get(4).unwrap();
        assert!(p.amenities.ac);
        assert_eq!(p.extra_amenities, vec!["Security"]);

        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CoreError::MalformedCatalog(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.price_bounds(), None);
        assert!(catalog.cities().is_empty());
    }
}
