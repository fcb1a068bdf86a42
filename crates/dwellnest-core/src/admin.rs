//! # Admin List Query
//!
//! Search and column sort for the management table.
//!
//! ```text
//! ┌──────┬──────────────────────────┬────────────────────────┬─────────┬───────┐
//! │ ID ▲ │ Title                    │ Location               │ Price   │ Feat. │
//! ├──────┼──────────────────────────┼────────────────────────┼─────────┼───────┤
//! │ 1    │ Premium PG Near Tech ... │ Koramangala, Bangalore │ 12000   │ yes   │
//! │ 2    │ Deluxe Co-living Space   │ HSR Layout, Bangalore  │ 15000   │ yes   │
//! └──────┴──────────────────────────┴────────────────────────┴─────────┴───────┘
//!   search: "bangalore"   (substring of title OR location, any case)
//!   click a header: same column flips asc/desc, new column starts asc
//! ```
//!
//! Unlike the listing query there is no compound tie-break: equal keys keep
//! catalog order in both directions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Property;

// =============================================================================
// Field Values
// =============================================================================

/// A typed, comparable value extracted from one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
    Bool(bool),
}

/// A record the admin table can search and sort.
pub trait AdminRecord {
    /// Sortable columns for this record shape.
    type Field: Copy;

    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of one sortable column.
    fn sort_value(&self, field: Self::Field) -> FieldValue<'_>;
}

// =============================================================================
// Sort Field & Direction
// =============================================================================

/// Sortable columns of the property table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdminSortField {
    #[default]
    Id,
    Title,
    Location,
    Price,
    RoomType,
    Featured,
}

impl AdminSortField {
    pub const ALL: [AdminSortField; 6] = [
        AdminSortField::Id,
        AdminSortField::Title,
        AdminSortField::Location,
        AdminSortField::Price,
        AdminSortField::RoomType,
        AdminSortField::Featured,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AdminSortField::Id => "id",
            AdminSortField::Title => "title",
            AdminSortField::Location => "location",
            AdminSortField::Price => "price",
            AdminSortField::RoomType => "room_type",
            AdminSortField::Featured => "featured",
        }
    }
}

impl FromStr for AdminSortField {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        AdminSortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| {
                CoreError::invalid_argument("sort field", s, &AdminSortField::ALL.map(|f| f.as_str()))
            })
    }
}

impl fmt::Display for AdminSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::invalid_argument("sort direction", other, &["asc", "desc"])),
        }
    }
}

/// Current column sort of the property table. Defaults to id ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminSort {
    pub field: AdminSortField,
    pub direction: SortDirection,
}

impl AdminSort {
    pub const fn new(field: AdminSortField, direction: SortDirection) -> Self {
        AdminSort { field, direction }
    }

    /// Column-header click.
    ///
    /// ```text
    /// (price, asc)  + click price    → (price, desc)
    /// (price, desc) + click price    → (price, asc)
    /// (price, desc) + click title    → (title, asc)
    /// ```
    pub fn toggle(&mut self, field: AdminSortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

impl AdminRecord for Property {
    type Field = AdminSortField;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.location.as_str()]
    }

    fn sort_value(&self, field: AdminSortField) -> FieldValue<'_> {
        match field {
            AdminSortField::Id => FieldValue::Int(self.id),
            AdminSortField::Title => FieldValue::Text(&self.title),
            AdminSortField::Location => FieldValue::Text(&self.location),
            AdminSortField::Price => FieldValue::Int(self.price_rupees),
            AdminSortField::RoomType => FieldValue::Text(&self.room_type),
            AdminSortField::Featured => FieldValue::Bool(self.is_featured),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// Case-insensitive substring match against any searchable field.
///
/// Surrounding whitespace is ignored; a blank term matches every record.
pub fn matches_search<T: AdminRecord>(record: &T, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Filters by search term, then stable-sorts by one field.
///
/// Descending order reverses the comparator rather than the output, so equal
/// keys keep catalog order either way.
pub fn query_generic<'a, T: AdminRecord>(
    records: &'a [T],
    search_term: &str,
    field: T::Field,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut results: Vec<&T> = records
        .iter()
        .filter(|r| matches_search(*r, search_term))
        .collect();

    results.sort_by(|a, b| {
        let ord: Ordering = a.sort_value(field).cmp(&b.sort_value(field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    results
}

/// [`query_generic`] over properties with an [`AdminSort`].
pub fn admin_query<'a>(properties: &'a [Property], search_term: &str, sort: AdminSort) -> Vec<&'a Property> {
    query_generic(properties, search_term, sort.field, sort.direction)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;

    fn ids(results: &[&Property]) -> Vec<i64> {
        results.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_sort_is_id_asc() {
        let catalog = Catalog::sample().unwrap();
        let results = admin_query(catalog.as_slice(), "", AdminSort::default());
        assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_search_title_or_location() {
        let catalog = Catalog::sample().unwrap();

        let results = admin_query(catalog.as_slice(), "MUMBAI", AdminSort::default());
        assert_eq!(ids(&results), vec![5, 6]);

        // "student" only appears in a title
        let results = admin_query(catalog.as_slice(), "student", AdminSort::default());
        assert_eq!(ids(&results), vec![8]);

        let results = admin_query(catalog.as_slice(), "chennai", AdminSort::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_ignores_surrounding_whitespace() {
        let catalog = Catalog::sample().unwrap();

        let results = admin_query(catalog.as_slice(), "  mumbai ", AdminSort::default());
        assert_eq!(ids(&results), vec![5, 6]);

        // Blank behaves like the listing's location search: no narrowing
        let results = admin_query(catalog.as_slice(), "   ", AdminSort::default());
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn test_sort_by_price_desc() {
        let catalog = Catalog::sample().unwrap();
        let sort = AdminSort::new(AdminSortField::Price, SortDirection::Desc);
        let results = admin_query(catalog.as_slice(), "", sort);
        assert_eq!(ids(&results), vec![5, 2, 6, 7, 1, 4, 8, 3]);
    }

    #[test]
    fn test_sort_by_featured_keeps_order_within_ties() {
        let catalog = Catalog::sample().unwrap();

        let asc = AdminSort::new(AdminSortField::Featured, SortDirection::Asc);
        assert_eq!(ids(&admin_query(catalog.as_slice(), "", asc)), vec![3, 4, 6, 7, 8, 1, 2, 5]);

        let desc = AdminSort::new(AdminSortField::Featured, SortDirection::Desc);
        assert_eq!(ids(&admin_query(catalog.as_slice(), "", desc)), vec![1, 2, 5, 3, 4, 6, 7, 8]);
    }

    #[test]
    fn test_sort_by_room_type_text() {
        let catalog = Catalog::sample().unwrap();
        let sort = AdminSort::new(AdminSortField::RoomType, SortDirection::Asc);
        let results = admin_query(catalog.as_slice(), "", sort);
        // Double Sharing, Private x2, Shared, Single x3, Triple
        assert_eq!(ids(&results), vec![7, 2, 5, 3, 1, 4, 6, 8]);
    }

    #[test]
    fn test_toggle() {
        let mut sort = AdminSort::default();
        sort.toggle(AdminSortField::Id);
        assert_eq!(sort, AdminSort::new(AdminSortField::Id, SortDirection::Desc));

        sort.toggle(AdminSortField::Price);
        assert_eq!(sort, AdminSort::new(AdminSortField::Price, SortDirection::Asc));

        sort.toggle(AdminSortField::Price);
        sort.toggle(AdminSortField::Price);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_field_and_direction() {
        assert_eq!("room_type".parse::<AdminSortField>().unwrap(), AdminSortField::RoomType);
        assert!(matches!(
            "rating".parse::<AdminSortField>(),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("down".parse::<SortDirection>().is_err());
    }

    proptest! {
        /// Equal keys keep catalog order in both directions.
        #[test]
        fn prop_generic_sort_is_stable(
            prices in prop::collection::vec(prop::sample::select(vec![8_000i64, 10_000, 12_000]), 0..20),
            desc in any::<bool>(),
        ) {
            let mut properties: Vec<Property> = Vec::new();
            for (i, price) in prices.iter().enumerate() {
                let mut p = Catalog::sample().unwrap().as_slice()[0].clone();
                p.id = i as i64 + 1;
                p.price_rupees = *price;
                properties.push(p);
            }

            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let results = query_generic(&properties, "", AdminSortField::Price, direction);
            prop_assert_eq!(results.len(), properties.len());

            for pair in results.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.price_rupees == b.price_rupees {
                    prop_assert!(a.id < b.id);
                } else if desc {
                    prop_assert!(a.price_rupees > b.price_rupees);
                } else {
                    prop_assert!(a.price_rupees < b.price_rupees);
                }
            }
        }
    }
}
