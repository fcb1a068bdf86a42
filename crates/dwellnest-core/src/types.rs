//! # Domain Types
//!
//! Core domain types used throughout DwellNest.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Property     │   │   FilterState   │   │ StayConfiguration│      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  city           │   │  move_in        │       │
//! │  │  title, city    │   │  price range    │   │  duration       │       │
//! │  │  price_rupees   │   │  amenity flags  │   │  room pref      │       │
//! │  │  rating         │   │  location text  │   └─────────────────┘       │
//! │  │  amenity flags  │   │  sort mode      │                              │
//! │  │  is_featured    │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Amenity      │   │    SortMode     │   │  StayDuration   │       │
//! │  │  Wifi, Ac,      │   │  Featured       │   │  1, 3, 6, 12    │       │
//! │  │  Food, Parking  │   │  PriceLow/High  │   │  months         │       │
//! │  └─────────────────┘   │  Rating         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Amenities: One Source of Truth
//! The four searchable amenities live in [`AmenityFlags`]. Everything else a
//! listing advertises (Laundry, Gym, ...) is kept in `extra_amenities`. The
//! display list is derived by [`Property::amenity_names`], so flags and names
//! can never drift apart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Rupees;
use crate::validation;
use crate::{DEFAULT_PRICE_CEILING, DEFAULT_PRICE_FLOOR};

// =============================================================================
// Amenity
// =============================================================================

/// The four amenities a user can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Ac,
    Food,
    Parking,
}

impl Amenity {
    /// Every filterable amenity, in canonical display order.
    pub const ALL: [Amenity; 4] = [Amenity::Wifi, Amenity::Ac, Amenity::Food, Amenity::Parking];

    /// Display label as it appears in listing amenity lists.
    pub const fn label(&self) -> &'static str {
        match self {
            Amenity::Wifi => "WiFi",
            Amenity::Ac => "AC",
            Amenity::Food => "Food",
            Amenity::Parking => "Parking",
        }
    }

    /// Matches a free-form amenity name against the four labels.
    ///
    /// Case-insensitive; `"wifi"`, `"WiFi"` and `"WIFI"` all match.
    pub fn from_label(name: &str) -> Option<Amenity> {
        let name = name.trim();
        Amenity::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Amenity Flags
// =============================================================================

/// Independent boolean flags, one per [`Amenity`].
///
/// On a [`Property`] a flag means "has this amenity". On a filter it means
/// "only show properties that have this amenity"; unset flags never exclude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AmenityFlags {
    pub wifi: bool,
    pub ac: bool,
    pub food: bool,
    pub parking: bool,
}

impl AmenityFlags {
    /// No amenities set.
    pub const fn none() -> Self {
        AmenityFlags {
            wifi: false,
            ac: false,
            food: false,
            parking: false,
        }
    }

    /// Returns whether the flag for `amenity` is set.
    pub const fn contains(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Wifi => self.wifi,
            Amenity::Ac => self.ac,
            Amenity::Food => self.food,
            Amenity::Parking => self.parking,
        }
    }

    /// Sets or clears the flag for `amenity`.
    pub fn set(&mut self, amenity: Amenity, on: bool) {
        match amenity {
            Amenity::Wifi => self.wifi = on,
            Amenity::Ac => self.ac = on,
            Amenity::Food => self.food = on,
            Amenity::Parking => self.parking = on,
        }
    }

    /// Builder-style variant of [`AmenityFlags::set`].
    pub fn with(mut self, amenity: Amenity) -> Self {
        self.set(amenity, true);
        self
    }

    /// Iterates the set flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ALL.into_iter().filter(|a| self.contains(*a))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

// =============================================================================
// Property
// =============================================================================

/// One rentable room/unit listing.
///
/// Created once at catalog load and never mutated by the query engine.
/// Edits and deletes go through the persistence layer, which then hands the
/// engine a fresh catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Property {
    /// Catalog key, unique within a catalog.
    pub id: i64,

    /// Display title, never empty.
    pub title: String,

    /// Free-text locality, e.g. "Koramangala, Bangalore".
    pub location: String,

    /// City name, matched case-insensitively.
    pub city: String,

    /// Monthly rent in whole rupees (non-negative).
    pub price_rupees: i64,

    /// Average rating, 0.0 to 5.0.
    pub rating: f64,

    /// Occupancy label, e.g. "Single Room", "Double Sharing".
    pub room_type: String,

    pub description: String,

    pub image_url: Option<String>,

    /// The four filterable amenities. Source of truth.
    pub amenities: AmenityFlags,

    /// Advertised amenities outside the four flags (Laundry, Gym, ...).
    pub extra_amenities: Vec<String>,

    pub is_featured: bool,
}

impl Property {
    /// Returns the monthly rent as Rupees.
    #[inline]
    pub fn price(&self) -> Rupees {
        Rupees::new(self.price_rupees)
    }

    /// Checks whether the property has `amenity`.
    #[inline]
    pub fn has(&self, amenity: Amenity) -> bool {
        self.amenities.contains(amenity)
    }

    /// Derived display list: flagged amenities first, then extras.
    ///
    /// ## Example
    /// ```text
    /// flags  { wifi, food }  extras ["Laundry"]
    ///   └──► ["WiFi", "Food", "Laundry"]
    /// ```
    pub fn amenity_names(&self) -> Vec<String> {
        self.amenities
            .iter()
            .map(|a| a.label().to_string())
            .chain(self.extra_amenities.iter().cloned())
            .collect()
    }
}

// =============================================================================
// Sort Mode
// =============================================================================

/// Listing sort modes (closed enumeration).
///
/// Comparators live in [`crate::sort`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Featured first, then by rating (descending).
    #[default]
    Featured,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Best rated first.
    Rating,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Featured,
        SortMode::PriceLow,
        SortMode::PriceHigh,
        SortMode::Rating,
    ];

    /// Wire name, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortMode::Featured => "featured",
            SortMode::PriceLow => "price_low",
            SortMode::PriceHigh => "price_high",
            SortMode::Rating => "rating",
        }
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    /// Parses a wire name. Unknown names fail; there is no fallback order.
    fn from_str(s: &str) -> CoreResult<Self> {
        SortMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| {
                CoreError::invalid_argument(
                    "sort mode",
                    s,
                    &SortMode::ALL.map(|m| m.as_str()),
                )
            })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive monthly price bounds.
///
/// An inverted range (`min > max`) is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub const fn new(min: i64, max: i64) -> Self {
        PriceRange { min, max }
    }

    /// Inclusive on both ends. Always false for an inverted range.
    #[inline]
    pub const fn contains(&self, price: i64) -> bool {
        self.min <= price && price <= self.max
    }

    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::new(DEFAULT_PRICE_FLOOR, DEFAULT_PRICE_CEILING)
    }
}

// =============================================================================
// Dwelling Kind
// =============================================================================

/// Dwelling kind chosen on the home-page search bar (`type=` parameter).
///
/// Retained on the filter for the caller but never evaluated: catalog room
/// types describe occupancy ("Single Room"), not dwelling kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DwellingKind {
    Pg,
    Flat,
    Hostel,
}

impl DwellingKind {
    pub const ALL: [DwellingKind; 3] = [DwellingKind::Pg, DwellingKind::Flat, DwellingKind::Hostel];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DwellingKind::Pg => "pg",
            DwellingKind::Flat => "flat",
            DwellingKind::Hostel => "hostel",
        }
    }
}

impl FromStr for DwellingKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        DwellingKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::invalid_argument("dwelling type", s, &DwellingKind::ALL.map(|k| k.as_str()))
            })
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// The full set of filter/sort selections for one query.
///
/// A plain value: the engine reads it and keeps nothing. Callers own it and
/// re-run the query whenever it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterState {
    /// Selected city. `None` or blank means no city filter.
    pub city: Option<String>,

    pub price: PriceRange,

    /// Required amenities. Unset flags are inactive.
    pub amenities: AmenityFlags,

    /// Free-text location search. `None` or blank matches everything.
    pub location: Option<String>,

    /// Carried from navigation, not evaluated.
    pub dwelling_kind: Option<DwellingKind>,

    pub sort: SortMode,
}

impl FilterState {
    /// Returns the city to filter by, skipping blank selections.
    pub fn selected_city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Returns the location search text, skipping blank input.
    pub fn location_query(&self) -> Option<&str> {
        self.location.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_price_range(mut self, min: i64, max: i64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.set(amenity, true);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Resets every selection ("Clear All").
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }
}

/// String-typed filter input as received from a caller (query string, JSON).
///
/// Converted into [`FilterState`] with `TryFrom`; see [`crate::filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParams {
    pub city: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub wifi: bool,
    pub ac: bool,
    pub food: bool,
    pub parking: bool,
    pub location: Option<String>,
    pub sort: Option<String>,
}

/// Parameters carried by navigation into the listing view.
///
/// `city` comes from the city tiles on the home page, `location` and `type`
/// from the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct NavigationParams {
    pub city: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// =============================================================================
// Stay Configuration
// =============================================================================

/// Length of stay offered at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum StayDuration {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl StayDuration {
    pub const ALL: [StayDuration; 4] = [
        StayDuration::OneMonth,
        StayDuration::ThreeMonths,
        StayDuration::SixMonths,
        StayDuration::TwelveMonths,
    ];

    pub const fn months(&self) -> u32 {
        match self {
            StayDuration::OneMonth => 1,
            StayDuration::ThreeMonths => 3,
            StayDuration::SixMonths => 6,
            StayDuration::TwelveMonths => 12,
        }
    }
}

impl Default for StayDuration {
    fn default() -> Self {
        StayDuration::OneMonth
    }
}

impl TryFrom<u32> for StayDuration {
    type Error = CoreError;

    fn try_from(months: u32) -> CoreResult<Self> {
        StayDuration::ALL
            .into_iter()
            .find(|d| d.months() == months)
            .ok_or_else(|| {
                CoreError::invalid_argument("stay duration", months.to_string(), &["1", "3", "6", "12"])
            })
    }
}

impl From<StayDuration> for u32 {
    fn from(d: StayDuration) -> u32 {
        d.months()
    }
}

/// Room preference picked on the booking form. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoomPreference {
    #[default]
    Single,
    Double,
    Triple,
}

impl RoomPreference {
    /// Suggests a preference from a listing's room type label.
    ///
    /// ```rust
    /// use dwellnest_core::types::RoomPreference;
    ///
    /// assert_eq!(RoomPreference::suggested_for("Single Room"), RoomPreference::Single);
    /// assert_eq!(RoomPreference::suggested_for("Triple Sharing"), RoomPreference::Triple);
    /// assert_eq!(RoomPreference::suggested_for("Private Room"), RoomPreference::Double);
    /// ```
    pub fn suggested_for(room_type: &str) -> Self {
        let room_type = room_type.to_lowercase();
        if room_type.contains("single") {
            RoomPreference::Single
        } else if room_type.contains("triple") {
            RoomPreference::Triple
        } else {
            RoomPreference::Double
        }
    }
}

/// Move-in date, duration and room preference for a booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StayConfiguration {
    #[ts(as = "String")]
    pub move_in: NaiveDate,

    #[ts(as = "u32")]
    pub duration: StayDuration,

    pub room_preference: RoomPreference,
}

impl StayConfiguration {
    /// Creates a stay configuration, rejecting move-in dates before `today`.
    ///
    /// `today` is supplied by the caller so the engine never reads the clock.
    pub fn new(
        move_in: NaiveDate,
        duration: StayDuration,
        room_preference: RoomPreference,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        validation::validate_move_in_date(move_in, today)?;
        Ok(StayConfiguration {
            move_in,
            duration,
            room_preference,
        })
    }
}

// =============================================================================
// Booking
// =============================================================================

/// How the tenant pays at check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// Cash on arrival.
    Cash,
}

/// Lifecycle of a submitted booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amenity_from_label() {
        assert_eq!(Amenity::from_label("WiFi"), Some(Amenity::Wifi));
        assert_eq!(Amenity::from_label(" wifi "), Some(Amenity::Wifi));
        assert_eq!(Amenity::from_label("ac"), Some(Amenity::Ac));
        assert_eq!(Amenity::from_label("Laundry"), None);
    }

    #[test]
    fn test_amenity_flags_iter_is_canonical() {
        let flags = AmenityFlags::none().with(Amenity::Parking).with(Amenity::Wifi);
        let set: Vec<_> = flags.iter().collect();
        assert_eq!(set, vec![Amenity::Wifi, Amenity::Parking]);
        assert!(!flags.is_empty());
        assert!(AmenityFlags::default().is_empty());
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("featured".parse::<SortMode>().unwrap(), SortMode::Featured);
        assert_eq!("price_low".parse::<SortMode>().unwrap(), SortMode::PriceLow);
        assert_eq!("price_high".parse::<SortMode>().unwrap(), SortMode::PriceHigh);
        assert_eq!("rating".parse::<SortMode>().unwrap(), SortMode::Rating);

        let err = "cheapest".parse::<SortMode>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_sort_mode_default() {
        assert_eq!(SortMode::default(), SortMode::Featured);
    }

    #[test]
    fn test_sort_mode_serde_names() {
        let json = serde_json::to_string(&SortMode::PriceHigh).unwrap();
        assert_eq!(json, "\"price_high\"");
    }

    #[test]
    fn test_price_range() {
        let range = PriceRange::new(8_000, 12_000);
        assert!(range.contains(8_000));
        assert!(range.contains(12_000));
        assert!(!range.contains(12_001));

        let inverted = PriceRange::new(20_000, 1_000);
        assert!(inverted.is_inverted());
        assert!(!inverted.contains(5_000));
    }

    #[test]
    fn test_filter_state_blank_city_is_inactive() {
        let state = FilterState::default().with_city("   ");
        assert_eq!(state.selected_city(), None);

        let state = FilterState::default().with_city(" Mumbai ");
        assert_eq!(state.selected_city(), Some("Mumbai"));
    }

    #[test]
    fn test_filter_state_clear() {
        let mut state = FilterState::default()
            .with_city("Delhi")
            .with_amenity(Amenity::Ac)
            .with_sort(SortMode::Rating);
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_stay_duration_try_from() {
        assert_eq!(StayDuration::try_from(6).unwrap(), StayDuration::SixMonths);
        assert!(StayDuration::try_from(2).is_err());
        assert!(StayDuration::try_from(0).is_err());
    }

    #[test]
    fn test_stay_duration_serde_as_number() {
        let json = serde_json::to_string(&StayDuration::TwelveMonths).unwrap();
        assert_eq!(json, "12");

        let parsed: StayDuration = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, StayDuration::ThreeMonths);

        assert!(serde_json::from_str::<StayDuration>("5").is_err());
    }

    #[test]
    fn test_stay_configuration_rejects_past_move_in() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        assert!(StayConfiguration::new(today, StayDuration::OneMonth, RoomPreference::Single, today).is_ok());

        let err = StayConfiguration::new(yesterday, StayDuration::OneMonth, RoomPreference::Single, today)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_dwelling_kind_parse() {
        assert_eq!("PG".parse::<DwellingKind>().unwrap(), DwellingKind::Pg);
        assert!("castle".parse::<DwellingKind>().is_err());
    }
}
