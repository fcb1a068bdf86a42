//! # Validation Module
//!
//! Input validation for listings, searches and bookings.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (forms)                                          │
//! │  └── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Catalog load: every Property checked once                         │
//! │  ├── Admin insert: same checks before hitting the database             │
//! │  └── Booking: move-in date not in the past                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK constraints                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The query path itself never validates: a catalog that made it through
//! [`crate::catalog::Catalog::new`] is trusted.
//!
//! ## Usage
//! ```rust
//! use dwellnest_core::validation::{validate_title, validate_price_rupees};
//!
//! assert!(validate_title("Premium PG Near Tech Park").is_ok());
//! assert!(validate_price_rupees(-1).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::Property;
use crate::{MAX_PRICE_RUPEES, MAX_RATING, MAX_SEARCH_QUERY_LEN, MAX_TEXT_FIELD_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a listing title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_required_text("title", title, MAX_TITLE_LEN)
}

/// Validates a city name.
pub fn validate_city(city: &str) -> ValidationResult<()> {
    validate_required_text("city", city, MAX_TEXT_FIELD_LEN)
}

/// Validates a free-text location (locality, address line).
pub fn validate_location(location: &str) -> ValidationResult<()> {
    validate_required_text("location", location, MAX_TEXT_FIELD_LEN)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monthly price in whole rupees.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Must not exceed `MAX_PRICE_RUPEES` (₹1,00,00,000)
///
/// ## Example
/// ```rust
/// use dwellnest_core::validation::validate_price_rupees;
///
/// assert!(validate_price_rupees(12_000).is_ok());
/// assert!(validate_price_rupees(0).is_ok());
/// assert!(validate_price_rupees(-100).is_err());
/// assert!(validate_price_rupees(i64::MAX).is_err());
/// ```
pub fn validate_price_rupees(price: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_RUPEES).contains(&price) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: "0".to_string(),
            max: MAX_PRICE_RUPEES.to_string(),
        });
    }

    Ok(())
}

/// Validates a rating.
///
/// ## Rules
/// - Must be a finite number
/// - Must be between 0.0 and 5.0 inclusive
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "rating".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: "0.0".to_string(),
            max: format!("{:.1}", MAX_RATING),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a move-in date against the caller's notion of today.
///
/// ## User Workflow
/// ```text
/// Booking form: Move-in Date *
///      │
///      ▼
/// validate_move_in_date(date, today) ← THIS FUNCTION
///      │
///      ├── date < today? → Error: "move-in date must be on or after <today>"
///      │
///      └── OK → quote & submit
/// ```
pub fn validate_move_in_date(move_in: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if move_in < today {
        return Err(ValidationError::DateInPast {
            field: "move-in date".to_string(),
            earliest: today.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a listing.
///
/// Used at catalog load and by the admin "add property" path.
pub fn validate_listing(property: &Property) -> ValidationResult<()> {
    validate_title(&property.title)?;
    validate_city(&property.city)?;
    validate_location(&property.location)?;
    validate_price_rupees(property.price_rupees)?;
    validate_rating(property.rating)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AmenityFlags;

    fn listing() -> Property {
        Property {
            id: 1,
            title: "Budget Friendly PG".to_string(),
            location: "BTM Layout, Bangalore".to_string(),
            city: "Bangalore".to_string(),
            price_rupees: 8_000,
            rating: 4.2,
            room_type: "Shared Room".to_string(),
            description: String::new(),
            image_url: None,
            amenities: AmenityFlags::default(),
            extra_amenities: Vec::new(),
            is_featured: false,
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Deluxe Co-living Space").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  Powai ").unwrap(), "Powai");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price_rupees() {
        assert!(validate_price_rupees(0).is_ok());
        assert!(validate_price_rupees(18_000).is_ok());
        assert!(validate_price_rupees(-1).is_err());
        assert!(validate_price_rupees(MAX_PRICE_RUPEES).is_ok());
        assert!(validate_price_rupees(MAX_PRICE_RUPEES + 1).is_err());
        assert!(validate_price_rupees(i64::MAX / 2 + 1).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.8).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_move_in_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(validate_move_in_date(today, today).is_ok());
        assert!(validate_move_in_date(today.succ_opt().unwrap(), today).is_ok());
        assert!(validate_move_in_date(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_listing() {
        assert!(validate_listing(&listing()).is_ok());

        let mut bad = listing();
        bad.city = String::new();
        assert!(matches!(
            validate_listing(&bad),
            Err(ValidationError::Required { ref field }) if field == "city"
        ));

        let mut bad = listing();
        bad.price_rupees = -500;
        assert!(validate_listing(&bad).is_err());
    }
}
