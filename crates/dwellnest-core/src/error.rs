//! # Error Types
//!
//! Domain-specific error types for dwellnest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dwellnest-core errors (this file)                                     │
//! │  ├── CoreError        - Domain failures (bad sort mode, missing id)    │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  dwellnest-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → UI           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - An inverted price range (`min > max`) yields an empty result.
//! - An empty catalog yields an empty result.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller passed a value outside a closed enumeration.
    ///
    /// ## When This Occurs
    /// - Unknown sort mode string (`"cheapest"` instead of `"price_low"`)
    /// - Unknown admin sort field
    /// - Stay duration other than 1, 3, 6 or 12 months
    ///
    /// The composer never falls back to a default order when this happens.
    #[error("Invalid {field} '{value}': expected one of {allowed:?}")]
    InvalidArgument {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Property id is not part of the catalog.
    #[error("Property not found: {0}")]
    PropertyNotFound(i64),

    /// Two catalog records share the same id.
    #[error("Duplicate property id in catalog: {0}")]
    DuplicatePropertyId(i64),

    /// Amenity flags and amenity names disagree for a record.
    ///
    /// ## Example
    /// ```text
    /// { id: 9, amenities: ["WiFi", "AC"], hasAC: false }
    ///                              ^^^^         ^^^^^ conflict
    /// ```
    #[error("Property {id} lists amenity {amenity} but its flag is not set")]
    AmenityConflict { id: i64, amenity: String },

    /// Catalog JSON could not be parsed.
    #[error("Malformed catalog data: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidArgument error from anything string-like.
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: &[&str],
    ) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            value: value.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a listing or booking field doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Invalid format (e.g., NaN rating).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Date lies before the earliest allowed date.
    #[error("{field} must be on or after {earliest}")]
    DateInPast { field: String, earliest: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = CoreError::invalid_argument("sort mode", "cheapest", &["featured", "rating"]);
        assert_eq!(
            err.to_string(),
            "Invalid sort mode 'cheapest': expected one of [\"featured\", \"rating\"]"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::DateInPast {
            field: "move-in date".to_string(),
            earliest: "2026-10-19".to_string(),
        };
        assert_eq!(err.to_string(), "move-in date must be on or after 2026-10-19");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "city".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_amenity_conflict_message() {
        let err = CoreError::AmenityConflict {
            id: 9,
            amenity: "AC".to_string(),
        };
        assert_eq!(err.to_string(), "Property 9 lists amenity AC but its flag is not set");
    }
}
