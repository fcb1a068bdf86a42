//! # API Error Types
//!
//! Errors returned by the command layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Error Flow                                     │
//! │                                                                         │
//! │  dwellnest-core                     dwellnest-db                        │
//! │  ──────────────                     ────────────                        │
//! │  CoreError::PropertyNotFound        DbError::NotFound                   │
//! │  CoreError::InvalidArgument         DbError::ForeignKeyViolation        │
//! │  CoreError::Validation              DbError::QueryFailed                │
//! │         │                                  │                            │
//! │         └──────────────┬───────────────────┘                            │
//! │                        ▼                                                │
//! │                ApiError { code, message }                               │
//! │                        │                                                │
//! │                        ▼  serde_json                                    │
//! │     { "code": "NOT_FOUND", "message": "Property not found: 42" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged with their detail and reach the caller as a
//! generic message.

use dwellnest_core::CoreError;
use dwellnest_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_ARGUMENT",
///   "message": "Invalid sort mode 'cheapest': expected one of [...]"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Value outside a closed set: sort mode, admin column, duration (400)
    InvalidArgument,

    /// Listing data disagrees with itself or with existing rows (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Corrupt { entity, id, reason } => {
                tracing::error!(%entity, %id, %reason, "Corrupt row");
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::Core(e) => ApiError::from(e),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PropertyNotFound(id) => ApiError::not_found("Property", &id.to_string()),
            e @ CoreError::InvalidArgument { .. } => {
                ApiError::new(ErrorCode::InvalidArgument, e.to_string())
            }
            e @ CoreError::DuplicatePropertyId(_) => ApiError::new(ErrorCode::Conflict, e.to_string()),
            e @ CoreError::AmenityConflict { .. } => ApiError::new(ErrorCode::Conflict, e.to_string()),
            CoreError::MalformedCatalog(e) => {
                tracing::error!("Malformed catalog: {}", e);
                ApiError::internal("Catalog data could not be read")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Failures while bringing the application up (before any command runs).
#[derive(Debug, Error)]
pub enum StartupError {
    /// No home directory to derive the data directory from.
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    /// The built-in seed listings failed to load.
    #[error("Invalid seed catalog: {0}")]
    Seed(#[from] CoreError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dwellnest_core::ValidationError;

    #[test]
    fn test_property_not_found_maps_to_not_found() {
        let err = ApiError::from(CoreError::PropertyNotFound(42));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Property not found: 42");
    }

    #[test]
    fn test_invalid_argument_keeps_message() {
        let err = ApiError::from(CoreError::invalid_argument("sort mode", "cheapest", &["featured"]));
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("cheapest"));
    }

    #[test]
    fn test_db_core_error_unwraps() {
        let core = CoreError::Validation(ValidationError::Required {
            field: "title".to_string(),
        });
        let err = ApiError::from(DbError::Core(core));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from(DbError::QueryFailed("no such table: properties".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");

        let err = ApiError::from(DbError::corrupt("booking", "b-1", "duration_months 2"));
        assert!(!err.message.contains("duration_months"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Booking", "abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Booking not found: abc");
        assert_eq!(err.to_string(), "[NotFound] Booking not found: abc");
    }
}
