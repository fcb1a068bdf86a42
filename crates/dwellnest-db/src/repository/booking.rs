//! # Booking Repository
//!
//! The booking submission target: stores a stay configuration together with
//! the quote it was priced at.
//!
//! ```text
//! StayConfiguration ──┐
//! PriceQuote ─────────┼──► NewBooking ──► insert() ──► Booking { id: uuid, status: confirmed }
//! PaymentMethod ──────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dwellnest_core::{
    BookingStatus, PaymentMethod, PriceQuote, RoomPreference, Rupees, StayConfiguration,
    StayDuration,
};

// =============================================================================
// Types
// =============================================================================

/// A booking ready to be stored.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: i64,
    pub stay: StayConfiguration,
    pub payment_method: PaymentMethod,
    pub quote: PriceQuote,
}

impl NewBooking {
    pub fn new(
        property_id: i64,
        stay: StayConfiguration,
        payment_method: PaymentMethod,
        quote: PriceQuote,
    ) -> Self {
        NewBooking {
            property_id,
            stay,
            payment_method,
            quote,
        }
    }
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property_id: i64,
    pub move_in: NaiveDate,
    pub duration: StayDuration,
    pub room_preference: RoomPreference,
    pub payment_method: PaymentMethod,
    pub monthly_rent: Rupees,
    pub security_deposit: Rupees,
    pub service_fee: Rupees,
    pub total_due_today: Rupees,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    property_id: i64,
    move_in: NaiveDate,
    duration_months: i64,
    room_preference: RoomPreference,
    payment_method: PaymentMethod,
    monthly_rent: i64,
    security_deposit: i64,
    service_fee: i64,
    total_due_today: i64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DbError;

    fn try_from(row: BookingRow) -> DbResult<Self> {
        let duration = u32::try_from(row.duration_months)
            .ok()
            .and_then(|m| StayDuration::try_from(m).ok())
            .ok_or_else(|| {
                DbError::corrupt("booking", &row.id, format!("duration_months {}", row.duration_months))
            })?;

        Ok(Booking {
            id: row.id,
            property_id: row.property_id,
            move_in: row.move_in,
            duration,
            room_preference: row.room_preference,
            payment_method: row.payment_method,
            monthly_rent: Rupees::new(row.monthly_rent),
            security_deposit: Rupees::new(row.security_deposit),
            service_fee: Rupees::new(row.service_fee),
            total_due_today: Rupees::new(row.total_due_today),
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, property_id, move_in, duration_months, room_preference, payment_method,
        monthly_rent, security_deposit, service_fee, total_due_today,
        status, created_at, updated_at
    FROM bookings
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Stores a booking as `confirmed`.
    ///
    /// ## Returns
    /// * `Ok(Booking)` - The stored booking with its new UUID
    /// * `Err(DbError::ForeignKeyViolation)` - property id doesn't exist
    pub async fn insert(&self, booking: &NewBooking) -> DbResult<Booking> {
        let now = Utc::now();
        let stored = Booking {
            id: Uuid::new_v4().to_string(),
            property_id: booking.property_id,
            move_in: booking.stay.move_in,
            duration: booking.stay.duration,
            room_preference: booking.stay.room_preference,
            payment_method: booking.payment_method,
            monthly_rent: booking.quote.monthly_rent(),
            security_deposit: booking.quote.security_deposit(),
            service_fee: booking.quote.service_fee(),
            total_due_today: booking.quote.total_due_today(),
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %stored.id,
            property_id = stored.property_id,
            total = stored.total_due_today.amount(),
            "Inserting booking"
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, property_id, move_in, duration_months, room_preference, payment_method,
                monthly_rent, security_deposit, service_fee, total_due_today,
                status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&stored.id)
        .bind(stored.property_id)
        .bind(stored.move_in)
        .bind(i64::from(stored.duration.months()))
        .bind(stored.room_preference)
        .bind(stored.payment_method)
        .bind(stored.monthly_rent.amount())
        .bind(stored.security_deposit.amount())
        .bind(stored.service_fee.amount())
        .bind(stored.total_due_today.amount())
        .bind(stored.status)
        .bind(stored.created_at)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await?;

        info!(id = %stored.id, property_id = stored.property_id, "Booking confirmed");
        Ok(stored)
    }

    /// Gets a booking by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    /// Lists bookings for one property, oldest first.
    pub async fn list_for_property(&self, property_id: i64) -> DbResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{} WHERE property_id = ?1 ORDER BY created_at, rowid",
            SELECT_COLUMNS
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
