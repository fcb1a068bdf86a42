//! # Booking Commands
//!
//! The booking form: live price summary and submission.
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Flow                                     │
//! │                                                                         │
//! │  Detail page "Book Now"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Form: move-in date, duration (1/3/6/12), room preference               │
//! │       │  get_quote(propertyId, stay)      (on every change)             │
//! │       ▼                                                                 │
//! │  QuoteDto: rent + deposit + fee = due today                             │
//! │       │                                                                 │
//! │       ▼  "Confirm & Pay" with card or cash                              │
//! │  submit_booking ──► re-quote ──► BookingRepository::insert              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BookingDto { id, status: confirmed, totalDueToday, ... }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The amount stored with a booking is always recomputed on the server side
//! from the catalog; a quote the client saw earlier is never trusted.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, DbState};
use dwellnest_core::pricing::quote_with_fee;
use dwellnest_core::{
    BookingStatus, PaymentMethod, Property, RoomPreference, StayConfiguration, StayDuration,
};
use dwellnest_db::{Booking, NewBooking};

/// Stay fields of the booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRequest {
    pub move_in: NaiveDate,
    pub duration_months: u32,
    /// Defaults to the preference suggested by the listing's room type.
    #[serde(default)]
    pub room_preference: Option<RoomPreference>,
}

impl StayRequest {
    fn into_stay(self, property: &Property, today: NaiveDate) -> Result<StayConfiguration, ApiError> {
        let duration = StayDuration::try_from(self.duration_months)?;
        let preference = self
            .room_preference
            .unwrap_or_else(|| RoomPreference::suggested_for(&property.room_type));
        Ok(StayConfiguration::new(self.move_in, duration, preference, today)?)
    }
}

/// Submitted booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub property_id: i64,
    #[serde(flatten)]
    pub stay: StayRequest,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Booking summary sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub property_id: i64,
    pub duration_months: u32,
    pub room_preference: RoomPreference,
    pub monthly_rent: i64,
    pub security_deposit: i64,
    pub service_fee: i64,
    pub total_due_today: i64,
    /// Rent over the whole stay. Informational, not charged today.
    pub stay_rent: i64,
    /// `total_due_today` formatted for display, e.g. "₹25,000"
    pub total_display: String,
}

/// Confirmation page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub property_id: i64,
    pub move_in: NaiveDate,
    pub duration_months: u32,
    pub room_preference: RoomPreference,
    pub payment_method: PaymentMethod,
    pub total_due_today: i64,
    pub status: BookingStatus,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        BookingDto {
            id: b.id,
            property_id: b.property_id,
            move_in: b.move_in,
            duration_months: b.duration.months(),
            room_preference: b.room_preference,
            payment_method: b.payment_method,
            total_due_today: b.total_due_today.amount(),
            status: b.status,
        }
    }
}

/// Today's date on the local clock; move-in dates before it are rejected.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prices a stay at the given property.
///
/// ## Errors
/// - `NOT_FOUND`: property id not in the catalog
/// - `INVALID_ARGUMENT`: duration other than 1, 3, 6 or 12 months
/// - `VALIDATION_ERROR`: move-in date before today
pub fn get_quote(
    catalog: &CatalogState,
    config: &ConfigState,
    property_id: i64,
    stay: StayRequest,
) -> Result<QuoteDto, ApiError> {
    debug!(property_id, "get_quote command");

    let snapshot = catalog.snapshot();
    let property = snapshot.catalog.require(property_id)?;
    let stay = stay.into_stay(property, today())?;
    let quote = quote_with_fee(property, &stay, config.service_fee());

    Ok(QuoteDto {
        property_id,
        duration_months: stay.duration.months(),
        room_preference: stay.room_preference,
        monthly_rent: quote.monthly_rent().amount(),
        security_deposit: quote.security_deposit().amount(),
        service_fee: quote.service_fee().amount(),
        total_due_today: quote.total_due_today().amount(),
        stay_rent: quote.stay_rent(stay.duration).amount(),
        total_display: config.format_currency(quote.total_due_today().amount()),
    })
}

/// Stores a confirmed booking.
///
/// ## Errors
/// Same as [`get_quote`]; also `NOT_FOUND` if the property was deleted from
/// the database after the catalog snapshot was taken.
pub async fn submit_booking(
    db: &DbState,
    catalog: &CatalogState,
    config: &ConfigState,
    request: BookingRequest,
) -> Result<BookingDto, ApiError> {
    debug!(property_id = request.property_id, "submit_booking command");

    let new_booking = {
        let snapshot = catalog.snapshot();
        let property = snapshot.catalog.require(request.property_id)?;
        let stay = request.stay.into_stay(property, today())?;
        let quote = quote_with_fee(property, &stay, config.service_fee());
        NewBooking::new(request.property_id, stay, request.payment_method, quote)
    };

    let booking = db.inner().bookings().insert(&new_booking).await.map_err(|e| match e {
        dwellnest_db::DbError::ForeignKeyViolation { .. } => {
            ApiError::not_found("Property", &request.property_id.to_string())
        }
        other => ApiError::from(other),
    })?;

    info!(
        id = %booking.id,
        property_id = booking.property_id,
        total = booking.total_due_today.amount(),
        "Booking submitted"
    );
    Ok(BookingDto::from(booking))
}

/// Fetches a stored booking for the confirmation page.
pub async fn get_booking(db: &DbState, id: String) -> Result<BookingDto, ApiError> {
    debug!(id = %id, "get_booking command");
    let booking = db
        .inner()
        .bookings()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking", &id))?;
    Ok(BookingDto::from(booking))
}

// =============================================================================
// Unit Tests
// =============================================================================
