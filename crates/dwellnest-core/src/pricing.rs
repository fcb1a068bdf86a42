//! # Price Calculator
//!
//! Computes the amounts shown on the booking page.
//!
//! ## Quote Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Premium PG Near Tech Park                 ₹12,000 / month              │
//! │                                                                         │
//! │  Monthly Rent                               ₹12,000                     │
//! │  Security Deposit (1 month)                 ₹12,000                     │
//! │  Service Fee                                 ₹1,000                     │
//! │  ─────────────────────────────────────────────────────                  │
//! │  Total due today                            ₹25,000                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stay duration and room preference do not change the amount due
//! today. [`stay_rent`] gives the rent across the whole stay for display.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::money::Rupees;
use crate::types::{Property, StayConfiguration, StayDuration};
use crate::SERVICE_FEE_RUPEES;

/// Amounts due when booking a property.
///
/// Fields are private so a quote can only come from the calculator and the
/// total always equals the sum of its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    monthly_rent: Rupees,
    security_deposit: Rupees,
    service_fee: Rupees,
    total_due_today: Rupees,
}

impl PriceQuote {
    pub fn monthly_rent(&self) -> Rupees {
        self.monthly_rent
    }

    /// One month's rent.
    pub fn security_deposit(&self) -> Rupees {
        self.security_deposit
    }

    pub fn service_fee(&self) -> Rupees {
        self.service_fee
    }

    /// Rent + deposit + fee.
    pub fn total_due_today(&self) -> Rupees {
        self.total_due_today
    }

    /// Rent across the whole stay. Display only; never part of the total.
    pub fn stay_rent(&self, duration: StayDuration) -> Rupees {
        self.monthly_rent.times_months(duration.months())
    }
}

/// Quotes a property with the standard ₹1,000 service fee.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dwellnest_core::{pricing, Catalog, RoomPreference, StayConfiguration, StayDuration};
///
/// let catalog = Catalog::sample().unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let stay = StayConfiguration::new(today, StayDuration::SixMonths, RoomPreference::Single, today).unwrap();
///
/// let quote = pricing::quote(catalog.get(1).unwrap(), &stay);
/// assert_eq!(quote.total_due_today().amount(), 25_000);
/// ```
pub fn quote(property: &Property, stay: &StayConfiguration) -> PriceQuote {
    quote_with_fee(property, stay, Rupees::new(SERVICE_FEE_RUPEES))
}

/// Quotes a property with a caller-supplied service fee.
pub fn quote_with_fee(property: &Property, _stay: &StayConfiguration, fee: Rupees) -> PriceQuote {
    let rent = property.price();
    let deposit = rent;

    PriceQuote {
        monthly_rent: rent,
        security_deposit: deposit,
        service_fee: fee,
        total_due_today: rent + deposit + fee,
    }
}

/// Rent over the whole stay (`monthly rent × months`). Display only.
pub fn stay_rent(property: &Property, duration: StayDuration) -> Rupees {
    property.price().times_months(duration.months())
}

impl Catalog {
    /// Quotes the property with `id`.
    ///
    /// ## Errors
    /// `PropertyNotFound` when the id is not in the catalog.
    pub fn quote(&self, id: i64, stay: &StayConfiguration) -> CoreResult<PriceQuote> {
        Ok(quote(self.require(id)?, stay))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::RoomPreference;
    use crate::MAX_PRICE_RUPEES;
    use chrono::NaiveDate;

    fn stay(duration: StayDuration, pref: RoomPreference) -> StayConfiguration {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        StayConfiguration::new(today, duration, pref, today).unwrap()
    }

    #[test]
    fn test_quote_premium_pg() {
        let catalog = Catalog::sample().unwrap();
        let q = catalog
            .quote(1, &stay(StayDuration::OneMonth, RoomPreference::Single))
            .unwrap();

        assert_eq!(q.monthly_rent(), Rupees::new(12_000));
        assert_eq!(q.security_deposit(), Rupees::new(12_000));
        assert_eq!(q.service_fee(), Rupees::new(1_000));
        assert_eq!(q.total_due_today(), Rupees::new(25_000));
    }

    #[test]
    fn test_quote_ignores_duration_and_preference() {
        let catalog = Catalog::sample().unwrap();
        let short = catalog
            .quote(8, &stay(StayDuration::OneMonth, RoomPreference::Single))
            .unwrap();
        let long = catalog
            .quote(8, &stay(StayDuration::TwelveMonths, RoomPreference::Triple))
            .unwrap();

        assert_eq!(short, long);
        assert_eq!(short.total_due_today(), Rupees::new(19_000));
    }

    #[test]
    fn test_quote_with_custom_fee() {
        let catalog = Catalog::sample().unwrap();
        let p = catalog.get(3).unwrap();
        let q = quote_with_fee(p, &stay(StayDuration::ThreeMonths, RoomPreference::Double), Rupees::zero());
        assert_eq!(q.total_due_today(), Rupees::new(16_000));
    }

    #[test]
    fn test_quote_unknown_property() {
        let catalog = Catalog::sample().unwrap();
        let err = catalog
            .quote(42, &stay(StayDuration::OneMonth, RoomPreference::Single))
            .unwrap_err();
        assert!(matches!(err, CoreError::PropertyNotFound(42)));
    }

    #[test]
    fn test_stay_rent() {
        let catalog = Catalog::sample().unwrap();
        let p = catalog.get(5).unwrap();
        assert_eq!(stay_rent(p, StayDuration::SixMonths), Rupees::new(108_000));
        assert_eq!(stay_rent(p, StayDuration::OneMonth), p.price());

        let q = quote(p, &stay(StayDuration::SixMonths, RoomPreference::Single));
        assert_eq!(q.stay_rent(StayDuration::SixMonths), Rupees::new(108_000));
        assert_eq!(q.total_due_today(), Rupees::new(37_000));
    }

    #[test]
    fn test_quote_at_price_ceiling() {
        let mut priciest = Catalog::sample().unwrap().get(1).unwrap().clone();
        priciest.price_rupees = MAX_PRICE_RUPEES;
        let catalog = Catalog::new(vec![priciest.clone()]).unwrap();

        let q = catalog
            .quote(1, &stay(StayDuration::TwelveMonths, RoomPreference::Single))
            .unwrap();
        assert_eq!(q.total_due_today(), Rupees::new(2 * MAX_PRICE_RUPEES + 1_000));
        assert_eq!(q.stay_rent(StayDuration::TwelveMonths), Rupees::new(12 * MAX_PRICE_RUPEES));

        // A price large enough to overflow the total never reaches a catalog
        priciest.price_rupees = i64::MAX / 2 + 1;
        let err = Catalog::new(vec![priciest]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let catalog = Catalog::sample().unwrap();
        let q = catalog
            .quote(2, &stay(StayDuration::OneMonth, RoomPreference::Single))
            .unwrap();
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["totalDueToday"], 31_000);
        assert_eq!(json["securityDeposit"], 15_000);
    }
}
