//! # Money Module
//!
//! Provides the `Rupees` type for monthly rents, deposits and fees.
//!
//! ## Why Whole Rupees?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listing prices are quoted per month in whole rupees:                   │
//! │                                                                         │
//! │    "Premium PG Near Tech Park"   ₹12000 / month                         │
//! │                                                                         │
//! │  No paise, no floating point. Every quote is integer arithmetic:        │
//! │    rent 12000 + deposit 12000 + fee 1000 = 25000                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dwellnest_core::money::Rupees;
//!
//! let rent = Rupees::new(12_000);
//! let total = rent + rent + Rupees::new(1_000);
//! assert_eq!(total.amount(), 25_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Rupees Type
// =============================================================================

/// A monetary amount in whole Indian rupees.
///
/// Signed so that intermediate differences are representable; catalog prices
/// are validated non-negative at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rupees(i64);

impl Rupees {
    /// Creates an amount from whole rupees.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Rupees(amount)
    }

    /// Returns the amount in whole rupees.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Rupees(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a monthly amount by a number of months.
    ///
    /// ## Example
    /// ```rust
    /// use dwellnest_core::money::Rupees;
    ///
    /// assert_eq!(Rupees::new(8_000).times_months(6).amount(), 48_000);
    /// ```
    #[inline]
    pub const fn times_months(&self, months: u32) -> Self {
        Rupees(self.0 * months as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain debug display (`₹12000`). Grouped formatting lives in the app config.
impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}", sign, self.0.abs())
    }
}

impl Default for Rupees {
    fn default() -> Self {
        Rupees::zero()
    }
}

impl Add for Rupees {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Rupees(self.0 + other.0)
    }
}

impl AddAssign for Rupees {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Mul<i64> for Rupees {
    type Output = Self;

    #[inline]
    fn mul(self, factor: i64) -> Self {
        Rupees(self.0 * factor)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Rupees>>(iter: I) -> Self {
        iter.fold(Rupees::zero(), |acc, r| acc + r)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
