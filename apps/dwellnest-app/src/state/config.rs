//! # Configuration State
//!
//! Read-only settings loaded once at startup.
//!
//! ## Sources
//! ```text
//! Default (₹, fee 1000, slider ceiling 20000)
//!     │
//!     ▼
//! DWELLNEST_* environment variables override individual fields
//! ```

use serde::{Deserialize, Serialize};

use dwellnest_core::{Rupees, DEFAULT_PRICE_CEILING, MAX_PRICE_RUPEES, SERVICE_FEE_RUPEES};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Product name shown in headers and logs
    pub app_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Flat booking fee in rupees
    pub service_fee_rupees: i64,

    /// Upper end of the price slider; also the listing's default filter maximum
    pub price_ceiling: i64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            app_name: "DwellNest".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            service_fee_rupees: SERVICE_FEE_RUPEES,
            price_ceiling: DEFAULT_PRICE_CEILING,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DWELLNEST_APP_NAME`: Override the display name
    /// - `DWELLNEST_CURRENCY_SYMBOL`: Override the currency symbol
    /// - `DWELLNEST_SERVICE_FEE`: Booking fee in whole rupees (e.g., "1500")
    /// - `DWELLNEST_PRICE_CEILING`: Price slider maximum in rupees
    ///
    /// Unparseable, negative or above-`MAX_PRICE_RUPEES` numbers are ignored.
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(name) = std::env::var("DWELLNEST_APP_NAME") {
            config.app_name = name;
        }

        if let Ok(symbol) = std::env::var("DWELLNEST_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(fee) = env_rupees("DWELLNEST_SERVICE_FEE") {
            config.service_fee_rupees = fee;
        }

        if let Some(ceiling) = env_rupees("DWELLNEST_PRICE_CEILING") {
            config.price_ceiling = ceiling;
        }

        config
    }

    pub fn service_fee(&self) -> Rupees {
        Rupees::new(self.service_fee_rupees)
    }

    /// Formats a rupee amount with Indian digit grouping.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(12000), "₹12,000");
    /// assert_eq!(config.format_currency(125000), "₹1,25,000");
    /// ```
    pub fn format_currency(&self, rupees: i64) -> String {
        let sign = if rupees < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_symbol, group_indian(rupees.unsigned_abs()))
    }
}

fn env_rupees(key: &str) -> Option<i64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| (0..=MAX_PRICE_RUPEES).contains(v))
}

/// Last three digits, then pairs: 12345678 → "1,23,45,678".
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
