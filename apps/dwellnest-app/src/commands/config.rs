//! # Config Commands
//!
//! Retrieves application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (currency symbol, price slider bounds)
/// - Booking summary (service fee line)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_returns_copy() {
        let config = ConfigState::default();
        assert_eq!(get_config(&config), config);
    }
}
