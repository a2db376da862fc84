//! `cielo` - Server-rendered weather display with day/night theming
//!
//! This library provides the proxy endpoints, typed upstream fetchers,
//! settings state and the day-period classifier driving the page's theme.

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod page;
pub mod period;
pub mod settings;
pub mod theme;
pub mod web;

// Re-export core types for public API
pub use config::CieloConfig;
pub use error::CieloError;
pub use fetch::{Readings, ReadingsCell};
pub use models::{Forecast, Geo, Settings, WeatherData};
pub use period::{DayPeriod, classify_hour, current_period, period_at};
pub use settings::SettingsStore;
pub use theme::Theme;
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CieloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
