//! Configuration management for the `cielo` application
//!
//! Configuration is environment-only: API credentials for the upstream
//! services and a handful of overridable defaults. There is no config file.

use serde::{Deserialize, Serialize};
use std::env;

use crate::Result;
use crate::error::CieloError;

/// Root configuration structure for the `cielo` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CieloConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Upstream API configuration
    pub upstream: UpstreamConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the web server on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Weather API credential, appended to weather/forecast upstream calls
    #[serde(default)]
    pub weather_api_key: String,
    /// Maps API credential, appended to geocoding/timezone upstream calls
    #[serde(default)]
    pub maps_api_key: String,
    /// Base URL of the weather API
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Base URL of the geocoding API
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    /// Base URL of the timezone API
    #[serde(default = "default_timezone_base_url")]
    pub timezone_base_url: String,
    /// Number of forecast days to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_geocode_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

fn default_timezone_base_url() -> String {
    "https://maps.googleapis.com/maps/api/timezone".to_string()
}

fn default_forecast_days() -> u8 {
    3
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            weather_api_key: String::new(),
            maps_api_key: String::new(),
            weather_base_url: default_weather_base_url(),
            geocode_base_url: default_geocode_base_url(),
            timezone_base_url: default_timezone_base_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for CieloConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl CieloConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing credential is not an error here: the proxy endpoints pass
    /// whatever they hold through to the upstream, which rejects it.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("CIELO_PORT").ok() {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|err| CieloError::config(format!("Invalid CIELO_PORT value '{raw}': {err}")))?,
            None => default_port(),
        };

        Ok(Self {
            server: ServerConfig { port },
            upstream: UpstreamConfig {
                weather_api_key: env::var("WEATHER_API_KEY").unwrap_or_default(),
                maps_api_key: env::var("GOOGLE_MAPS_KEY").unwrap_or_default(),
                weather_base_url: env::var("CIELO_WEATHER_BASE_URL")
                    .unwrap_or_else(|_| default_weather_base_url()),
                geocode_base_url: env::var("CIELO_GEOCODE_BASE_URL")
                    .unwrap_or_else(|_| default_geocode_base_url()),
                timezone_base_url: env::var("CIELO_TIMEZONE_BASE_URL")
                    .unwrap_or_else(|_| default_timezone_base_url()),
                forecast_days: default_forecast_days(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CieloConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.forecast_days, 3);
        assert!(config.upstream.weather_base_url.starts_with("https://"));
        assert!(config.upstream.weather_api_key.is_empty());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        unsafe { env::set_var("CIELO_PORT", "not-a-port") };
        let err = CieloConfig::from_env().unwrap_err();
        unsafe { env::remove_var("CIELO_PORT") };
        assert!(matches!(err, CieloError::Config { .. }));
        assert!(err.to_string().contains("CIELO_PORT"));
    }
}
