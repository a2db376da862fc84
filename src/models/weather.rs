//! Current-conditions model as shaped from the weather upstream

use serde::{Deserialize, Serialize};

/// Current weather for a location, replaced wholesale on every fetch
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherData {
    /// Resolved location the readings belong to
    pub location: ApiLocation,
    /// Current conditions block
    pub current: CurrentConditions,
}

/// Location block as reported by the weather upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiLocation {
    /// Location name (city)
    pub name: String,
    /// Administrative region
    pub region: String,
    /// Country name
    pub country: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

/// Current conditions readouts shown on the page
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Temperature in Fahrenheit
    pub temp_f: f64,
    /// Wind speed in km/h
    pub wind_kph: f64,
    /// Cardinal wind direction (e.g. "NNW")
    pub wind_dir: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// UV index
    pub uv: f64,
    /// Feels-like temperature in Celsius
    pub feelslike_c: f64,
    /// Condition descriptor
    pub condition: Condition,
}

/// Weather condition descriptor from the upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Upstream's own description text
    pub text: String,
    /// Upstream icon URL fragment (unused for rendering, kept for relay)
    pub icon: String,
    /// Numeric condition code, keys the icon/description table
    pub code: u16,
}

impl WeatherData {
    /// Temperature rounded for the big readout
    #[must_use]
    pub fn rounded_temp(&self) -> i64 {
        self.current.temp_c.round() as i64
    }

    /// Feels-like temperature rounded for the readout row
    #[must_use]
    pub fn rounded_feelslike(&self) -> i64 {
        self.current.feelslike_c.round() as i64
    }
}
