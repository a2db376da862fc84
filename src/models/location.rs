//! Location and settings models
//!
//! `Geo` is the coarse seed injected into the initial page request; `Settings`
//! is the durable user-selected location that drives every downstream fetch.

use serde::{Deserialize, Serialize};

/// Coarse location seed, sourced once at initial page load
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Geo {
    /// City name
    #[serde(default)]
    pub city: String,
    /// Administrative region
    #[serde(default)]
    pub region: String,
    /// Country name
    #[serde(default)]
    pub country: String,
}

/// Durable user-selected location and its resolved timezone
///
/// Created with an empty city; replaced wholesale by the location-picker flow
/// or the initial geo-seeding step, never merged.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Selected city, empty until seeded or picked
    pub city: String,
    /// Administrative region of the selected city
    pub region: String,
    /// Country of the selected city
    pub country: String,
    /// IANA timezone of the selected city, when resolved
    pub timezone: Option<String>,
}

impl Settings {
    /// Whether a location has been chosen yet
    #[must_use]
    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }

    /// Seed from coarse geo data, leaving the timezone unresolved
    #[must_use]
    pub fn from_geo(geo: Geo) -> Self {
        Self {
            city: geo.city,
            region: geo.region,
            country: geo.country,
            timezone: None,
        }
    }
}

/// Single geocoding match from the geocoding upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoMatch {
    /// Formatted place name
    pub name: String,
    /// Country name, when reported
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Timezone lookup result consumed by `Settings`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimezoneInfo {
    /// IANA timezone name (e.g. "Europe/Madrid")
    pub timezone_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_have_no_city() {
        let settings = Settings::default();
        assert!(!settings.has_city());
        assert!(settings.timezone.is_none());
    }

    #[test]
    fn test_seed_from_geo() {
        let geo = Geo {
            city: "Madrid".to_string(),
            region: "Madrid".to_string(),
            country: "ES".to_string(),
        };
        let settings = Settings::from_geo(geo);
        assert!(settings.has_city());
        assert_eq!(settings.city, "Madrid");
        // Seeding never guesses a timezone; the picker flow resolves it
        assert!(settings.timezone.is_none());
    }
}
