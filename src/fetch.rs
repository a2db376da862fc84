//! Typed fetchers for the upstream weather, geocoding and timezone APIs
//!
//! These shape upstream JSON into the crate's records and feed the page
//! through a `ReadingsCell`. Fetches run sequentially (weather, then
//! forecast) and are never cancelled; instead, every fetch carries the
//! settings epoch it started under and the cell refuses commits whose epoch
//! has been superseded, so a slow response for an old location can never
//! overwrite readings for the current one.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::UpstreamConfig;
use crate::error::CieloError;
use crate::models::{Forecast, GeoMatch, TimezoneInfo, WeatherData};
use crate::settings::SettingsStore;

static API_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("cielo/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

/// Shared HTTP client, also used by the proxy endpoints for verbatim relays
pub(crate) fn client() -> &'static reqwest::Client {
    &API_CLIENT
}

/// Fetch current conditions for a city
pub async fn get_weather(upstream: &UpstreamConfig, city: &str) -> Result<WeatherData> {
    let url = format!(
        "{}/current.json?key={}&q={}&aqi=no",
        upstream.weather_base_url,
        upstream.weather_api_key,
        urlencoding::encode(city)
    );
    debug!("Fetching current weather for '{}'", city);

    let response = API_CLIENT.get(url).send().await?;
    let weather: WeatherData = response.json().await.map_err(|err| {
        CieloError::upstream(format!("Failed to parse current weather for '{city}': {err}"))
    })?;

    info!(
        "Current weather for {}: {:.1}°C, code {}",
        weather.location.name, weather.current.temp_c, weather.current.condition.code
    );
    Ok(weather)
}

/// Fetch the multi-day forecast for a city
pub async fn get_forecast(upstream: &UpstreamConfig, city: &str) -> Result<Forecast> {
    let url = format!(
        "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=no",
        upstream.weather_base_url,
        upstream.weather_api_key,
        urlencoding::encode(city),
        upstream.forecast_days
    );
    debug!("Fetching {}-day forecast for '{}'", upstream.forecast_days, city);

    let response = API_CLIENT.get(url).send().await?;
    let raw: weatherapi::ForecastResponse = response.json().await.map_err(|err| {
        CieloError::upstream(format!("Failed to parse forecast for '{city}': {err}"))
    })?;

    let forecast = Forecast::from(raw);
    info!(
        "Forecast for '{}' holds {} days",
        city,
        forecast.days.len()
    );
    Ok(forecast)
}

/// Geocode a place name into candidate matches
pub async fn geocode(upstream: &UpstreamConfig, name: &str) -> Result<Vec<GeoMatch>> {
    if name.trim().is_empty() {
        return Err(CieloError::validation("Location name cannot be empty"));
    }
    let url = format!(
        "{}/json?address={}&key={}",
        upstream.geocode_base_url,
        urlencoding::encode(name),
        upstream.maps_api_key
    );
    debug!("Geocoding '{}'", name);

    let response = API_CLIENT.get(url).send().await?;
    let raw: google::GeocodeResponse = response.json().await.map_err(|err| {
        CieloError::upstream(format!("Failed to parse geocoding response for '{name}': {err}"))
    })?;

    let matches: Vec<GeoMatch> = raw.results.into_iter().map(GeoMatch::from).collect();
    if matches.is_empty() {
        warn!("No geocoding results for '{}'", name);
    }
    Ok(matches)
}

/// Resolve the IANA timezone at a coordinate pair
pub async fn get_timezone(upstream: &UpstreamConfig, lat: f64, lng: f64) -> Result<TimezoneInfo> {
    let url = format!(
        "{}/json?location={}%2C{}&timestamp={}&key={}",
        upstream.timezone_base_url,
        lat,
        lng,
        Utc::now().timestamp(),
        upstream.maps_api_key
    );
    debug!("Resolving timezone for ({}, {})", lat, lng);

    let response = API_CLIENT.get(url).send().await?;
    let raw: google::TimezoneResponse = response.json().await.map_err(|err| {
        CieloError::upstream(format!("Failed to parse timezone response for ({lat}, {lng}): {err}"))
    })?;

    Ok(TimezoneInfo {
        timezone_id: raw.time_zone_id,
    })
}

/// Weather and forecast readings fetched under one settings epoch
#[derive(Debug, Clone)]
pub struct Readings {
    /// Current conditions
    pub weather: WeatherData,
    /// Multi-day forecast
    pub forecast: Forecast,
    /// Settings epoch the fetch started under
    pub epoch: u64,
}

/// Shared slot holding the latest readings for the selected location
#[derive(Debug, Default)]
pub struct ReadingsCell {
    slot: RwLock<Option<Readings>>,
}

impl ReadingsCell {
    /// Create an empty cell
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest committed readings, if any
    pub async fn get(&self) -> Option<Readings> {
        self.slot.read().await.clone()
    }

    /// Commit readings fetched under `readings.epoch`.
    ///
    /// Discarded when the settings have moved on since the fetch started
    /// (`current_epoch` differs) or when the slot already holds readings from
    /// a later epoch. Returns whether the commit was applied.
    pub async fn commit(&self, readings: Readings, current_epoch: u64) -> bool {
        if readings.epoch != current_epoch {
            warn!(
                "Discarding stale readings (fetched at epoch {}, settings at {})",
                readings.epoch, current_epoch
            );
            return false;
        }
        let mut guard = self.slot.write().await;
        if let Some(existing) = guard.as_ref()
            && existing.epoch > readings.epoch
        {
            warn!(
                "Discarding readings older than the committed ones ({} < {})",
                readings.epoch, existing.epoch
            );
            return false;
        }
        *guard = Some(readings);
        true
    }

    /// Drop whatever is committed
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

/// Fetch weather then forecast for the current settings and commit them.
///
/// Returns whether fresh readings were committed; `false` when no city is
/// chosen yet or when the location changed while the fetch was in flight.
pub async fn refresh(
    upstream: &UpstreamConfig,
    settings: &SettingsStore,
    cell: &ReadingsCell,
) -> Result<bool> {
    let (snapshot, epoch) = settings.snapshot().await;
    if !snapshot.has_city() {
        return Ok(false);
    }

    let weather = get_weather(upstream, &snapshot.city).await?;
    let forecast = get_forecast(upstream, &snapshot.city).await?;

    let committed = cell
        .commit(
            Readings {
                weather,
                forecast,
                epoch,
            },
            settings.epoch(),
        )
        .await;
    Ok(committed)
}

/// Raw response shapes of the weather upstream
mod weatherapi {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::models::{Condition, Forecast, ForecastDay};

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub forecast: ForecastBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastBlock {
        #[serde(rename = "forecastday")]
        pub forecast_day: Vec<ForecastDayRaw>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastDayRaw {
        pub date: NaiveDate,
        pub day: DayBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct DayBlock {
        pub maxtemp_c: f64,
        pub mintemp_c: f64,
        pub condition: Condition,
    }

    impl From<ForecastResponse> for Forecast {
        fn from(raw: ForecastResponse) -> Self {
            Forecast {
                days: raw
                    .forecast
                    .forecast_day
                    .into_iter()
                    .map(|day| ForecastDay {
                        date: day.date,
                        maxtemp_c: day.day.maxtemp_c,
                        mintemp_c: day.day.mintemp_c,
                        condition: day.day.condition,
                    })
                    .collect(),
            }
        }
    }
}

/// Raw response shapes of the maps upstream (geocoding and timezone)
mod google {
    use serde::Deserialize;

    use crate::models::GeoMatch;

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        #[serde(default)]
        pub results: Vec<GeocodeResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResult {
        pub formatted_address: String,
        pub geometry: Geometry,
        #[serde(default)]
        pub address_components: Vec<AddressComponent>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct AddressComponent {
        pub long_name: String,
        #[serde(default)]
        pub types: Vec<String>,
    }

    impl From<GeocodeResult> for GeoMatch {
        fn from(result: GeocodeResult) -> Self {
            let country = result
                .address_components
                .iter()
                .find(|component| component.types.iter().any(|t| t == "country"))
                .map(|component| component.long_name.clone());
            GeoMatch {
                name: result.formatted_address,
                country,
                lat: result.geometry.location.lat,
                lng: result.geometry.location.lng,
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct TimezoneResponse {
        #[serde(rename = "timeZoneId")]
        pub time_zone_id: String,
    }
}
