//! Proxy endpoints relaying client requests to the upstream APIs
//!
//! Each endpoint validates its required query parameters, forwards to exactly
//! one upstream HTTP JSON API with the server-held credential appended, and
//! relays the upstream status and body verbatim. Upstream payloads are never
//! inspected or retried here; the typed shaping lives in `fetch`.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiError;
use crate::fetch;
use crate::models::Settings;
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timezone", get(get_timezone))
        .route("/weather", get(get_weather))
        .route("/forecast", get(get_forecast))
        .route("/geocode", get(get_geocode))
        .route("/settings", get(get_settings).post(select_location))
}

/// Forward a request to the upstream and hand back its status and body,
/// untouched. Non-JSON or error bodies pass through as-is.
async fn relay(url: String) -> Result<(StatusCode, String), ApiError> {
    let response = fetch::client().get(url).send().await?;
    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = response.text().await?;
    Ok((status, body))
}

/// `GET /api/timezone?lat&lng` — timezone lookup by coordinates
async fn get_timezone(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let (Some(lat), Some(lng)) = (params.get("lat"), params.get("lng")) else {
        return Err(ApiError::MissingParameter("Missing coordinates"));
    };

    tracing::debug!("Timezone lookup for {}, {}", lat, lng);

    let upstream = &state.config.upstream;
    let url = format!(
        "{}/json?location={}%2C{}&timestamp={}&key={}",
        upstream.timezone_base_url,
        urlencoding::encode(lat),
        urlencoding::encode(lng),
        Utc::now().timestamp(),
        upstream.maps_api_key
    );

    let (status, body) = relay(url).await?;
    Ok((
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "s-maxage=3600"),
        ],
        body,
    )
        .into_response())
}

/// `GET /api/weather?city` — current conditions by city
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(city) = params.get("city").filter(|c| !c.is_empty()) else {
        return Err(ApiError::MissingParameter("Missing city"));
    };

    let upstream = &state.config.upstream;
    let url = format!(
        "{}/current.json?key={}&q={}&aqi=no",
        upstream.weather_base_url,
        upstream.weather_api_key,
        urlencoding::encode(city)
    );

    let (status, body) = relay(url).await?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `GET /api/forecast?city` — multi-day forecast by city
async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(city) = params.get("city").filter(|c| !c.is_empty()) else {
        return Err(ApiError::MissingParameter("Missing city"));
    };

    let upstream = &state.config.upstream;
    let days = params
        .get("days")
        .and_then(|d| d.parse::<u8>().ok())
        .unwrap_or(upstream.forecast_days);
    let url = format!(
        "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=no",
        upstream.weather_base_url,
        upstream.weather_api_key,
        urlencoding::encode(city),
        days
    );

    let (status, body) = relay(url).await?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `GET /api/geocode?name` — geocoding by place name
async fn get_geocode(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(name) = params.get("name").filter(|n| !n.is_empty()) else {
        return Err(ApiError::MissingParameter("Missing name"));
    };

    let upstream = &state.config.upstream;
    let url = format!(
        "{}/json?address={}&key={}",
        upstream.geocode_base_url,
        urlencoding::encode(name),
        upstream.maps_api_key
    );

    let (status, body) = relay(url).await?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Location selection payload from the picker
#[derive(Debug, Deserialize)]
struct SelectLocation {
    city: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

/// `GET /api/settings` — the currently selected location
async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    let (settings, _) = state.settings.snapshot().await;
    Json(settings)
}

/// `POST /api/settings` — the location-picker flow, the single writer.
///
/// Geocodes the picked city, resolves its timezone, and replaces the
/// settings wholesale. Timezone resolution failure degrades to an unresolved
/// timezone (the classifier falls back to local time) rather than failing
/// the selection.
async fn select_location(
    State(state): State<AppState>,
    Json(pick): Json<SelectLocation>,
) -> Result<Json<Settings>, ApiError> {
    if pick.city.is_empty() {
        return Err(ApiError::MissingParameter("Missing city"));
    }

    let upstream = &state.config.upstream;
    let matches = fetch::geocode(upstream, &pick.city)
        .await
        .map_err(|err| ApiError::UpstreamUnreachable(err.to_string()))?;

    let (timezone, country) = match matches.first() {
        Some(best) => {
            let timezone = match fetch::get_timezone(upstream, best.lat, best.lng).await {
                Ok(info) => Some(info.timezone_id),
                Err(err) => {
                    tracing::warn!("Timezone resolution failed for '{}': {}", pick.city, err);
                    None
                }
            };
            (timezone, best.country.clone())
        }
        None => (None, None),
    };

    let settings = Settings {
        city: pick.city,
        region: pick.region,
        country: if pick.country.is_empty() {
            country.unwrap_or_default()
        } else {
            pick.country
        },
        timezone,
    };

    state.settings.select_location(settings).await;
    // Readings for the previous location are stale the moment the epoch moves
    state.readings.clear().await;

    let (settings, _) = state.settings.snapshot().await;
    Ok(Json(settings))
}
