//! Presentation shell: the single server-rendered weather page
//!
//! Composes the header with the selected location, the period-driven
//! background gradient, the current readouts block, and the forecast card.
//! Absent data renders placeholder text; there is no error banner.

use axum::extract::{Query, State};
use axum::response::Html;

use crate::fetch::{self, Readings};
use crate::models::{Geo, Settings};
use crate::period::{self, DayPeriod};
use crate::theme::{Theme, condition_for};
use crate::web::AppState;

/// `GET /` — mount flow: seed settings from the edge-injected geo query,
/// refresh readings for the chosen city, classify the period, render.
pub async fn home(State(state): State<AppState>, Query(geo): Query<Geo>) -> Html<String> {
    state.settings.seed_from_geo(geo).await;

    let (settings, _) = state.settings.snapshot().await;
    if settings.has_city()
        && let Err(err) = fetch::refresh(&state.config.upstream, &state.settings, &state.readings).await
    {
        // The page still renders with fallback text
        tracing::warn!("Weather refresh failed for '{}': {}", settings.city, err);
    }

    let readings = state.readings.get().await;
    let current_period = period::current_period(settings.timezone.as_deref());
    Html(render_page(&settings, readings.as_ref(), current_period))
}

/// Render the full page for the given state. Pure, so the composition is
/// testable without a server or upstream.
#[must_use]
pub fn render_page(
    settings: &Settings,
    readings: Option<&Readings>,
    current_period: DayPeriod,
) -> String {
    let theme = Theme::for_period(current_period);
    let gradient = theme.gradient();

    let weather = readings.map(|r| &r.weather);
    let condition = weather.map(|w| condition_for(w.current.condition.code));

    let title = match weather {
        Some(w) => format!("El tiempo en {}", escape(&w.location.name)),
        None => "Weather App".to_string(),
    };
    let icon_stem = condition.map_or("clear", |c| c.name);
    let icon_path = format!("/images/weather/{}_{}.svg", icon_stem, theme.icon_suffix());

    let location_label = if settings.has_city() {
        format!("{}, {}", escape(&settings.city), escape(&settings.country))
    } else {
        "Selecciona una ciudad".to_string()
    };

    let temp = weather.map_or_else(|| "0".to_string(), |w| w.rounded_temp().to_string());
    let condition_text = condition.map_or("Cargando...", |c| c.text);
    let humidity = weather.map_or_else(String::new, |w| format!("{}%", w.current.humidity));
    let wind = weather.map_or_else(String::new, |w| {
        format!("{:.0} km/h", w.current.wind_kph)
    });
    let feelslike = weather.map_or_else(String::new, |w| {
        format!("{}º", w.rounded_feelslike())
    });

    let forecast_rows = readings
        .map(|r| forecast_card(r, &theme))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" type="image/svg+xml" href="{icon_path}">
</head>
<body data-period="{period}" style="margin:0;min-height:100vh;color:{text_color};background:linear-gradient(to bottom, {gradient_from}, {gradient_to});font-family:sans-serif;">
<main id="main" style="display:flex;flex-direction:column;padding:1rem;">
  <header style="display:inline-flex;width:100%;justify-content:center;">
    <button data-testid="select-location-button" style="font-weight:bold;color:{text_color};background:none;border:none;font-size:1.125rem;">{location_label}</button>
  </header>
  <section style="display:flex;flex-direction:column;text-align:center;">
    <img src="{icon_path}" alt="{condition_text}" style="width:8rem;height:8rem;margin:2.5rem auto 0;">
    <h2 style="margin-top:0;font-size:6rem;font-weight:bold;margin-bottom:0;">{temp}<span style="font-size:1.5rem;">°</span></h2>
    <h4 style="font-weight:600;margin-top:0;">{condition_text}</h4>
    <div style="display:flex;flex-direction:row;justify-content:center;margin-top:1rem;gap:2rem;">
      <h5 style="display:flex;flex-direction:column;font-size:0.875rem;"><span style="font-size:0.75rem;">Humedad</span><span style="font-size:1.125rem;">{humidity}</span></h5>
      <h5 style="display:flex;flex-direction:column;font-size:0.875rem;"><span style="font-size:0.75rem;">Viento</span><span style="font-size:1.125rem;">{wind}</span></h5>
      <h5 style="display:flex;flex-direction:column;font-size:0.875rem;"><span style="font-size:0.75rem;">Sensación Ter.</span><span style="font-size:1.125rem;">{feelslike}</span></h5>
    </div>
  </section>
  <section style="margin-top:auto;background:rgba(255,255,255,0.15);border-radius:1rem;padding:1rem;">
{forecast_rows}  </section>
</main>
</body>
</html>
"#,
        period = current_period,
        text_color = theme.text_color(),
        gradient_from = gradient.from,
        gradient_to = gradient.to,
    )
}

/// Per-day rows of the forecast card
fn forecast_card(readings: &Readings, theme: &Theme) -> String {
    let mut rows = String::new();
    for day in &readings.forecast.days {
        let condition = condition_for(day.condition.code);
        rows.push_str(&format!(
            r#"    <div style="display:flex;justify-content:space-between;align-items:center;">
      <span>{label}</span>
      <img src="/images/weather/{stem}_{suffix}.svg" alt="{text}" width="28" height="28">
      <span>{min:.0}º / {max:.0}º</span>
    </div>
"#,
            label = day.weekday_label(),
            stem = condition.name,
            suffix = theme.icon_suffix(),
            text = condition.text,
            min = day.mintemp_c,
            max = day.maxtemp_c,
        ));
    }
    rows
}

/// Minimal HTML escaping for interpolated upstream/user strings
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiLocation, Condition, CurrentConditions, Forecast, ForecastDay, WeatherData};
    use chrono::NaiveDate;

    fn madrid_settings() -> Settings {
        Settings {
            city: "Madrid".to_string(),
            region: "Madrid".to_string(),
            country: "Spain".to_string(),
            timezone: Some("Europe/Madrid".to_string()),
        }
    }

    fn readings() -> Readings {
        Readings {
            weather: WeatherData {
                location: ApiLocation {
                    name: "Madrid".to_string(),
                    region: "Madrid".to_string(),
                    country: "Spain".to_string(),
                    lat: 40.4,
                    lon: -3.7,
                },
                current: CurrentConditions {
                    temp_c: 21.6,
                    temp_f: 70.9,
                    wind_kph: 11.4,
                    wind_dir: "NNW".to_string(),
                    humidity: 43,
                    uv: 5.0,
                    feelslike_c: 20.4,
                    condition: Condition {
                        text: "Sunny".to_string(),
                        icon: String::new(),
                        code: 1000,
                    },
                },
            },
            forecast: Forecast {
                days: vec![ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                    maxtemp_c: 33.1,
                    mintemp_c: 19.4,
                    condition: Condition {
                        text: "Sunny".to_string(),
                        icon: String::new(),
                        code: 1000,
                    },
                }],
            },
            epoch: 1,
        }
    }

    #[test]
    fn test_renders_weather_when_present() {
        let html = render_page(&madrid_settings(), Some(&readings()), DayPeriod::Day);
        assert!(html.contains("El tiempo en Madrid"));
        assert!(html.contains("Madrid, Spain"));
        assert!(html.contains(">22<")); // 21.6 rounded
        assert!(html.contains("Despejado"));
        assert!(html.contains("43%"));
        assert!(html.contains(r#"<img src="/images/weather/clear_d.svg" alt="Despejado""#));
        assert!(html.contains(r#"data-period="day""#));
    }

    #[test]
    fn test_renders_placeholders_without_data() {
        let html = render_page(&madrid_settings(), None, DayPeriod::Night);
        assert!(html.contains("Weather App"));
        assert!(html.contains("Cargando..."));
        assert!(html.contains(">0<"));
        // Night theme selects the night icon variant
        assert!(html.contains(r#"<img src="/images/weather/clear_n.svg" alt="Cargando...""#));
        assert!(html.contains(r#"data-period="night""#));
    }

    #[test]
    fn test_unseeded_settings_prompt_for_city() {
        let html = render_page(&Settings::default(), None, DayPeriod::Day);
        assert!(html.contains("Selecciona una ciudad"));
    }

    #[test]
    fn test_forecast_rows_render() {
        let html = render_page(&madrid_settings(), Some(&readings()), DayPeriod::Day);
        assert!(html.contains("lun"));
        assert!(html.contains("19º / 33º"));
    }

    #[test]
    fn test_upstream_strings_are_escaped() {
        let mut settings = madrid_settings();
        settings.city = "<script>alert(1)</script>".to_string();
        let html = render_page(&settings, None, DayPeriod::Day);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b<c>"d""#), "a&amp;b&lt;c&gt;&quot;d&quot;");
        assert_eq!(escape("Madrid"), "Madrid");
    }
}
