//! Data models for the weather display

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::{Forecast, ForecastDay};
pub use location::{Geo, GeoMatch, Settings, TimezoneInfo};
pub use weather::{ApiLocation, Condition, CurrentConditions, WeatherData};
