//! Multi-day forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weather::Condition;

/// Multi-day forecast for the currently selected location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Forecast {
    /// One entry per forecast day, in chronological order
    pub days: Vec<ForecastDay>,
}

/// Single day of the forecast panel
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastDay {
    /// Calendar date of the forecast
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius
    pub maxtemp_c: f64,
    /// Daily minimum temperature in Celsius
    pub mintemp_c: f64,
    /// Dominant condition for the day
    pub condition: Condition,
}

impl ForecastDay {
    /// Short weekday label for the forecast card ("lun", "mar", ...)
    #[must_use]
    pub fn weekday_label(&self) -> &'static str {
        use chrono::Datelike;
        match self.date.weekday() {
            chrono::Weekday::Mon => "lun",
            chrono::Weekday::Tue => "mar",
            chrono::Weekday::Wed => "mié",
            chrono::Weekday::Thu => "jue",
            chrono::Weekday::Fri => "vie",
            chrono::Weekday::Sat => "sáb",
            chrono::Weekday::Sun => "dom",
        }
    }
}
