//! Day-period classification for presentation theming
//!
//! Maps a timezone-qualified instant onto a discrete `DayPeriod` used to pick
//! icon variants, gradient colors and text contrast. The classifier is pure
//! and total: every hour of the day maps to exactly one period, and an
//! unknown timezone degrades to local time instead of erroring, so theme
//! selection can never block the page.

use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Hour (0-23) at which the day period begins, inclusive.
const DAY_START_HOUR: u32 = 6;
/// Hour (0-23) at which the night period begins, inclusive.
const NIGHT_START_HOUR: u32 = 18;

/// Discrete presentation period of the day.
///
/// `Day` and `Night` partition the 24 clock hours; `Indeterminate` keeps the
/// type total for inputs outside the clock range and for callers that need a
/// "no classification yet" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    /// Clock hour in `[6, 18)`.
    Day,
    /// Clock hour in `[18, 24)` or `[0, 6)`.
    Night,
    /// Never produced for a valid clock hour.
    Indeterminate,
}

impl DayPeriod {
    /// Lowercase label as used in icon paths and CSS class stems.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DayPeriod::Day => "day",
            DayPeriod::Night => "night",
            DayPeriod::Indeterminate => "indeterminate",
        }
    }
}

impl std::fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a clock hour into its day period.
///
/// Total over `[0, 24)`: day covers `[6, 18)`, night covers the remaining
/// hours. An out-of-range hour cannot come from chrono but maps to
/// `Indeterminate` rather than panicking.
#[must_use]
pub fn classify_hour(hour: u32) -> DayPeriod {
    match hour {
        DAY_START_HOUR..NIGHT_START_HOUR => DayPeriod::Day,
        0..24 => DayPeriod::Night,
        _ => DayPeriod::Indeterminate,
    }
}

/// Classify the given instant in the given timezone.
///
/// `timezone` is an IANA name such as `Europe/Madrid`. A missing or
/// unrecognized name falls back to the host's local timezone; this is a
/// silent degradation, never an error.
#[must_use]
pub fn period_at(timezone: Option<&str>, now: DateTime<Utc>) -> DayPeriod {
    let hour = match timezone.and_then(|name| name.parse::<Tz>().ok()) {
        Some(tz) => now.with_timezone(&tz).hour(),
        None => {
            if let Some(name) = timezone {
                tracing::debug!("Unknown timezone '{}', falling back to local time", name);
            }
            now.with_timezone(&Local).hour()
        }
    };
    classify_hour(hour)
}

/// Classify the current instant in the given timezone.
#[must_use]
pub fn current_period(timezone: Option<&str>) -> DayPeriod {
    period_at(timezone, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_hours_partition_into_day_and_night() {
        let mut day_hours = 0;
        let mut night_hours = 0;
        for hour in 0..24 {
            match classify_hour(hour) {
                DayPeriod::Day => day_hours += 1,
                DayPeriod::Night => night_hours += 1,
                DayPeriod::Indeterminate => panic!("hour {hour} classified as indeterminate"),
            }
        }
        assert_eq!(day_hours, 12);
        assert_eq!(night_hours, 12);
    }

    #[rstest]
    #[case(0, DayPeriod::Night)]
    #[case(5, DayPeriod::Night)]
    #[case(6, DayPeriod::Day)]
    #[case(12, DayPeriod::Day)]
    #[case(17, DayPeriod::Day)]
    #[case(18, DayPeriod::Night)]
    #[case(23, DayPeriod::Night)]
    fn test_boundary_hours(#[case] hour: u32, #[case] expected: DayPeriod) {
        assert_eq!(classify_hour(hour), expected);
    }

    #[test]
    fn test_out_of_range_hour_is_indeterminate() {
        assert_eq!(classify_hour(24), DayPeriod::Indeterminate);
        assert_eq!(classify_hour(99), DayPeriod::Indeterminate);
    }

    #[test]
    fn test_madrid_morning_is_day() {
        // 08:00 UTC on a July day is 10:00 in Madrid (CEST, UTC+2)
        let instant = Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap();
        assert_eq!(period_at(Some("Europe/Madrid"), instant), DayPeriod::Day);
    }

    #[test]
    fn test_madrid_evening_is_night() {
        // 20:00 UTC on a July day is 22:00 in Madrid
        let instant = Utc.with_ymd_and_hms(2024, 7, 15, 20, 0, 0).unwrap();
        assert_eq!(period_at(Some("Europe/Madrid"), instant), DayPeriod::Night);
    }

    #[test]
    fn test_winter_offset_respected() {
        // 10:00 UTC in January is 11:00 in Madrid (CET, UTC+1)
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(period_at(Some("Europe/Madrid"), instant), DayPeriod::Day);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let first = period_at(Some("America/New_York"), instant);
        let second = period_at(Some("America/New_York"), instant);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_local() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap();
        // An unrecognized name behaves exactly like a missing one
        assert_eq!(
            period_at(Some("Not/AZone"), instant),
            period_at(None, instant)
        );
    }

    #[test]
    fn test_missing_timezone_never_panics() {
        // Result depends on host timezone; only totality is asserted
        let period = current_period(None);
        assert_ne!(period, DayPeriod::Indeterminate);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(DayPeriod::Day.to_string(), "day");
        assert_eq!(DayPeriod::Night.to_string(), "night");
        assert_eq!(DayPeriod::Indeterminate.to_string(), "indeterminate");
    }
}
