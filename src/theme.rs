//! Visual theme derivation from the day period and condition code
//!
//! The period drives two booleans the page keys its styling on: `is_dark`
//! (dark foreground text over the light daytime gradient) and `is_night`
//! (the `_n` icon variant). Condition codes from the weather upstream map to
//! a named icon stem and a display description.

use crate::period::DayPeriod;

/// Background gradient color stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    /// Top color stop (CSS hex)
    pub from: &'static str,
    /// Bottom color stop (CSS hex)
    pub to: &'static str,
}

/// Presentation theme derived from a `DayPeriod`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    period: DayPeriod,
}

impl Theme {
    /// Derive the theme for a classified period
    #[must_use]
    pub fn for_period(period: DayPeriod) -> Self {
        Self { period }
    }

    /// The period this theme was derived from
    #[must_use]
    pub fn period(&self) -> DayPeriod {
        self.period
    }

    /// Dark foreground text, used over the light daytime gradient
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.period == DayPeriod::Day
    }

    /// Night styling, selects the `_n` icon variants
    #[must_use]
    pub fn is_night(&self) -> bool {
        self.period == DayPeriod::Night
    }

    /// Icon filename suffix for the current period
    #[must_use]
    pub fn icon_suffix(&self) -> &'static str {
        if self.is_night() { "n" } else { "d" }
    }

    /// Foreground text color (CSS hex)
    #[must_use]
    pub fn text_color(&self) -> &'static str {
        if self.is_dark() { "#1e293b" } else { "#ffffff" }
    }

    /// Background gradient for the current period
    #[must_use]
    pub fn gradient(&self) -> Gradient {
        match self.period {
            DayPeriod::Day => Gradient {
                from: "#60a5fa",
                to: "#fef3c7",
            },
            DayPeriod::Night => Gradient {
                from: "#0f172a",
                to: "#334155",
            },
            DayPeriod::Indeterminate => Gradient {
                from: "#6366f1",
                to: "#fca5a5",
            },
        }
    }
}

/// Group of upstream condition codes sharing one icon and description
#[derive(Debug, PartialEq, Eq)]
pub struct ConditionGroup {
    /// Icon filename stem (combined with the period suffix)
    pub name: &'static str,
    /// Display description
    pub text: &'static str,
    /// Upstream condition codes in this group
    pub codes: &'static [u16],
}

/// Condition groups, looked up by upstream code. The first entry doubles as
/// the fallback for unknown codes and for the not-yet-loaded state.
pub const CONDITIONS: &[ConditionGroup] = &[
    ConditionGroup {
        name: "clear",
        text: "Despejado",
        codes: &[1000],
    },
    ConditionGroup {
        name: "partly_cloudy",
        text: "Parcialmente nublado",
        codes: &[1003],
    },
    ConditionGroup {
        name: "cloudy",
        text: "Nublado",
        codes: &[1006, 1009],
    },
    ConditionGroup {
        name: "fog",
        text: "Niebla",
        codes: &[1030, 1135, 1147],
    },
    ConditionGroup {
        name: "drizzle",
        text: "Llovizna",
        codes: &[1063, 1150, 1153, 1168, 1171, 1180, 1183],
    },
    ConditionGroup {
        name: "rain",
        text: "Lluvia",
        codes: &[1186, 1189, 1192, 1195, 1198, 1201, 1240, 1243, 1246],
    },
    ConditionGroup {
        name: "snow",
        text: "Nieve",
        codes: &[
            1066, 1069, 1072, 1114, 1117, 1204, 1207, 1210, 1213, 1216, 1219, 1222, 1225, 1237,
            1249, 1252, 1255, 1258, 1261, 1264,
        ],
    },
    ConditionGroup {
        name: "storm",
        text: "Tormenta",
        codes: &[1087, 1273, 1276, 1279, 1282],
    },
];

/// Look up the condition group for an upstream code.
///
/// Unknown codes fall back to the clear-sky entry, mirroring the page's
/// behavior before any data has loaded.
#[must_use]
pub fn condition_for(code: u16) -> &'static ConditionGroup {
    CONDITIONS
        .iter()
        .find(|group| group.codes.contains(&code))
        .unwrap_or(&CONDITIONS[0])
}
