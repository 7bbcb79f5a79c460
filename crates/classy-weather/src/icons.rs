//! WMO weather code to icon lookup.
//! See: https://open-meteo.com/en/docs#weathervariables

use crate::types::WeatherCondition;

/// Returned for codes outside the table. Callers render it verbatim.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Ordered code groups. Each code appears in at most one group.
static CONDITION_TABLE: &[(&[i32], WeatherCondition)] = &[
    (&[0], WeatherCondition::Clear),
    (&[1], WeatherCondition::MostlyClear),
    (&[2], WeatherCondition::PartlyCloudy),
    (&[3], WeatherCondition::Overcast),
    (&[45, 48], WeatherCondition::Fog),
    (&[51, 56, 61, 66, 80], WeatherCondition::LightRain),
    (&[53, 55, 63, 65, 57, 67, 81, 82], WeatherCondition::Rain),
    (&[71, 73, 75, 77, 85, 86], WeatherCondition::Snow),
    (&[95], WeatherCondition::Thunderstorm),
    (&[96, 99], WeatherCondition::ThunderstormWithHail),
];

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition, `None` for unmapped codes
    pub fn from_wmo_code(code: i32) -> Option<Self> {
        CONDITION_TABLE
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, condition)| *condition)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤",
            Self::PartlyCloudy => "⛅️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫",
            Self::LightRain => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Thunderstorm => "🌩",
            Self::ThunderstormWithHail => "⛈",
        }
    }
}

/// Icon for a WMO code, or [`NOT_FOUND`]
pub fn weather_icon(code: i32) -> &'static str {
    WeatherCondition::from_wmo_code(code)
        .map(|condition| condition.icon())
        .unwrap_or(NOT_FOUND)
}
