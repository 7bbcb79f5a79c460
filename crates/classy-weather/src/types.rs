use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    LightRain,
    Rain,
    Snow,
    Thunderstorm,
    ThunderstormWithHail,
}

/// A place resolved from free-text input by the geocoding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub name: String,
    pub country_code: String,
    /// Regional-indicator flag derived from `country_code`
    pub flag: String,
}

impl ResolvedPlace {
    /// Header text, e.g. "Berlin 🇩🇪"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.flag)
    }
}

/// Daily forecast as parallel sequences; index 0 is today.
///
/// All four sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    dates: Vec<NaiveDate>,
    codes: Vec<i32>,
    temp_max: Vec<f64>,
    temp_min: Vec<f64>,
}

impl ForecastSeries {
    pub fn new(
        dates: Vec<NaiveDate>,
        codes: Vec<i32>,
        temp_max: Vec<f64>,
        temp_min: Vec<f64>,
    ) -> Result<Self, WeatherError> {
        let len = dates.len();
        if codes.len() != len || temp_max.len() != len || temp_min.len() != len {
            return Err(WeatherError::Parse(format!(
                "daily arrays differ in length: time={}, weathercode={}, temperature_2m_max={}, temperature_2m_min={}",
                len,
                codes.len(),
                temp_max.len(),
                temp_min.len()
            )));
        }

        Ok(Self {
            dates,
            codes,
            temp_max,
            temp_min,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn codes(&self) -> &[i32] {
        &self.codes
    }

    pub fn temp_max(&self) -> &[f64] {
        &self.temp_max
    }

    pub fn temp_min(&self) -> &[f64] {
        &self.temp_min
    }

    /// Iterate one entry per day, in order
    pub fn days(&self) -> impl Iterator<Item = DayForecast> + '_ {
        (0..self.len()).map(move |i| DayForecast {
            index: i,
            date: self.dates[i],
            code: self.codes[i],
            high: self.temp_max[i],
            low: self.temp_min[i],
        })
    }
}

/// One day's slice of a [`ForecastSeries`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayForecast {
    pub index: usize,
    pub date: NaiveDate,
    pub code: i32,
    pub high: f64,
    pub low: f64,
}

impl DayForecast {
    pub fn is_today(&self) -> bool {
        self.index == 0
    }
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short message for display; empty for cancellation, which is never shown.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Location not found. Check and try again.",
            Self::Network(_) => "Unable to reach the weather service. Check your internet connection.",
            Self::Status { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            Self::Status { .. } => "The weather request failed. Please try again.",
            Self::Parse(_) => "Received an unexpected response. Please try again.",
            Self::Cancelled => "",
        }
    }
}
