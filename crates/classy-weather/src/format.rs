//! Day labels and temperature rounding for forecast cards.

use chrono::NaiveDate;

use crate::icons::weather_icon;
use crate::types::{DayForecast, ForecastSeries};

pub const TODAY: &str = "Today";

/// "Today" for the first day, otherwise the short English weekday ("Mon").
pub fn format_day(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        TODAY.to_string()
    } else {
        date.format("%a").to_string()
    }
}

/// Lows round toward negative infinity.
pub fn display_min(value: f64) -> i64 {
    value.floor() as i64
}

/// Highs round toward positive infinity.
pub fn display_max(value: f64) -> i64 {
    value.ceil() as i64
}

/// Everything needed to draw one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub icon: &'static str,
    pub label: String,
    pub min: i64,
    pub max: i64,
}

impl DayCard {
    pub fn from_day(day: &DayForecast) -> Self {
        Self {
            icon: weather_icon(day.code),
            label: format_day(day.date, day.is_today()),
            min: display_min(day.low),
            max: display_max(day.high),
        }
    }

    pub fn min_label(&self) -> String {
        format!("{}°", self.min)
    }

    /// The high carries no degree sign; it is rendered emphasised instead
    pub fn max_label(&self) -> String {
        self.max.to_string()
    }
}

pub fn day_cards(series: &ForecastSeries) -> Vec<DayCard> {
    series.days().map(|day| DayCard::from_day(&day)).collect()
}
