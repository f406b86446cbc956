//! Wire types for the OpenWeatherMap 5-day / 3-hour forecast response.
//!
//! Only the fields used for risk scoring and daily summaries are modelled;
//! everything is defaulted so sparse entries still deserialize.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// The body of a `forecast` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// One entry per 3-hour period, oldest first.
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

/// One 3-hour forecast period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Period start as a Unix timestamp (UTC).
    pub dt: i64,
    #[serde(default)]
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
}

impl ForecastEntry {
    /// Returns the date of this period in the given local offset.
    ///
    /// `None` when the timestamp is out of chrono's range.
    pub fn local_date(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.dt, 0).map(|utc| utc.with_timezone(offset).date_naive())
    }

    /// The first (primary) weather condition, if any.
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }

    /// Wind gust speed, zero when not reported.
    pub fn gust(&self) -> f64 {
        self.wind.gust.unwrap_or(0.0)
    }

    /// Snowfall over the period in millimetres, zero when not reported.
    pub fn snow_3h(&self) -> f64 {
        self.snow.as_ref().map_or(0.0, |s| s.three_hours)
    }

    /// Rainfall over the period in millimetres, zero when not reported.
    pub fn rain_3h(&self) -> f64 {
        self.rain.as_ref().map_or(0.0, |r| r.three_hours)
    }
}

/// Temperature, humidity and pressure readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    /// Air temperature, °C.
    pub temp: f64,
    /// Perceived temperature, °C.
    pub feels_like: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Sea-level pressure, hPa.
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    /// Condition group, e.g. "Snow" or "Rain".
    pub main: String,
    /// Localised description, e.g. "light snow".
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Mean wind speed, m/s.
    pub speed: f64,
    /// Gust speed, m/s.
    pub gust: Option<f64>,
    /// Bearing the wind blows from, degrees.
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    /// Cloudiness, percent.
    pub all: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    /// Volume over the last three hours, mm.
    #[serde(rename = "3h", default)]
    pub three_hours: f64,
}
