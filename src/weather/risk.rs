//! Flight risk scoring for a single forecast period.
//!
//! Thresholds are tuned for the Far North: wind over 12 m/s, gusts over
//! 15 m/s, cloud cover of 80% or more, snow or heavy rain, and temperatures
//! at or below -45 °C each add points. The day's status follows the total.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::models::ForecastEntry;

/// Highest score a single period can reach.
pub const MAX_RISK_SCORE: u32 = 13;

const STRONG_WIND_MS: f64 = 12.0;
const STRONG_GUST_MS: f64 = 15.0;
const DENSE_CLOUDS_PERCENT: f64 = 80.0;
const HEAVY_RAIN_MM: f64 = 3.0;
const EXTREME_COLD_C: f64 = -45.0;

/// One condition that makes a flight riskier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskFactor {
    StrongWind { speed: f64 },
    Gusts { speed: f64 },
    DenseClouds { percent: f64 },
    /// `millimetres` is `None` when snow is only mentioned, not measured.
    Snowfall { millimetres: Option<f64> },
    HeavyRain { millimetres: Option<f64> },
    ExtremeCold { temperature: f64 },
}

impl RiskFactor {
    /// Points this factor contributes to the score.
    pub fn points(&self) -> u32 {
        match self {
            RiskFactor::StrongWind { .. }
            | RiskFactor::Gusts { .. }
            | RiskFactor::ExtremeCold { .. } => 3,
            RiskFactor::DenseClouds { .. }
            | RiskFactor::Snowfall { .. }
            | RiskFactor::HeavyRain { .. } => 2,
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFactor::StrongWind { speed } => write!(f, "Strong wind {speed:.1} m/s"),
            RiskFactor::Gusts { speed } => write!(f, "Wind gusts up to {speed:.1} m/s"),
            RiskFactor::DenseClouds { percent } => write!(f, "Dense cloud cover {percent:.0}%"),
            RiskFactor::Snowfall { millimetres: Some(mm) } => {
                write!(f, "Snowfall ({mm:.1} mm in 3h)")
            }
            RiskFactor::Snowfall { millimetres: None } => write!(f, "Snow"),
            RiskFactor::HeavyRain { millimetres: Some(mm) } => {
                write!(f, "Heavy rain ({mm:.1} mm in 3h)")
            }
            RiskFactor::HeavyRain { millimetres: None } => write!(f, "Heavy rain"),
            RiskFactor::ExtremeCold { temperature } => {
                write!(f, "Extreme cold {temperature:.0}°C")
            }
        }
    }
}

/// Recommendation derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    /// Score 0 to 3.
    Likely,
    /// Score 4 to 6.
    DelayPossible,
    /// Score above 6.
    NotRecommended,
}

impl FlightStatus {
    /// Maps a score onto a status.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=3 => FlightStatus::Likely,
            4..=6 => FlightStatus::DelayPossible,
            _ => FlightStatus::NotRecommended,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Likely => "Flight likely",
            FlightStatus::DelayPossible => "Caution: delay possible",
            FlightStatus::NotRecommended => "Flight not recommended",
        }
    }
}

/// The score of one forecast period and what produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    pub fn status(&self) -> FlightStatus {
        FlightStatus::from_score(self.score)
    }
}

/// Scores one forecast period.
///
/// Snow and heavy rain are exclusive: snow wins when both apply.
pub fn assess(entry: &ForecastEntry) -> RiskAssessment {
    let mut factors = Vec::new();

    if entry.wind.speed > STRONG_WIND_MS {
        factors.push(RiskFactor::StrongWind {
            speed: entry.wind.speed,
        });
    }
    if entry.gust() > STRONG_GUST_MS {
        factors.push(RiskFactor::Gusts {
            speed: entry.gust(),
        });
    }
    if entry.clouds.all >= DENSE_CLOUDS_PERCENT {
        factors.push(RiskFactor::DenseClouds {
            percent: entry.clouds.all,
        });
    }

    let (group, description) = entry
        .condition()
        .map(|c| (c.main.to_lowercase(), c.description.to_lowercase()))
        .unwrap_or_default();

    let snow = entry.snow_3h();
    let rain = entry.rain_3h();
    let has_snow = snow > 0.0 || group == "snow" || description.contains("snow");
    let has_heavy_rain = rain > HEAVY_RAIN_MM
        || description.contains("heavy")
        || description.contains("shower")
        || group == "rain";

    if has_snow {
        factors.push(RiskFactor::Snowfall {
            millimetres: (snow > 0.0).then_some(snow),
        });
    } else if has_heavy_rain {
        factors.push(RiskFactor::HeavyRain {
            millimetres: (rain > HEAVY_RAIN_MM).then_some(rain),
        });
    }

    if entry.main.temp <= EXTREME_COLD_C {
        factors.push(RiskFactor::ExtremeCold {
            temperature: entry.main.temp,
        });
    }

    let score = factors.iter().map(RiskFactor::points).sum();
    RiskAssessment { score, factors }
}
