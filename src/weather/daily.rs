//! Groups 3-hour forecast periods into local calendar days.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::models::ForecastEntry;
use super::risk::{FlightStatus, RiskFactor, assess};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Converts a wind bearing in degrees into a 16-point compass direction.
pub fn compass_direction(degrees: f64) -> &'static str {
    let sector = ((degrees.rem_euclid(360.0) + 11.25) / 22.5) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

/// Conditions at one site on one day, as used for the flight analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightDay {
    pub date: NaiveDate,
    pub location: String,
    pub temp_min: i64,
    pub temp_max: i64,
    pub temp_avg: i64,
    pub wind_speed_max: f64,
    pub wind_gust_max: f64,
    pub cloudiness_max: f64,
    /// The period with the strongest wind, then gusts, then cloud cover.
    pub worst: ForecastEntry,
}

/// One day of the weekly forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: i64,
    pub temp_max: i64,
    pub temp_avg: i64,
    pub feels_like_min: i64,
    pub feels_like_max: i64,
    /// Most frequent description of the day, capitalised.
    pub description: String,
    pub humidity_avg: i64,
    pub pressure_avg: i64,
    pub wind_speed_max: f64,
    /// Compass direction of the mean bearing; `None` when no bearing was reported.
    pub wind_direction: Option<String>,
}

/// The flight verdict for one day across both ends of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightDayAnalysis {
    pub date: NaiveDate,
    pub origin: FlightDay,
    pub destination: FlightDay,
    /// The higher of the two sites' scores.
    pub risk_score: u32,
    /// Factors from both sites, without repeats.
    pub reasons: Vec<RiskFactor>,
    pub status: FlightStatus,
}

fn by_local_date<'a>(
    entries: &'a [ForecastEntry],
    offset: &FixedOffset,
) -> BTreeMap<NaiveDate, Vec<&'a ForecastEntry>> {
    let mut days: BTreeMap<NaiveDate, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        if let Some(date) = entry.local_date(offset) {
            days.entry(date).or_default().push(entry);
        }
    }
    days
}

fn round_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // Ties keep the value seen first.
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

/// Builds per-day flight conditions for the first `days` local dates.
pub fn group_flight_days(
    entries: &[ForecastEntry],
    location: &str,
    offset: &FixedOffset,
    days: usize,
) -> Vec<FlightDay> {
    by_local_date(entries, offset)
        .into_iter()
        .take(days)
        .filter_map(|(date, periods)| {
            let worst = periods.iter().copied().max_by(|a, b| {
                a.wind
                    .speed
                    .total_cmp(&b.wind.speed)
                    .then(a.gust().total_cmp(&b.gust()))
                    .then(a.clouds.all.total_cmp(&b.clouds.all))
            })?;
            let temps = || periods.iter().map(|p| p.main.temp);
            Some(FlightDay {
                date,
                location: location.to_string(),
                temp_min: min_of(temps()).round() as i64,
                temp_max: max_of(temps()).round() as i64,
                temp_avg: mean(temps()).unwrap_or_default().round() as i64,
                wind_speed_max: round_1(max_of(periods.iter().map(|p| p.wind.speed))),
                wind_gust_max: round_1(max_of(periods.iter().map(|p| p.gust()))),
                cloudiness_max: max_of(periods.iter().map(|p| p.clouds.all)),
                worst: worst.clone(),
            })
        })
        .collect()
}

/// Builds weekly-forecast summaries for the first `days` local dates.
pub fn group_daily_summaries(
    entries: &[ForecastEntry],
    offset: &FixedOffset,
    days: usize,
) -> Vec<DailySummary> {
    by_local_date(entries, offset)
        .into_iter()
        .take(days)
        .map(|(date, periods)| {
            let temps = || periods.iter().map(|p| p.main.temp);
            let feels = || periods.iter().map(|p| p.main.feels_like);
            let description = most_common(
                periods
                    .iter()
                    .filter_map(|p| p.condition())
                    .map(|c| c.description.as_str()),
            )
            .map(capitalise)
            .unwrap_or_else(|| "No data".to_string());

            DailySummary {
                date,
                temp_min: min_of(temps()).round() as i64,
                temp_max: max_of(temps()).round() as i64,
                temp_avg: mean(temps()).unwrap_or_default().round() as i64,
                feels_like_min: min_of(feels()).round() as i64,
                feels_like_max: max_of(feels()).round() as i64,
                description,
                humidity_avg: mean(periods.iter().map(|p| p.main.humidity))
                    .unwrap_or_default()
                    .round() as i64,
                pressure_avg: mean(periods.iter().map(|p| p.main.pressure))
                    .unwrap_or_default()
                    .round() as i64,
                wind_speed_max: round_1(max_of(periods.iter().map(|p| p.wind.speed))),
                wind_direction: mean(periods.iter().filter_map(|p| p.wind.deg))
                    .map(|deg| compass_direction(deg).to_string()),
            }
        })
        .collect()
}

/// Pairs the two ends of the route day by day and scores each pair.
///
/// Only days present at both sites are analysed.
pub fn analyse_flight_days(origin: &[FlightDay], destination: &[FlightDay]) -> Vec<FlightDayAnalysis> {
    origin
        .iter()
        .zip(destination)
        .map(|(from, to)| {
            let from_risk = assess(&from.worst);
            let to_risk = assess(&to.worst);
            let risk_score = from_risk.score.max(to_risk.score);

            let mut reasons: Vec<RiskFactor> = Vec::new();
            for factor in from_risk.factors.into_iter().chain(to_risk.factors) {
                if !reasons.contains(&factor) {
                    reasons.push(factor);
                }
            }

            FlightDayAnalysis {
                date: from.date,
                origin: from.clone(),
                destination: to.clone(),
                risk_score,
                reasons,
                status: FlightStatus::from_score(risk_score),
            }
        })
        .collect()
}
