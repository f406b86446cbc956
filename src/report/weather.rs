//! Plain-text renderings of forecasts.

use chrono::{Days, NaiveDate};

use crate::weather::{FlightDay, FlightForecast, MAX_RISK_SCORE, WeeklyForecast};

const DAY_SEPARATOR: &str = "------------------------------";

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.checked_add_days(Days::new(1)) == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A, %-d %B").to_string()
    }
}

fn site_conditions(day: &FlightDay) -> Vec<String> {
    let mut wind = format!("  Wind: up to {:.1} m/s", day.wind_speed_max);
    if day.wind_gust_max > 0.0 {
        wind.push_str(&format!(" (gusts up to {:.1} m/s)", day.wind_gust_max));
    }
    vec![
        format!("{}:", day.location),
        format!("  {}°C ... {}°C", day.temp_min, day.temp_max),
        wind,
        format!("  Cloud cover: up to {:.0}%", day.cloudiness_max),
    ]
}

/// Renders the flight outlook.
///
/// `today` is the current local date; it decides the "Today" and
/// "Tomorrow" labels.
pub fn format_flight_forecast_report(forecast: &FlightForecast, today: NaiveDate) -> String {
    if forecast.days.is_empty() {
        return "Could not retrieve the flight forecast. Please try again later.".to_string();
    }

    let mut lines = vec![
        "Helicopter flight outlook".to_string(),
        format!("Route: {} - {}", forecast.origin, forecast.destination),
        format!("Forecast for {} days", forecast.days.len()),
        format!(
            "Updated: {}",
            forecast.retrieved_at.format("%-d %B %Y, %H:%M UTC")
        ),
    ];

    for (index, day) in forecast.days.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
            lines.push(DAY_SEPARATOR.to_string());
        }
        lines.push(String::new());
        lines.push(day_label(day.date, today));
        lines.push(day.status.label().to_string());
        lines.push(format!("Risk score: {}/{}", day.risk_score, MAX_RISK_SCORE));
        lines.push(String::new());
        lines.extend(site_conditions(&day.origin));
        lines.push(String::new());
        lines.extend(site_conditions(&day.destination));

        if !day.reasons.is_empty() {
            lines.push(String::new());
            lines.push("Risk factors:".to_string());
            lines.extend(day.reasons.iter().map(|reason| format!("  - {reason}")));
        }
    }

    lines.join("\n")
}

/// Renders the weekly forecast.
pub fn format_weekly_forecast_report(forecast: &WeeklyForecast, today: NaiveDate) -> String {
    if forecast.days.is_empty() {
        return "Could not retrieve the weather forecast. Please try again later.".to_string();
    }

    let mut lines = vec![
        forecast.location.clone(),
        format!("{}-day forecast", forecast.days.len()),
        format!(
            "Updated: {}",
            forecast.retrieved_at.format("%-d %B %Y, %H:%M UTC")
        ),
    ];

    for day in &forecast.days {
        lines.push(String::new());
        lines.push(day_label(day.date, today));
        lines.push(format!(
            "  {}°C ... {}°C (avg {}°C)",
            day.temp_min, day.temp_max, day.temp_avg
        ));
        lines.push(format!("  {}", day.description));
        lines.push(format!("  Humidity: {}%", day.humidity_avg));
        if day.wind_speed_max > 0.0 {
            lines.push(format!(
                "  Wind: up to {:.1} m/s, {}",
                day.wind_speed_max,
                day.wind_direction.as_deref().unwrap_or("direction unknown")
            ));
        } else {
            lines.push("  Wind: calm".to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{DailySummary, FlightDayAnalysis, FlightStatus, ForecastEntry, RiskFactor};
    use chrono::{TimeZone, Utc};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn flight_day(location: &str, day: u32, gust: f64) -> FlightDay {
        FlightDay {
            date: date(day),
            location: location.to_string(),
            temp_min: -14,
            temp_max: -10,
            temp_avg: -12,
            wind_speed_max: 13.0,
            wind_gust_max: gust,
            cloudiness_max: 90.0,
            worst: ForecastEntry::default(),
        }
    }

    fn flight_forecast() -> FlightForecast {
        let analysis = |day: u32, score: u32, reasons: Vec<RiskFactor>| FlightDayAnalysis {
            date: date(day),
            origin: flight_day("Vankor field", day, 16.0),
            destination: flight_day("Igarka", day, 0.0),
            risk_score: score,
            reasons,
            status: FlightStatus::from_score(score),
        };
        FlightForecast {
            origin: "Vankor field".to_string(),
            destination: "Igarka".to_string(),
            days: vec![
                analysis(
                    1,
                    8,
                    vec![
                        RiskFactor::StrongWind { speed: 13.0 },
                        RiskFactor::Gusts { speed: 16.0 },
                        RiskFactor::DenseClouds { percent: 90.0 },
                    ],
                ),
                analysis(2, 0, Vec::new()),
                analysis(3, 5, vec![RiskFactor::StrongWind { speed: 13.0 }]),
            ],
            retrieved_at: Utc.with_ymd_and_hms(2024, 1, 1, 2, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_flight_report_labels_and_sections() {
        let report = format_flight_forecast_report(&flight_forecast(), date(1));

        assert!(report.starts_with("Helicopter flight outlook\nRoute: Vankor field - Igarka\n"));
        assert!(report.contains("Forecast for 3 days"));
        assert!(report.contains("Updated: 1 January 2024, 02:30 UTC"));
        assert!(report.contains("\nToday\nFlight not recommended\nRisk score: 8/13\n"));
        assert!(report.contains("\nTomorrow\nFlight likely\nRisk score: 0/13\n"));
        assert!(report.contains("\nWednesday, 3 January\nCaution: delay possible\n"));
        assert!(report.contains("  Wind: up to 13.0 m/s (gusts up to 16.0 m/s)"));
        assert!(report.contains("Igarka:\n  -14°C ... -10°C\n  Wind: up to 13.0 m/s\n"));
        assert!(report.contains("  - Wind gusts up to 16.0 m/s"));
        assert_eq!(report.matches(DAY_SEPARATOR).count(), 2);
        assert_eq!(report.matches("Risk factors:").count(), 2);
    }

    #[test]
    fn test_flight_report_is_deterministic() {
        let forecast = flight_forecast();
        assert_eq!(
            format_flight_forecast_report(&forecast, date(1)),
            format_flight_forecast_report(&forecast, date(1))
        );
    }

    #[test]
    fn test_empty_forecasts() {
        let mut flight = flight_forecast();
        flight.days.clear();
        assert_eq!(
            format_flight_forecast_report(&flight, date(1)),
            "Could not retrieve the flight forecast. Please try again later."
        );

        let weekly = WeeklyForecast {
            location: "Vankor field".to_string(),
            days: Vec::new(),
            retrieved_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(
            format_weekly_forecast_report(&weekly, date(1)),
            "Could not retrieve the weather forecast. Please try again later."
        );
    }

    #[test]
    fn test_weekly_report() {
        let summary = |day: u32, wind: f64, direction: Option<&str>| DailySummary {
            date: date(day),
            temp_min: -14,
            temp_max: -10,
            temp_avg: -12,
            feels_like_min: -19,
            feels_like_max: -15,
            description: "Light snow".to_string(),
            humidity_avg: 80,
            pressure_avg: 1010,
            wind_speed_max: wind,
            wind_direction: direction.map(str::to_string),
        };
        let weekly = WeeklyForecast {
            location: "Vankor field".to_string(),
            days: vec![summary(1, 9.0, Some("E")), summary(4, 0.0, None)],
            retrieved_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let report = format_weekly_forecast_report(&weekly, date(1));

        let expected = "\
Vankor field
2-day forecast
Updated: 1 January 2024, 00:00 UTC

Today
  -14°C ... -10°C (avg -12°C)
  Light snow
  Humidity: 80%
  Wind: up to 9.0 m/s, E

Thursday, 4 January
  -14°C ... -10°C (avg -12°C)
  Light snow
  Humidity: 80%
  Wind: calm";
        assert_eq!(report, expected);
    }
}
