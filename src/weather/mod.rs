//! Weather retrieval and helicopter flight-risk scoring.
//!
//! Forecasts come from a [`ForecastSource`] (OpenWeatherMap in production),
//! are grouped into local days and cached by [`WeatherService`]. This
//! subsystem is independent of the payroll calculators.

mod cache;
mod client;
mod daily;
mod models;
mod risk;
mod service;

pub use cache::TtlCache;
pub use client::{ForecastSource, OpenWeatherClient, REQUEST_TIMEOUT};
pub use daily::{
    DailySummary, FlightDay, FlightDayAnalysis, analyse_flight_days, compass_direction,
    group_daily_summaries, group_flight_days,
};
pub use models::{
    Clouds, ForecastEntry, ForecastResponse, MainReadings, Precipitation, WeatherCondition, Wind,
};
pub use risk::{FlightStatus, MAX_RISK_SCORE, RiskAssessment, RiskFactor, assess};
pub use service::{FlightForecast, WeatherService, WeeklyForecast};
