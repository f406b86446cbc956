//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure has a
//! `Default` matching the reference spreadsheet, so a missing key in a
//! file falls back to the spreadsheet value.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate table for the regular (per work period) payroll.
///
/// Percent values are stored as percents (e.g. `40` for 40%) and divided
/// by 100 where they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRates {
    /// Timesheet hours credited per shift day.
    pub hours_per_shift_day: Decimal,
    /// Night shift premium, percent of the hourly rate.
    pub night_shift_premium_rate: Decimal,
    /// Monthly bonus, percent of the bonus base.
    pub monthly_bonus_rate: Decimal,
    /// Income tax, percent of the taxable base.
    pub tax_rate: Decimal,
    /// Hours paid per travel day.
    pub travel_hours_per_day: Decimal,
    /// Numerator of the fraction of pay granted for idle days.
    pub idle_pay_numerator: Decimal,
    /// Denominator of the fraction of pay granted for idle days.
    pub idle_pay_denominator: Decimal,
    /// Shift-method compensation per day on site or travelling.
    pub shift_method_daily_rate: Decimal,
}

impl PayrollRates {
    /// Returns the idle pay fraction (2/3 by default) as a 28-digit decimal.
    ///
    /// A zero denominator yields zero; [`super::ConfigLoader`] rejects such
    /// files before they reach a calculator.
    pub fn idle_pay_fraction(&self) -> Decimal {
        self.idle_pay_numerator
            .checked_div(self.idle_pay_denominator)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            hours_per_shift_day: Decimal::from(11),
            night_shift_premium_rate: Decimal::from(40),
            monthly_bonus_rate: Decimal::from(33),
            tax_rate: Decimal::from(13),
            travel_hours_per_day: Decimal::from(8),
            idle_pay_numerator: Decimal::from(2),
            idle_pay_denominator: Decimal::from(3),
            shift_method_daily_rate: Decimal::from(740),
        }
    }
}

/// Rate table and defaults for the annual bonus (13th salary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualBonusRates {
    /// Timesheet hours credited per shift day.
    pub hours_per_shift_day: Decimal,
    /// Months in a bonus year.
    pub months_per_year: Decimal,
    /// Income tax, percent of the accrued bonus.
    pub tax_rate: Decimal,
    /// Monthly bonus percent used when the worker does not give one.
    pub default_monthly_bonus_rate: Decimal,
    /// KPI coefficient used when the worker does not give one.
    pub default_kpi_coefficient: Decimal,
    /// Correction coefficient used when the worker does not give one.
    pub default_correction_coefficient: Decimal,
}

impl Default for AnnualBonusRates {
    fn default() -> Self {
        Self {
            hours_per_shift_day: Decimal::from(11),
            months_per_year: Decimal::from(12),
            tax_rate: Decimal::from(13),
            default_monthly_bonus_rate: Decimal::from(33),
            default_kpi_coefficient: Decimal::ONE,
            default_correction_coefficient: Decimal::ONE,
        }
    }
}

/// Contents of `payroll.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Rates for the regular payroll.
    pub regular: PayrollRates,
    /// Rates and defaults for the annual bonus.
    pub annual_bonus: AnnualBonusRates,
}

/// A geographic location queried for forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Display name of the site.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Site {
    /// Creates a site from its name and coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// The helicopter route whose both ends must be flyable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRoute {
    /// The field site.
    pub origin: Site,
    /// The town on the other end of the route.
    pub destination: Site,
}

impl Default for FlightRoute {
    fn default() -> Self {
        Self {
            origin: Site::new("Vankor field", 69.5, 88.0),
            destination: Site::new("Igarka", 67.4, 86.6),
        }
    }
}

/// Contents of `weather.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the 5-day / 3-hour forecast endpoint.
    pub base_url: String,
    /// Language requested for condition descriptions.
    pub language: String,
    /// How long a fetched forecast is served from cache, in seconds.
    pub cache_ttl_secs: u64,
    /// Offset of local site time from UTC, in whole hours.
    pub utc_offset_hours: i32,
    /// Number of 3-hour periods requested for the flight analysis.
    pub flight_periods: u32,
    /// Number of 3-hour periods requested for the weekly forecast.
    pub weekly_periods: u32,
    /// Number of days covered by the flight analysis.
    pub flight_days: usize,
    /// Number of days covered by the weekly forecast.
    pub weekly_days: usize,
    /// Route analysed for flight risk.
    pub route: FlightRoute,
    /// Site shown in the weekly forecast.
    pub weekly_site: Site,
}

impl WeatherConfig {
    /// Returns the local time offset of the sites.
    pub fn local_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours.checked_mul(3600)?)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let route = FlightRoute::default();
        let weekly_site = route.origin.clone();
        Self {
            base_url: "https://api.openweathermap.org/data/2.5/forecast".to_string(),
            language: "en".to_string(),
            cache_ttl_secs: 3600,
            utc_offset_hours: 7,
            flight_periods: 24,
            weekly_periods: 40,
            flight_days: 3,
            weekly_days: 7,
            route,
            weekly_site,
        }
    }
}

/// The complete service configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Payroll rate tables.
    payroll: PayrollConfig,
    /// Forecast sources and caching.
    weather: WeatherConfig,
}

impl ServiceConfig {
    /// Creates a new ServiceConfig from its component parts.
    pub fn new(payroll: PayrollConfig, weather: WeatherConfig) -> Self {
        Self { payroll, weather }
    }

    /// Returns the payroll rate tables.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the weather configuration.
    pub fn weather(&self) -> &WeatherConfig {
        &self.weather
    }
}
