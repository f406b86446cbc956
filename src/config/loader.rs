//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll and
//! weather configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AnnualBonusRates, PayrollConfig, PayrollRates, ServiceConfig, WeatherConfig,
};

/// Loads and provides access to service configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── payroll.yaml   # Regular payroll and annual bonus rate tables
/// └── weather.yaml   # Forecast endpoint, cache TTL and sites
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Tax rate: {}%", loader.payroll_rates().tax_rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, contains invalid YAML, or
    /// holds a value no calculation could use (see [`Self::validate`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let weather = Self::load_yaml::<WeatherConfig>(&path.join("weather.yaml"))?;

        Self::from_parts(payroll, weather)
    }

    /// Builds a loader from already parsed parts, validating them.
    pub fn from_parts(payroll: PayrollConfig, weather: WeatherConfig) -> EngineResult<Self> {
        Self::validate(&payroll, &weather)?;
        Ok(Self {
            config: ServiceConfig::new(payroll, weather),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects configuration values that would break a calculation.
    fn validate(payroll: &PayrollConfig, weather: &WeatherConfig) -> EngineResult<()> {
        Self::validate_regular(&payroll.regular)?;
        Self::validate_annual(&payroll.annual_bonus)?;

        if weather.cache_ttl_secs == 0 {
            return Err(invalid("weather.cache_ttl_secs", "must be greater than zero"));
        }
        if weather.local_offset().is_none() {
            return Err(invalid(
                "weather.utc_offset_hours",
                "must be between -23 and 23",
            ));
        }
        if weather.flight_days == 0 || weather.weekly_days == 0 {
            return Err(invalid("weather.*_days", "must be greater than zero"));
        }
        Ok(())
    }

    fn validate_regular(rates: &PayrollRates) -> EngineResult<()> {
        positive("regular.hours_per_shift_day", rates.hours_per_shift_day)?;
        percent("regular.night_shift_premium_rate", rates.night_shift_premium_rate)?;
        percent("regular.monthly_bonus_rate", rates.monthly_bonus_rate)?;
        percent("regular.tax_rate", rates.tax_rate)?;
        non_negative("regular.travel_hours_per_day", rates.travel_hours_per_day)?;
        non_negative("regular.idle_pay_numerator", rates.idle_pay_numerator)?;
        positive("regular.idle_pay_denominator", rates.idle_pay_denominator)?;
        non_negative("regular.shift_method_daily_rate", rates.shift_method_daily_rate)
    }

    fn validate_annual(rates: &AnnualBonusRates) -> EngineResult<()> {
        positive("annual_bonus.hours_per_shift_day", rates.hours_per_shift_day)?;
        positive("annual_bonus.months_per_year", rates.months_per_year)?;
        percent("annual_bonus.tax_rate", rates.tax_rate)?;
        percent(
            "annual_bonus.default_monthly_bonus_rate",
            rates.default_monthly_bonus_rate,
        )?;
        non_negative(
            "annual_bonus.default_kpi_coefficient",
            rates.default_kpi_coefficient,
        )?;
        non_negative(
            "annual_bonus.default_correction_coefficient",
            rates.default_correction_coefficient,
        )
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the regular payroll rate table.
    pub fn payroll_rates(&self) -> &PayrollRates {
        &self.config.payroll().regular
    }

    /// Returns the annual bonus rate table.
    pub fn annual_bonus_rates(&self) -> &AnnualBonusRates {
        &self.config.payroll().annual_bonus
    }

    /// Returns the weather configuration.
    pub fn weather(&self) -> &WeatherConfig {
        self.config.weather()
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, "must be greater than zero"));
    }
    Ok(())
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "cannot be negative"));
    }
    Ok(())
}

fn percent(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(invalid(field, "must be between 0 and 100"));
    }
    Ok(())
}
