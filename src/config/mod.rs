//! Configuration loading and management for the payroll engine.
//!
//! Rate tables and forecast sites come from YAML files; deployment settings
//! (bind address, config directory, API key) come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use shift_payroll::config::{ConfigLoader, Settings};
//!
//! let settings = Settings::from_env();
//! let config = ConfigLoader::load(&settings.config_dir).unwrap();
//! println!("Shift method rate: {}", config.payroll_rates().shift_method_daily_rate);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{DEFAULT_BIND_ADDR, DEFAULT_CONFIG_DIR, DEFAULT_LOG_FILTER, Settings};
pub use types::{
    AnnualBonusRates, FlightRoute, PayrollConfig, PayrollRates, ServiceConfig, Site,
    WeatherConfig,
};
