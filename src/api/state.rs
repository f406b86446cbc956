//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::{AnnualBonusCalculator, RegularPayrollCalculator};
use crate::config::ConfigLoader;
use crate::storage::PayrollStore;
use crate::weather::WeatherService;

/// Shared application state.
///
/// Holds the loaded configuration, both calculators built from its rate
/// tables, the record store and, when an API key is configured, the
/// weather service.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    regular: Arc<RegularPayrollCalculator>,
    annual: Arc<AnnualBonusCalculator>,
    store: Arc<dyn PayrollStore>,
    weather: Option<Arc<WeatherService>>,
}

impl AppState {
    /// Creates a new application state without a weather service.
    pub fn new(config: ConfigLoader, store: Arc<dyn PayrollStore>) -> Self {
        let regular = RegularPayrollCalculator::new(config.payroll_rates().clone());
        let annual = AnnualBonusCalculator::new(config.annual_bonus_rates().clone());
        Self {
            config: Arc::new(config),
            regular: Arc::new(regular),
            annual: Arc::new(annual),
            store,
            weather: None,
        }
    }

    /// Attaches a weather service.
    pub fn with_weather(mut self, weather: WeatherService) -> Self {
        self.weather = Some(Arc::new(weather));
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    pub fn regular_calculator(&self) -> &RegularPayrollCalculator {
        &self.regular
    }

    pub fn annual_calculator(&self) -> &AnnualBonusCalculator {
        &self.annual
    }

    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }

    /// The weather service, if one is configured.
    pub fn weather(&self) -> Option<&WeatherService> {
        self.weather.as_deref()
    }
}
