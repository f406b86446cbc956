//! Cached flight-risk and weekly forecasts.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::WeatherConfig;
use crate::error::{EngineError, EngineResult};

use super::cache::TtlCache;
use super::client::ForecastSource;
use super::daily::{
    DailySummary, FlightDayAnalysis, analyse_flight_days, group_daily_summaries,
    group_flight_days,
};

/// Helicopter flight outlook for both ends of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightForecast {
    pub origin: String,
    pub destination: String,
    pub days: Vec<FlightDayAnalysis>,
    pub retrieved_at: DateTime<Utc>,
}

/// Day-by-day forecast for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyForecast {
    pub location: String,
    pub days: Vec<DailySummary>,
    pub retrieved_at: DateTime<Utc>,
}

/// Answers forecast queries, serving repeated ones from cache.
pub struct WeatherService {
    source: Arc<dyn ForecastSource>,
    config: WeatherConfig,
    offset: FixedOffset,
    flight_cache: TtlCache<FlightForecast>,
    weekly_cache: TtlCache<WeeklyForecast>,
}

impl WeatherService {
    /// Creates a service with empty caches sized from the configuration.
    pub fn new(source: Arc<dyn ForecastSource>, config: WeatherConfig) -> EngineResult<Self> {
        let offset = config
            .local_offset()
            .ok_or_else(|| EngineError::InvalidConfig {
                field: "weather.utc_offset_hours".to_string(),
                message: format!("{} is not a valid UTC offset", config.utc_offset_hours),
            })?;
        let ttl = Duration::from_secs(config.cache_ttl_secs);

        Ok(Self {
            source,
            offset,
            flight_cache: TtlCache::new(ttl),
            weekly_cache: TtlCache::new(ttl),
            config,
        })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Local time offset of the sites.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Scores the next days of flying between both ends of the route.
    ///
    /// Both sites are fetched concurrently; either failing fails the query.
    pub async fn flight_forecast(&self) -> EngineResult<FlightForecast> {
        if let Some(cached) = self.flight_cache.get() {
            debug!("Serving flight forecast from cache");
            return Ok(cached);
        }

        let route = &self.config.route;
        let periods = self.config.flight_periods;
        let (origin, destination) = tokio::try_join!(
            self.source.fetch_forecast(&route.origin, periods),
            self.source.fetch_forecast(&route.destination, periods),
        )?;

        let days = self.config.flight_days;
        let origin_days = group_flight_days(&origin.list, &route.origin.name, &self.offset, days);
        let destination_days =
            group_flight_days(&destination.list, &route.destination.name, &self.offset, days);

        let forecast = FlightForecast {
            origin: route.origin.name.clone(),
            destination: route.destination.name.clone(),
            days: analyse_flight_days(&origin_days, &destination_days),
            retrieved_at: Utc::now(),
        };
        info!(days = forecast.days.len(), "Flight forecast refreshed");

        self.flight_cache.set(forecast.clone());
        Ok(forecast)
    }

    /// Summarises the coming week at the weekly-forecast site.
    pub async fn weekly_forecast(&self) -> EngineResult<WeeklyForecast> {
        if let Some(cached) = self.weekly_cache.get() {
            debug!("Serving weekly forecast from cache");
            return Ok(cached);
        }

        let site = &self.config.weekly_site;
        let response = self
            .source
            .fetch_forecast(site, self.config.weekly_periods)
            .await?;

        let forecast = WeeklyForecast {
            location: site.name.clone(),
            days: group_daily_summaries(&response.list, &self.offset, self.config.weekly_days),
            retrieved_at: Utc::now(),
        };
        info!(location = %forecast.location, days = forecast.days.len(), "Weekly forecast refreshed");

        self.weekly_cache.set(forecast.clone());
        Ok(forecast)
    }

    /// Drops both cached forecasts.
    pub fn clear_cache(&self) {
        self.flight_cache.clear();
        self.weekly_cache.clear();
    }
}
