//! Forecast retrieval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use crate::config::{Site, WeatherConfig};
use crate::error::{EngineError, EngineResult};

use super::models::ForecastResponse;

/// Timeout for a single forecast request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can produce a 3-hour forecast for a site.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetches up to `periods` 3-hour periods for `site`.
    async fn fetch_forecast(&self, site: &Site, periods: u32) -> EngineResult<ForecastResponse>;
}

/// OpenWeatherMap `forecast` endpoint client.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl OpenWeatherClient {
    /// Create a new client for the configured endpoint
    pub fn new(api_key: impl Into<String>, config: &WeatherConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EngineError::WeatherRequest {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    async fn fetch_forecast(&self, site: &Site, periods: u32) -> EngineResult<ForecastResponse> {
        debug!(site = %site.name, periods, "Requesting forecast");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", site.latitude.to_string()),
                ("lon", site.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", self.language.clone()),
                ("cnt", periods.to_string()),
            ])
            .send()
            .await
            .map_err(|e| EngineError::WeatherRequest {
                message: format!("Forecast request for {} failed: {}", site.name, e),
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<ForecastResponse>()
                .await
                .map_err(|e| EngineError::WeatherRequest {
                    message: format!("Failed to parse forecast for {}: {}", site.name, e),
                }),
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(site = %site.name, status = status.as_u16(), body = %body, "Forecast API error");
                Err(EngineError::WeatherApi {
                    status: status.as_u16(),
                    location: site.name.clone(),
                })
            }
        }
    }
}
