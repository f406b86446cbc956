//! Response types for the payroll API.
//!
//! This module defines the success bodies, the error body and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AnnualBonusValidationError, EngineError};
use crate::storage::{BonusRecord, SalaryRecord};

/// Body of a successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse<T> {
    /// Identifier of this calculation; also the id of any saved record.
    pub calculation_id: Uuid,
    /// Every input and derived value at full precision.
    pub result: T,
    /// The plain-text report.
    pub report: String,
}

/// Body of `GET /users/:user_id/payroll-records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRecordsResponse {
    pub user_id: i64,
    pub salary_records: Vec<SalaryRecord>,
    pub bonus_records: Vec<BonusRecord>,
}

/// Body of the forecast endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport<T> {
    pub forecast: T,
    pub report: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the response for a weather query that cannot be answered.
    pub fn weather_unavailable(message: impl Into<String>) -> Self {
        Self::new("WEATHER_UNAVAILABLE", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::Payroll(ref validation) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    error.to_string(),
                    format!("field: {}", validation.field()),
                ),
            },
            EngineError::AnnualBonus(AnnualBonusValidationError::MissingTargetAnnualBonusRate) => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::new("MISSING_TARGET_RATE", error.to_string()),
                }
            }
            EngineError::AnnualBonus(_) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(error.to_string()),
            },
            EngineError::WeatherRequest { .. }
            | EngineError::WeatherApi { .. }
            | EngineError::WeatherUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::weather_unavailable(error.to_string()),
            },
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Failed to save or load records",
                    error.to_string(),
                ),
            },
        }
    }
}
