//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::report::{
    format_annual_bonus_report, format_flight_forecast_report, format_regular_payroll_report,
    format_weekly_forecast_report,
};
use crate::storage::{BonusRecord, DEFAULT_RECORD_LIMIT, SalaryRecord};

use super::request::{AnnualBonusRequest, RecordsQuery, RegularPayrollRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ForecastReport, PayrollRecordsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/regular", post(regular_payroll_handler))
        .route("/payroll/annual-bonus", post(annual_bonus_handler))
        .route("/users/:user_id/payroll-records", get(payroll_records_handler))
        .route("/weather/flight", get(flight_forecast_handler))
        .route("/weather/week", get(weekly_forecast_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a body that failed to deserialize to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /payroll/regular.
///
/// Calculates one month of pay, returns the result with its report and,
/// when the request names a user, saves a salary record for them.
async fn regular_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegularPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing regular payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = match state.regular_calculator().calculate(&request.input) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Regular payroll calculation failed"
            );
            return error_response(EngineError::from(err).into());
        }
    };

    if let Some(user) = &request.user {
        let saved = state.store().upsert_user(user).and_then(|_| {
            let record =
                SalaryRecord::from_result(correlation_id, user.user_id, &result, Utc::now());
            state.store().save_salary_record(&record)
        });
        if let Err(err) = saved {
            warn!(correlation_id = %correlation_id, error = %err, "Failed to save salary record");
            return error_response(err.into());
        }
    }

    info!(
        correlation_id = %correlation_id,
        user_id = request.user.as_ref().map(|u| u.user_id),
        total_accrued = %result.total_accrued,
        net = %result.net,
        duration_us = start_time.elapsed().as_micros(),
        "Regular payroll calculated"
    );

    let report = format_regular_payroll_report(&result);
    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: correlation_id,
            result,
            report,
        },
    )
}

/// Handler for POST /payroll/annual-bonus.
async fn annual_bonus_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualBonusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual bonus request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = match state.annual_calculator().calculate(&request.input) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Annual bonus calculation failed"
            );
            return error_response(EngineError::from(err).into());
        }
    };

    if let Some(user) = &request.user {
        let saved = state.store().upsert_user(user).and_then(|_| {
            let record =
                BonusRecord::from_result(correlation_id, user.user_id, &result, Utc::now());
            state.store().save_bonus_record(&record)
        });
        if let Err(err) = saved {
            warn!(correlation_id = %correlation_id, error = %err, "Failed to save bonus record");
            return error_response(err.into());
        }
    }

    info!(
        correlation_id = %correlation_id,
        user_id = request.user.as_ref().map(|u| u.user_id),
        months_in_company = result.months_in_company,
        net = %result.net,
        duration_us = start_time.elapsed().as_micros(),
        "Annual bonus calculated"
    );

    let report = format_annual_bonus_report(&result);
    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: correlation_id,
            result,
            report,
        },
    )
}

/// Handler for GET /users/:user_id/payroll-records.
///
/// Returns the user's most recent salary and bonus records, newest first.
async fn payroll_records_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<RecordsQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_RECORD_LIMIT);

    let records = load_records(&state, user_id, limit);
    match records {
        Ok(body) => {
            info!(
                user_id,
                salary_records = body.salary_records.len(),
                bonus_records = body.bonus_records.len(),
                "Loaded payroll records"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(user_id, error = %err, "Failed to load payroll records");
            error_response(err.into())
        }
    }
}

fn load_records(state: &AppState, user_id: i64, limit: usize) -> EngineResult<PayrollRecordsResponse> {
    Ok(PayrollRecordsResponse {
        user_id,
        salary_records: state.store().recent_salary_records(user_id, limit)?,
        bonus_records: state.store().recent_bonus_records(user_id, limit)?,
    })
}

fn weather_not_configured() -> Response {
    error_response(ApiErrorResponse {
        status: StatusCode::SERVICE_UNAVAILABLE,
        error: ApiError::weather_unavailable("Weather forecasts are not configured"),
    })
}

/// Handler for GET /weather/flight.
async fn flight_forecast_handler(State(state): State<AppState>) -> Response {
    let Some(weather) = state.weather() else {
        return weather_not_configured();
    };

    match weather.flight_forecast().await {
        Ok(forecast) => {
            let today = Utc::now().with_timezone(&weather.offset()).date_naive();
            let report = format_flight_forecast_report(&forecast, today);
            json_response(StatusCode::OK, ForecastReport { forecast, report })
        }
        Err(err) => {
            warn!(error = %err, "Flight forecast failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /weather/week.
async fn weekly_forecast_handler(State(state): State<AppState>) -> Response {
    let Some(weather) = state.weather() else {
        return weather_not_configured();
    };

    match weather.weekly_forecast().await {
        Ok(forecast) => {
            let today = Utc::now().with_timezone(&weather.offset()).date_naive();
            let report = format_weekly_forecast_report(&forecast, today);
            json_response(StatusCode::OK, ForecastReport { forecast, report })
        }
        Err(err) => {
            warn!(error = %err, "Weekly forecast failed");
            error_response(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{AnnualBonusResult, RegularPayrollResult};
    use crate::storage::InMemoryStore;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config, Arc::new(InMemoryStore::new()))
    }

    fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.into()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_regular_payroll_returns_result_and_report() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/payroll/regular",
                r#"{"input": {"hourly_rate": "1000", "days_worked": "15"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body: CalculationResponse<RegularPayrollResult> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.result.total_accrued, Decimal::from(230550));
        assert_eq!(body.result.net, Decimal::from_str("202021.50").unwrap());
        assert!(body.report.contains("Net pay: 202021.50"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/payroll/regular", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_hourly_rate_is_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/payroll/regular",
                r#"{"input": {"days_worked": "15"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("hourly_rate"));
    }

    #[tokio::test]
    async fn test_negative_days_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/payroll/regular",
                r#"{"input": {"hourly_rate": "1000", "days_worked": "-5"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("days worked"));
    }

    #[tokio::test]
    async fn test_annual_bonus_without_target_rate() {
        let router = create_router(create_test_state());
        let body = r#"{
            "input": {
                "hourly_rate": "1000",
                "months_in_company": 12,
                "monthly_days": {
                    "1": 20, "2": 20, "3": 20, "4": 20, "5": 20, "6": 20,
                    "7": 20, "8": 20, "9": 20, "10": 20, "11": 20, "12": 20
                }
            }
        }"#;

        let response = router
            .oneshot(post_json("/payroll/annual-bonus", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_TARGET_RATE");
    }

    #[tokio::test]
    async fn test_annual_bonus_saves_record_for_user() {
        let state = create_test_state();
        let router = create_router(state.clone());
        let body = r#"{
            "input": {
                "hourly_rate": "1000",
                "months_in_company": 12,
                "monthly_days": {
                    "1": 20, "2": 20, "3": 20, "4": 20, "5": 20, "6": 20,
                    "7": 20, "8": 20, "9": 20, "10": 20, "11": 20, "12": 20
                },
                "target_annual_bonus_rate": "20"
            },
            "user": {"user_id": 7}
        }"#;

        let response = router
            .oneshot(post_json("/payroll/annual-bonus", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CalculationResponse<AnnualBonusResult> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.result.net, Decimal::from_str("610948.80").unwrap());

        let records = state.store().recent_bonus_records(7, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, body.calculation_id);
        assert!(state.store().get_user(7).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_records_for_unknown_user_are_empty() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/users/99/payroll-records"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: PayrollRecordsResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.user_id, 99);
        assert!(body.salary_records.is_empty());
        assert!(body.bonus_records.is_empty());
    }

    #[tokio::test]
    async fn test_weather_without_service_is_unavailable() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/weather/flight"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "WEATHER_UNAVAILABLE");
    }
}
