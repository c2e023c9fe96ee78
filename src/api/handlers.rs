//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_metrics, get_day_category};
use crate::error::EngineError;
use crate::models::{DerivedMetrics, ShiftPolicy};
use crate::parser;
use crate::report::build_report;

use super::request::{CalculationRequest, ImportRequest, PolicyRequest, ReportQuery};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, DayResult, ImportResponse, ReportResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/import", post(import_handler))
        .route("/report/:employee_id", get(report_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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

/// Handler for POST /calculate endpoint.
///
/// Computes metrics for caller-supplied punches without touching the store.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let policy: ShiftPolicy = match request.policy {
        PolicyRequest::Inline(policy) => policy,
        PolicyRequest::Id(policy_id) => match config.get_policy(policy_id) {
            Ok(policy) => policy.clone(),
            Err(err) => return engine_error_response(correlation_id, err),
        },
    };
    let rule = request.rule.unwrap_or_else(|| config.bonus_rule());

    let start_time = Instant::now();
    let mut totals = DerivedMetrics::default();
    let mut total_work_hours = Decimal::ZERO;
    let results: Vec<DayResult> = request
        .records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let record = record.into_record(index as u64 + 1, policy.id);
            let metrics = calculate_metrics(&record, &policy, rule);
            totals += metrics;
            total_work_hours += metrics.total_work_hours();
            DayResult {
                date: record.date,
                day: get_day_category(record.date),
                metrics,
                total_work_hours: metrics.total_work_hours(),
            }
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        policy_id = policy.id,
        records = results.len(),
        total_work_hours = %total_work_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse {
            policy_id: policy.id,
            rule,
            results,
            totals,
            total_work_hours,
        },
    )
}

/// Handler for POST /import endpoint.
///
/// Parses a time-clock export from the server's filesystem and stores the
/// recognized records for the given date.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let path = request.path.clone();
    let outcome = match tokio::task::spawn_blocking(move || parser::parse(path)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => return engine_error_response(correlation_id, err),
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Parser task failed"
            );
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal("Attendance log parsing failed"),
            );
        }
    };

    let summary = state
        .store()
        .write()
        .await
        .save_import(request.date, &outcome.records, request.mode);

    info!(
        correlation_id = %correlation_id,
        path = %request.path,
        date = %request.date,
        strategy = ?outcome.strategy,
        imported = summary.written(),
        duration_us = start_time.elapsed().as_micros(),
        "Import completed"
    );

    json_response(
        StatusCode::OK,
        ImportResponse {
            imported: summary.written(),
            summary,
            strategy: outcome.strategy,
            diagnostics: outcome.diagnostics,
        },
    )
}

/// Handler for GET /report/:employee_id endpoint.
async fn report_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<u64>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id, "Processing report request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid report query"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let store = state.store().read().await;
    match build_report(&*store, state.config(), employee_id, query.start, query.end) {
        Ok(report) => {
            let summary = report.summary_text();
            json_response(StatusCode::OK, ReportResponse { report, summary })
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}
