//! Response types for the attendance engine API.
//!
//! This module defines the success bodies of each endpoint and the error
//! response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{DayCategory, OvertimeBonusRule};
use crate::error::EngineError;
use crate::models::DerivedMetrics;
use crate::parser::{ParseDiagnostic, StrategyKind};
use crate::report::AttendanceReport;
use crate::store::ImportSummary;

/// Metrics for one day of a `/calculate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResult {
    /// The day.
    pub date: NaiveDate,
    /// Its category.
    pub day: DayCategory,
    /// The five metrics.
    pub metrics: DerivedMetrics,
    /// `work + loyalty/60 + lembur`, in hours.
    pub total_work_hours: Decimal,
}

/// Response body of `/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Policy applied to every record.
    pub policy_id: u32,
    /// Overtime-bonus rule applied.
    pub rule: OvertimeBonusRule,
    /// One entry per request record, in request order.
    pub results: Vec<DayResult>,
    /// Summed metrics.
    pub totals: DerivedMetrics,
    /// Summed display aggregate.
    pub total_work_hours: Decimal,
}

/// Response body of `/import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Rows inserted or updated.
    pub imported: usize,
    /// Detailed row counts.
    pub summary: ImportSummary,
    /// Strategy that recognized the file, if any did.
    pub strategy: Option<StrategyKind>,
    /// What each attempted strategy saw.
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Response body of `/report/:employee_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// The report.
    #[serde(flatten)]
    pub report: AttendanceReport,
    /// Formatted one-line summary.
    pub summary: String,
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

    /// Creates an internal error response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
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
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::PolicyNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "POLICY_NOT_FOUND",
                    message,
                    "The shift policy id is not configured",
                ),
            ),
            EngineError::PolicyInUse { .. } => {
                (StatusCode::CONFLICT, ApiError::new("POLICY_IN_USE", message))
            }
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::AttendanceNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ATTENDANCE_NOT_FOUND", message),
            ),
            EngineError::ViolationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("VIOLATION_NOT_FOUND", message),
            ),
            EngineError::FileNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "FILE_NOT_FOUND",
                    message,
                    "The attendance log path does not exist on the server",
                ),
            ),
            EngineError::InvalidTime { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TIME", message),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_file_not_found_is_404() {
        let api_error: ApiErrorResponse = EngineError::FileNotFound {
            path: "/imports/x.xls".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "FILE_NOT_FOUND");
        assert!(api_error.error.message.contains("/imports/x.xls"));
    }

    #[test]
    fn test_policy_not_found_is_400() {
        let api_error: ApiErrorResponse = EngineError::PolicyNotFound { policy_id: 7 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "POLICY_NOT_FOUND");
    }

    #[test]
    fn test_policy_in_use_is_conflict() {
        let api_error: ApiErrorResponse = EngineError::PolicyInUse {
            policy_id: 1,
            employees: 4,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_period_is_400() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            start: day,
            end: day.pred_opt().unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
    }
}
