//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for stateless metric
//! calculation, log import and per-employee reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ImportRequest, PolicyRequest, RecordRequest, ReportQuery};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, DayResult, ImportResponse, ReportResponse,
};
pub use state::AppState;
