//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculation functions never fail; errors only surface from configuration
//! loading, the parser's missing-file check and store lookups/edits.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::FileNotFound {
///     path: "/imports/log.xls".to_string(),
/// };
/// assert_eq!(error.to_string(), "Attendance log not found: /imports/log.xls");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No shift policy exists with the given id.
    #[error("Shift policy not found: {policy_id}")]
    PolicyNotFound {
        /// The policy id that was requested.
        policy_id: u32,
    },

    /// A shift policy cannot be deleted while employees default to it.
    #[error("Shift policy {policy_id} is still assigned to {employees} employee(s)")]
    PolicyInUse {
        /// The policy id that was to be deleted.
        policy_id: u32,
        /// Number of employees whose default shift is this policy.
        employees: usize,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was requested.
        employee_id: u64,
    },

    /// No attendance row exists with the given id.
    #[error("Attendance record not found: {attendance_id}")]
    AttendanceNotFound {
        /// The attendance id that was requested.
        attendance_id: u64,
    },

    /// No violation exists with the given id.
    #[error("Violation not found: {violation_id}")]
    ViolationNotFound {
        /// The violation id that was requested.
        violation_id: u64,
    },

    /// The attendance log handed to the parser does not exist.
    #[error("Attendance log not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A time value supplied by a user was not a valid wall-clock time.
    #[error("Invalid time for '{field}': {value}")]
    InvalidTime {
        /// The field being edited.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A reporting period ends before it starts.
    #[error("Invalid period: {start} is after {end}")]
    InvalidPeriod {
        /// First day of the period.
        start: NaiveDate,
        /// Last day of the period.
        end: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
