//! Core data models for the attendance engine.
//!
//! This module contains the shift policy, attendance and annotation records,
//! and the derived metrics the calculation functions produce.

mod annotation;
mod attendance;
mod clock;
mod employee;
mod metrics;
mod shift_policy;

pub use annotation::{Leave, Violation};
pub use attendance::{AttendanceRecord, PunchField, RawPunchRecord};
pub use clock::{hhmm, hhmmss, is_blank, parse_clock, parse_punch};
pub use employee::Employee;
pub use metrics::DerivedMetrics;
pub use shift_policy::{DaySchedule, OvertimeMode, ShiftPolicy};
