//! Wall-clock arithmetic shared by the metric functions.
//!
//! All subtraction happens within one nominal day; there is no overnight
//! support and no time zone handling.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, DaySchedule, PunchField};

/// Whole minutes from `start` to `end` (negative when `end` is earlier).
pub(crate) fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Converts whole minutes to hours.
pub(crate) fn hours_from_minutes(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Minutes the employee stayed past the scheduled end.
///
/// Zero when `clock_out` is missing, malformed or not after `work_end`.
pub(crate) fn minutes_after_work_end(record: &AttendanceRecord, schedule: &DaySchedule) -> i64 {
    record
        .time(PunchField::ClockOut)
        .map(|clock_out| minutes_between(schedule.work_end, clock_out))
        .filter(|extra| *extra > 0)
        .unwrap_or(0)
}
