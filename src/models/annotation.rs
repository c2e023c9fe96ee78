//! Manual annotations attached to attendance days.
//!
//! Violations are keyed by attendance id and carry second-precision
//! timestamps; leaves are keyed by (employee, date).

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::hhmmss;

/// A recorded rule violation during a working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Store-assigned identifier.
    pub id: u64,
    /// Attendance row the violation belongs to.
    pub attendance_id: u64,
    /// When the violation started (`HH:MM:SS`).
    #[serde(with = "hhmmss")]
    pub start_time: NaiveTime,
    /// When the violation ended (`HH:MM:SS`).
    #[serde(with = "hhmmss")]
    pub end_time: NaiveTime,
    /// Free-text description.
    pub description: String,
}

impl Violation {
    /// Elapsed minutes at second precision; zero when the end is not after the start.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::Violation;
    /// use chrono::NaiveTime;
    /// use rust_decimal::Decimal;
    ///
    /// let violation = Violation {
    ///     id: 1,
    ///     attendance_id: 1,
    ///     start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(12, 1, 30).unwrap(),
    ///     description: "Main HP".to_string(),
    /// };
    /// assert_eq!(violation.duration_minutes(), Decimal::new(15, 1)); // 1.5
    /// ```
    pub fn duration_minutes(&self) -> Decimal {
        let seconds = (self.end_time - self.start_time).num_seconds();
        if seconds <= 0 {
            return Decimal::ZERO;
        }
        Decimal::new(seconds, 0) / Decimal::new(60, 0)
    }

    /// Renders `"HH:MM:SS-HH:MM:SS description"` for report remarks.
    pub fn remark(&self) -> String {
        format!(
            "{}-{} {}",
            self.start_time.format("%H:%M:%S"),
            self.end_time.format("%H:%M:%S"),
            self.description
        )
    }
}

/// A leave entry for an employee on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// Store-assigned identifier.
    pub id: u64,
    /// Employee on leave.
    pub employee_id: u64,
    /// Day of the leave.
    pub date: NaiveDate,
    /// Free-text description (e.g. "Cuti tahunan").
    pub description: String,
}
