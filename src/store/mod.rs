//! Attendance persistence.
//!
//! The report builder only needs the read side, expressed by the
//! [`AttendanceStore`] trait. [`InMemoryStore`] implements it together with
//! the write operations used by imports and manual corrections.

mod memory;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, Employee, Leave, ShiftPolicy, Violation};

pub use memory::InMemoryStore;

/// Read access to stored attendance data.
pub trait AttendanceStore {
    /// Looks up an employee by id.
    fn get_employee(&self, employee_id: u64) -> Option<Employee>;

    /// Attendance rows of one employee with `start <= date <= end`, ordered by date.
    fn get_attendance(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord>;

    /// Looks up a shift policy by id.
    fn get_shift_policy(&self, policy_id: u32) -> Option<ShiftPolicy>;

    /// Violations recorded against an attendance row, ordered by start time.
    fn get_violations(&self, attendance_id: u64) -> Vec<Violation>;

    /// Leaves of one employee on one date.
    fn get_leaves(&self, employee_id: u64, date: NaiveDate) -> Vec<Leave>;
}

/// How an import treats rows that already exist for the imported date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Delete every row of the date first, then insert.
    #[default]
    Replace,
    /// Insert new rows and overwrite the punches of existing ones.
    Merge,
    /// Insert new rows only; existing (employee, date) rows are kept as is.
    InsertOnly,
}

/// Row counts produced by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Rows removed up front by [`ImportMode::Replace`].
    pub removed: usize,
    /// New rows created.
    pub inserted: usize,
    /// Existing rows whose punches were overwritten.
    pub updated: usize,
    /// Records ignored because a row already existed.
    pub skipped: usize,
}

impl ImportSummary {
    /// Rows written by the import.
    pub fn written(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Headcount for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    /// Attendance rows on the date.
    pub total_employees: usize,
    /// Rows with a first punch.
    pub present: usize,
    /// Rows without a first punch.
    pub absent: usize,
    /// Rows with a lembur clock-in.
    pub with_overtime: usize,
}
