//! Per-employee attendance reports.
//!
//! A report pairs every stored day in a period with its derived metrics,
//! presence status, violation remarks and leaves, and sums the period.

mod duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{DayCategory, OvertimeBonusRule, calculate_metrics, get_day_category};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{DerivedMetrics, Employee, Violation};
use crate::store::AttendanceStore;

pub use duration::{DurationUnit, format_duration, format_minutes};

/// Whether the employee turned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// A first punch exists.
    Present,
    /// No first punch.
    Absent,
}

impl PresenceStatus {
    /// Label printed on reports.
    pub fn label(&self) -> &'static str {
        match self {
            PresenceStatus::Present => "Hadir",
            PresenceStatus::Absent => "Tidak Hadir",
        }
    }
}

/// One day of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Attendance row id.
    pub attendance_id: u64,
    /// Day of the row.
    pub date: NaiveDate,
    /// Weekday, Saturday or Sunday.
    pub day: DayCategory,
    /// Stored punches.
    pub clock_in: Option<String>,
    /// Stored punches.
    pub clock_out: Option<String>,
    /// Stored punches.
    pub overtime_clock_in: Option<String>,
    /// Stored punches.
    pub overtime_clock_out: Option<String>,
    /// Policy actually used, after any fallback.
    pub policy_id: u32,
    /// Computed metrics.
    pub metrics: DerivedMetrics,
    /// `work + loyalty/60 + lembur`, in hours.
    pub total_work_hours: Decimal,
    /// Presence status.
    pub status: PresenceStatus,
    /// Violations recorded for the day.
    pub violations: Vec<Violation>,
    /// Leave descriptions for the day.
    pub leaves: Vec<String>,
}

impl ReportLine {
    /// Violations joined as `"start-end description | ..."`, or `"-"`.
    pub fn remarks(&self) -> String {
        if self.violations.is_empty() {
            return "-".to_string();
        }
        self.violations
            .iter()
            .map(Violation::remark)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Period sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Summed metrics.
    pub metrics: DerivedMetrics,
    /// Summed display aggregate.
    pub total_work_hours: Decimal,
    /// Days with a first punch.
    pub present_days: usize,
    /// Days without one.
    pub absent_days: usize,
    /// Summed violation durations.
    pub violation_minutes: Decimal,
}

/// A finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// The reported employee.
    pub employee: Employee,
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
    /// Overtime-bonus rule the metrics were computed with.
    pub rule: OvertimeBonusRule,
    /// One line per stored day, by date.
    pub lines: Vec<ReportLine>,
    /// Period sums.
    pub totals: ReportTotals,
}

impl AttendanceReport {
    /// One-line summary for the report header.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::calculation::OvertimeBonusRule;
    /// use attendance_engine::models::Employee;
    /// use attendance_engine::report::{AttendanceReport, ReportTotals};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    /// let report = AttendanceReport {
    ///     employee: Employee { id: 1, name: "Ani".to_string(), default_shift_id: 1 },
    ///     start: day,
    ///     end: day,
    ///     rule: OvertimeBonusRule::FlatHour,
    ///     lines: vec![],
    ///     totals: ReportTotals::default(),
    /// };
    /// assert_eq!(
    ///     report.summary_text(),
    ///     "Laporan: Ani | Total Kerja: 0 menit | Total Lembur: 0 menit | \
    ///      Total Loyalitas: 0 menit | Total Overtime: 0 menit | Total Terlambat: 0 menit"
    /// );
    /// ```
    pub fn summary_text(&self) -> String {
        let m = &self.totals.metrics;
        format!(
            "Laporan: {} | Total Kerja: {} | Total Lembur: {} | Total Loyalitas: {} | \
             Total Overtime: {} | Total Terlambat: {}",
            self.employee.name,
            format_duration(m.work_hours, DurationUnit::Jam),
            format_duration(m.overtime_hours, DurationUnit::Jam),
            format_minutes(m.loyalty_minutes, DurationUnit::MenitOnly),
            format_duration(m.overtime_bonus, DurationUnit::MenitOnly),
            format_minutes(m.lateness_minutes, DurationUnit::MenitOnly),
        )
    }
}

/// Builds the report of one employee over `start..=end`.
///
/// Each day is computed with the policy stored on the row; a row whose
/// policy no longer exists falls back to the configured default policy.
///
/// # Errors
///
/// [`EngineError::InvalidPeriod`] when `start > end`,
/// [`EngineError::EmployeeNotFound`] for an unknown employee.
pub fn build_report<S>(
    store: &S,
    config: &ConfigLoader,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<AttendanceReport>
where
    S: AttendanceStore + ?Sized,
{
    if start > end {
        return Err(EngineError::InvalidPeriod { start, end });
    }
    let employee = store
        .get_employee(employee_id)
        .ok_or(EngineError::EmployeeNotFound { employee_id })?;
    let rule = config.bonus_rule();

    let mut totals = ReportTotals::default();
    let mut lines = Vec::new();

    for record in store.get_attendance(employee_id, start, end) {
        let policy = match store.get_shift_policy(record.shift_policy_id) {
            Some(policy) => policy,
            None => {
                let fallback = config.default_policy().clone();
                warn!(
                    attendance_id = record.id,
                    policy_id = record.shift_policy_id,
                    fallback_policy_id = fallback.id,
                    "Shift policy missing, using default"
                );
                fallback
            }
        };

        let metrics = calculate_metrics(&record, &policy, rule);
        let status = if record.is_present() {
            PresenceStatus::Present
        } else {
            PresenceStatus::Absent
        };
        let violations = store.get_violations(record.id);
        let leaves = store
            .get_leaves(employee_id, record.date)
            .into_iter()
            .map(|l| l.description)
            .collect();

        totals.metrics += metrics;
        totals.total_work_hours += metrics.total_work_hours();
        match status {
            PresenceStatus::Present => totals.present_days += 1,
            PresenceStatus::Absent => totals.absent_days += 1,
        }
        totals.violation_minutes += violations
            .iter()
            .map(Violation::duration_minutes)
            .sum::<Decimal>();

        lines.push(ReportLine {
            attendance_id: record.id,
            date: record.date,
            day: get_day_category(record.date),
            clock_in: record.clock_in,
            clock_out: record.clock_out,
            overtime_clock_in: record.overtime_clock_in,
            overtime_clock_out: record.overtime_clock_out,
            policy_id: policy.id,
            metrics,
            total_work_hours: metrics.total_work_hours(),
            status,
            violations,
            leaves,
        });
    }

    info!(
        employee_id,
        start = %start,
        end = %end,
        days = lines.len(),
        "Attendance report built"
    );

    Ok(AttendanceReport {
        employee,
        start,
        end,
        rule,
        lines,
        totals,
    })
}
