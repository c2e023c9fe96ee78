//! Combining the five metric functions for one record.

use tracing::debug;

use crate::models::{AttendanceRecord, DerivedMetrics, ShiftPolicy};

use super::day_detection::get_day_category;
use super::lateness::calculate_lateness;
use super::loyalty::calculate_loyalty;
use super::overtime_bonus::OvertimeBonusRule;
use super::overtime_hours::calculate_overtime_hours;
use super::work_hours::calculate_work_hours;

/// Calculates all derived metrics for one record under one policy.
///
/// The day category comes from the record's date. Under
/// [`OvertimeBonusRule::LegacyThreshold`] the loyalty band is reported as
/// zero: reports produced by that rule had no loyalty column, and the
/// threshold rule overlaps the 30-59 minute band.
pub fn calculate_metrics(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    rule: OvertimeBonusRule,
) -> DerivedMetrics {
    let day = get_day_category(record.date);

    let loyalty_minutes = match rule {
        OvertimeBonusRule::FlatHour => calculate_loyalty(record, policy, day),
        OvertimeBonusRule::LegacyThreshold => rust_decimal::Decimal::ZERO,
    };

    let metrics = DerivedMetrics {
        work_hours: calculate_work_hours(record, policy, day),
        overtime_hours: calculate_overtime_hours(record, policy, day),
        loyalty_minutes,
        overtime_bonus: rule.apply(record, policy, day),
        lateness_minutes: calculate_lateness(record, policy, day),
    };

    debug!(
        attendance_id = record.id,
        date = %record.date,
        day = %day,
        policy_id = policy.id,
        work_hours = %metrics.work_hours,
        overtime_bonus = %metrics.overtime_bonus,
        "Calculated attendance metrics"
    );

    metrics
}
