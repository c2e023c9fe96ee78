//! Calculation logic for the attendance engine.
//!
//! This module contains the pure, stateless functions that derive work
//! hours, lembur hours, the loyalty band, the overtime bonus and lateness
//! from one attendance record, one shift policy and a day category. None of
//! them fail: missing or malformed input yields zero.

mod clock_math;
mod day_detection;
mod lateness;
mod loyalty;
mod metrics;
mod overtime_bonus;
mod overtime_hours;
mod work_hours;

#[cfg(test)]
pub(crate) mod test_support;

pub use day_detection::{DayCategory, get_day_category};
pub use lateness::calculate_lateness;
pub use loyalty::{LOYALTY_MIN_MINUTES, OVERTIME_THRESHOLD_MINUTES, calculate_loyalty};
pub use metrics::calculate_metrics;
pub use overtime_bonus::{
    FLAT_OVERTIME_BONUS_HOURS, OvertimeBonusRule, calculate_legacy_overtime,
    calculate_overtime_bonus,
};
pub use overtime_hours::calculate_overtime_hours;
pub use work_hours::calculate_work_hours;
