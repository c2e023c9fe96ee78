//! Derived attendance metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five metrics computed for one attendance record.
///
/// Not persisted; recomputed whenever a report is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Hours worked inside the scheduled window (raw duration on Sunday).
    pub work_hours: Decimal,
    /// Hours of the separately punched lembur shift.
    pub overtime_hours: Decimal,
    /// Minutes of the 30-59 minute lingering band.
    pub loyalty_minutes: Decimal,
    /// Overtime credit after the scheduled end, in hours.
    pub overtime_bonus: Decimal,
    /// Minutes late, measured from the scheduled start.
    pub lateness_minutes: Decimal,
}

impl DerivedMetrics {
    /// Display aggregate: work hours plus loyalty (as hours) plus lembur hours.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DerivedMetrics;
    /// use rust_decimal::Decimal;
    ///
    /// let metrics = DerivedMetrics {
    ///     work_hours: Decimal::new(8, 0),
    ///     overtime_hours: Decimal::new(2, 0),
    ///     loyalty_minutes: Decimal::new(30, 0),
    ///     ..Default::default()
    /// };
    /// assert_eq!(metrics.total_work_hours(), Decimal::new(105, 1)); // 10.5
    /// ```
    pub fn total_work_hours(&self) -> Decimal {
        self.work_hours + self.loyalty_minutes / Decimal::new(60, 0) + self.overtime_hours
    }
}

impl std::ops::AddAssign for DerivedMetrics {
    fn add_assign(&mut self, other: Self) {
        self.work_hours += other.work_hours;
        self.overtime_hours += other.overtime_hours;
        self.loyalty_minutes += other.loyalty_minutes;
        self.overtime_bonus += other.overtime_bonus;
        self.lateness_minutes += other.lateness_minutes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let metrics = DerivedMetrics::default();
        assert_eq!(metrics.total_work_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_add_assign_sums_fields() {
        let mut total = DerivedMetrics::default();
        let day = DerivedMetrics {
            work_hours: Decimal::new(8, 0),
            overtime_hours: Decimal::ONE,
            loyalty_minutes: Decimal::new(45, 0),
            overtime_bonus: Decimal::ZERO,
            lateness_minutes: Decimal::new(16, 0),
        };
        total += day;
        total += day;
        assert_eq!(total.work_hours, Decimal::new(16, 0));
        assert_eq!(total.loyalty_minutes, Decimal::new(90, 0));
        assert_eq!(total.lateness_minutes, Decimal::new(32, 0));
    }

    #[test]
    fn test_metrics_serialize_as_strings() {
        let metrics = DerivedMetrics {
            work_hours: Decimal::new(75, 1),
            ..Default::default()
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["work_hours"], "7.5");
    }
}
