//! Human-readable durations ("7 jam 40 menit").

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// How [`format_duration`] renders a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    /// Hours and minutes, omitting a zero part.
    #[default]
    Jam,
    /// Whole minutes only.
    MenitOnly,
}

/// Formats a duration given in hours.
///
/// Fractions of a minute are dropped. Zero renders as `"0 menit"`.
///
/// # Example
///
/// ```
/// use attendance_engine::report::{DurationUnit, format_duration};
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_duration(Decimal::new(775, 2), DurationUnit::Jam), "7 jam 45 menit");
/// assert_eq!(format_duration(Decimal::new(775, 2), DurationUnit::MenitOnly), "465 menit");
/// assert_eq!(format_duration(Decimal::new(8, 0), DurationUnit::Jam), "8 jam");
/// assert_eq!(format_duration(Decimal::ZERO, DurationUnit::Jam), "0 menit");
/// ```
pub fn format_duration(hours: Decimal, unit: DurationUnit) -> String {
    if hours.is_zero() {
        return "0 menit".to_string();
    }

    // Quotients like 460/60 carry 28 digits; settle them before truncating.
    let total_minutes = (hours * Decimal::from(60))
        .round_dp(6)
        .floor()
        .to_i64()
        .unwrap_or(0);

    if unit == DurationUnit::MenitOnly {
        return format!("{} menit", total_minutes);
    }

    let jam = total_minutes / 60;
    let menit = total_minutes % 60;
    match (jam, menit) {
        (0, m) => format!("{} menit", m),
        (j, 0) => format!("{} jam", j),
        (j, m) => format!("{} jam {} menit", j, m),
    }
}

/// Formats a duration given in minutes.
pub fn format_minutes(minutes: Decimal, unit: DurationUnit) -> String {
    format_duration(minutes / Decimal::from(60), unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_duration(dec("1.5"), DurationUnit::Jam), "1 jam 30 menit");
    }

    #[test]
    fn test_minutes_only_below_an_hour() {
        assert_eq!(format_duration(dec("0.75"), DurationUnit::Jam), "45 menit");
    }

    #[test]
    fn test_repeating_quotient_does_not_lose_a_minute() {
        let hours = dec("460") / dec("60");
        assert_eq!(format_duration(hours, DurationUnit::Jam), "7 jam 40 menit");
        assert_eq!(format_duration(hours, DurationUnit::MenitOnly), "460 menit");
    }

    #[test]
    fn test_sub_minute_value_renders_zero_minutes() {
        assert_eq!(format_duration(dec("0.001"), DurationUnit::Jam), "0 menit");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(dec("20"), DurationUnit::MenitOnly), "20 menit");
        assert_eq!(format_minutes(dec("90"), DurationUnit::Jam), "1 jam 30 menit");
    }
}
