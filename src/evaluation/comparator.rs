//! Range Comparator
//!
//! Core logic for comparing a single sensor value against an optimal
//! `[min, max]` range. Bounds are inclusive: a value sitting exactly on
//! `min` or `max` is optimal.

use serde::{Deserialize, Serialize};

use crate::reading::SensorValue;
use crate::stage_ranges::ParameterRange;

/// Where a numeric value falls relative to its optimal range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFit {
    /// value < min
    Low,
    /// min <= value <= max
    Optimal,
    /// value > max
    High,
}

/// Compare a numeric value against an optimal range
pub fn compare_to_range(value: f64, range: &ParameterRange) -> RangeFit {
    if value < range.min {
        RangeFit::Low
    } else if value > range.max {
        RangeFit::High
    } else {
        RangeFit::Optimal
    }
}

/// Status of one parameter, including the "cannot tell" case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStatus {
    Optimal,
    Low,
    High,
    /// Value absent or not numeric
    Unknown,
}

impl ParameterStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            ParameterStatus::Optimal => "optimal",
            ParameterStatus::Low => "low",
            ParameterStatus::High => "high",
            ParameterStatus::Unknown => "unknown",
        }
    }
}

/// Status of a raw (possibly missing, possibly non-numeric) value
pub fn parameter_status(value: Option<&SensorValue>, range: &ParameterRange) -> ParameterStatus {
    match value.and_then(SensorValue::to_f64) {
        None => ParameterStatus::Unknown,
        Some(v) => match compare_to_range(v, range) {
            RangeFit::Low => ParameterStatus::Low,
            RangeFit::Optimal => ParameterStatus::Optimal,
            RangeFit::High => ParameterStatus::High,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: ParameterRange = ParameterRange::new(25.0, 30.0, "°C");

    #[test]
    fn test_within_range() {
        assert_eq!(compare_to_range(27.0, &RANGE), RangeFit::Optimal);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(compare_to_range(25.0, &RANGE), RangeFit::Optimal);
        assert_eq!(compare_to_range(30.0, &RANGE), RangeFit::Optimal);
        assert_eq!(compare_to_range(24.999, &RANGE), RangeFit::Low);
        assert_eq!(compare_to_range(30.001, &RANGE), RangeFit::High);
    }

    #[test]
    fn test_parameter_status() {
        assert_eq!(parameter_status(None, &RANGE), ParameterStatus::Unknown);
        assert_eq!(
            parameter_status(Some(&SensorValue::from("warm")), &RANGE),
            ParameterStatus::Unknown
        );
        assert_eq!(
            parameter_status(Some(&SensorValue::from("31")), &RANGE),
            ParameterStatus::High
        );
        assert_eq!(
            parameter_status(Some(&SensorValue::Number(12.0)), &RANGE),
            ParameterStatus::Low
        );
        assert_eq!(
            parameter_status(Some(&SensorValue::Number(28.0)), &RANGE),
            ParameterStatus::Optimal
        );
    }
}
