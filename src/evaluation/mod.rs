//! Descriptive Evaluator
//!
//! Compares each parameter of a reading against the optimal range for the
//! reading's growth stage and produces a `HealthAssessment`.
//!
//! Data problems never fail the evaluation:
//! - no stage → evaluated as `GrowthStage::DEFAULT`
//! - unrecognized stage → `HealthStatus::UnknownStage`, no issues
//! - absent or non-numeric parameter → skipped
//!
//! Each of these emits a `tracing::warn!` diagnostic.
//!
//! ## Architecture
//! - `comparator.rs` - single value vs range classification
//! - `assessment.rs` - HealthAssessment output structs

pub mod assessment;
pub mod comparator;

pub use assessment::{
    Condition, HealthAssessment, HealthStatus, Issue, IssueList, ResolvedStage,
};
pub use comparator::{compare_to_range, parameter_status, ParameterStatus, RangeFit};

use tracing::warn;

use crate::reading::Reading;
use crate::stage_ranges::{GrowthStage, Parameter, StageRangeTable};

/// Evaluate a reading against the built-in corn range table
pub fn evaluate(reading: &Reading) -> HealthAssessment {
    evaluate_with(StageRangeTable::corn(), reading)
}

/// Resolve a reading's stage label, defaulting when absent
pub fn resolve_stage(reading: &Reading) -> ResolvedStage {
    match reading.stage.as_deref() {
        None => {
            warn!(
                field_id = ?reading.field_id,
                "corn stage missing, defaulting to '{}'",
                GrowthStage::DEFAULT
            );
            ResolvedStage::Known(GrowthStage::DEFAULT)
        }
        Some(label) => match GrowthStage::from_label(label) {
            Some(stage) => ResolvedStage::Known(stage),
            None => ResolvedStage::Unrecognized(label.to_string()),
        },
    }
}

/// Evaluate a reading against an explicit range table
pub fn evaluate_with(table: &StageRangeTable, reading: &Reading) -> HealthAssessment {
    let stage = resolve_stage(reading);
    let raw_values = Parameter::ALL.map(|parameter| reading.value(parameter).cloned());

    let growth_stage = match &stage {
        ResolvedStage::Known(growth_stage) => *growth_stage,
        ResolvedStage::Unrecognized(label) => {
            warn!(field_id = ?reading.field_id, "unknown corn stage '{}', skipping range checks", label);
            return HealthAssessment {
                stage,
                health_status: HealthStatus::UnknownStage,
                issues: IssueList::new(),
                raw_values,
            };
        }
    };

    let mut issues = IssueList::new();

    for (parameter, range) in table.stage_ranges(growth_stage) {
        let Some(raw) = reading.value(parameter) else {
            warn!("parameter '{}' missing for stage '{}'", parameter, growth_stage);
            continue;
        };

        let Some(value) = raw.to_f64() else {
            warn!("parameter '{}' is not numeric ({:?}), skipping", parameter, raw);
            continue;
        };

        let condition = match compare_to_range(value, range) {
            RangeFit::Optimal => continue,
            RangeFit::Low => Condition::Low,
            RangeFit::High => Condition::High,
        };

        issues.push(Issue {
            parameter,
            value,
            condition,
            optimal_range: *range,
        });
    }

    let health_status = if issues.is_empty() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Stressed
    };

    HealthAssessment {
        stage,
        health_status,
        issues,
        raw_values,
    }
}
