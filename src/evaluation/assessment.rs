//! Health Assessment Types
//!
//! Output structures for the descriptive evaluator: the per-parameter issues
//! found for a reading and the overall health verdict.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::reading::SensorValue;
use crate::stage_ranges::{GrowthStage, Parameter, ParameterRange};

/// Direction of an out-of-range value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Low,
    High,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Low => "low",
            Condition::High => "high",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parameter found outside its optimal range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub parameter: Parameter,
    pub value: f64,
    pub condition: Condition,
    pub optimal_range: ParameterRange,
}

impl Issue {
    pub fn unit(&self) -> &'static str {
        self.optimal_range.unit
    }
}

/// Issues are capped at one per parameter
pub type IssueList = SmallVec<[Issue; 5]>;

/// Overall verdict for a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Stressed,
    /// Stage label not in the range table; nothing could be evaluated
    UnknownStage,
}

impl HealthStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Stressed => "Stressed",
            HealthStatus::UnknownStage => "Unknown Stage",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Stage a reading was evaluated under
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedStage {
    Known(GrowthStage),
    /// Label as received, not present in the range table
    Unrecognized(String),
}

impl ResolvedStage {
    pub fn label(&self) -> &str {
        match self {
            ResolvedStage::Known(stage) => stage.label(),
            ResolvedStage::Unrecognized(label) => label,
        }
    }

    pub fn known(&self) -> Option<GrowthStage> {
        match self {
            ResolvedStage::Known(stage) => Some(*stage),
            ResolvedStage::Unrecognized(_) => None,
        }
    }
}

/// Complete descriptive assessment of one reading
#[derive(Debug, Clone, PartialEq)]
pub struct HealthAssessment {
    pub stage: ResolvedStage,
    pub health_status: HealthStatus,
    /// Ordered by parameter (temperature, humidity, soil_moisture, ph, light)
    pub issues: IssueList,
    /// Raw parameter values echoed from the reading, in parameter order
    pub raw_values: [Option<SensorValue>; 5],
}

impl HealthAssessment {
    pub fn is_healthy(&self) -> bool {
        self.health_status == HealthStatus::Healthy
    }

    pub fn raw_value(&self, parameter: Parameter) -> Option<&SensorValue> {
        self.raw_values[parameter.index()].as_ref()
    }
}
