//! Crop Stress Advisor
//!
//! Stage-aware crop stress assessment from periodic sensor readings.
//!
//! Pipeline per reading:
//! - `evaluation/`: descriptive range checks against the stage range table
//! - `model/`: stress classifier trained on synthetic data from the same table
//! - `ranking`: issues ordered by learned parameter importance
//! - `advice`: rule-based recommendations
//! - `report`: flat text report
//!
//! `pipeline::CropAssessor` wires these together. `data` and `sink` are the
//! file-based reading source and result sink.

pub mod advice;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod pipeline;
pub mod ranking;
pub mod reading;
pub mod report;
pub mod sink;
pub mod stage_ranges;

// Re-export commonly used types
pub use advice::{synthesize, synthesize_with_outlook, YieldClass, YieldOutlook};
pub use config::AssessorConfig;
pub use data::{CsvReadingSource, JsonReadingSource, ReadingSource};
pub use error::{AssessmentError, Result};
pub use evaluation::{evaluate, HealthAssessment, HealthStatus, Issue};
pub use model::{ParameterImportance, StressCategory, StressClassifier, StressPrediction};
pub use pipeline::{BatchSummary, CropAssessor, CropReport};
pub use ranking::{select, RankedIssue};
pub use reading::{Reading, SensorValue};
pub use report::format_report;
pub use sink::{AssessmentRecord, JsonLinesSink, ResultSink};
pub use stage_ranges::{GrowthStage, Parameter, ParameterRange, StageRangeTable};
