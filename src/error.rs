//! Error types for the stress-assessment pipeline.
//!
//! Only contract violations and invalid configuration are errors. Missing,
//! unknown, or non-numeric sensor data is recovered locally and reported
//! through `tracing` diagnostics instead.

use crate::stage_ranges::{GrowthStage, Parameter};

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Stress classifier has not been trained; call train() or ensure_trained() first")]
    ModelNotTrained,

    #[error("Feature vector has {actual} columns, classifier schema expects {expected}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Range table is missing {parameter} for stage '{stage}'")]
    IncompleteRangeTable {
        stage: GrowthStage,
        parameter: Parameter,
    },

    #[error("Invalid range for {parameter} in stage '{stage}': min {min} > max {max}")]
    InvalidRange {
        stage: GrowthStage,
        parameter: Parameter,
        min: f64,
        max: f64,
    },

    #[error("Cannot train a classifier on an empty training set")]
    EmptyTrainingSet,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Classifier produced unknown stress class code {0}")]
    UnknownStressCode(usize),

    #[error("Random forest error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, AssessmentError>;
