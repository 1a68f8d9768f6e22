//! Predictive Model
//!
//! Stress classification trained purely on synthetic data derived from the
//! stage range table.
//!
//! ## Architecture
//! - `category.rs` - StressCategory and its synthetic sampling weights
//! - `synthetic.rs` - labeled training set generator
//! - `classifier.rs` - feature schema, aprender random forest, Untrained/Trained lifecycle, importance

pub mod category;
pub mod classifier;
pub mod synthetic;

pub use category::StressCategory;
pub use classifier::{
    ClassifierConfig, FeatureSchema, MissingFeaturePolicy, ParameterImportance, StressClassifier,
    StressPrediction, TrainedClassifier,
};
pub use synthetic::{generate_training_set, TrainingSample, DEFAULT_SAMPLES_PER_STAGE};
