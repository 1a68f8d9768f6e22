//! Stress Classifier
//!
//! Random-forest classifier predicting a `StressCategory` from a reading,
//! built on `aprender::tree::RandomForestClassifier`.
//!
//! Features are the five physical parameters followed by a one-hot stage
//! indicator over the stages seen in training. The schema is frozen at
//! training time; a stage outside it encodes as an all-zero indicator.
//!
//! The classifier is an explicit two-state value: `Untrained` refuses to
//! predict (`AssessmentError::ModelNotTrained`), `Trained` is read-only and
//! safe to share across threads.
//!
//! Missing parameters: under the default `MissingFeaturePolicy::Zero` an
//! absent or non-numeric value enters the feature vector as `0.0`. This is
//! lossy, since zero is usually far outside every range and reads as
//! severe stress. `StageMidpoint` substitutes the stage's optimal midpoint
//! instead.

use aprender::primitives::Matrix;
use aprender::tree::RandomForestClassifier;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::category::StressCategory;
use super::synthetic::{generate_training_set, TrainingSample, DEFAULT_SAMPLES_PER_STAGE};
use crate::error::{AssessmentError, Result};
use crate::reading::Reading;
use crate::stage_ranges::{GrowthStage, Parameter, StageRangeTable};

/// How absent parameter values enter the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFeaturePolicy {
    #[default]
    Zero,
    StageMidpoint,
}

impl std::str::FromStr for MissingFeaturePolicy {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(MissingFeaturePolicy::Zero),
            "stage_midpoint" | "midpoint" => Ok(MissingFeaturePolicy::StageMidpoint),
            other => Err(AssessmentError::InvalidConfig(format!(
                "unknown missing feature policy '{}'",
                other
            ))),
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub seed: u64,
    pub samples_per_stage: usize,
    pub missing_feature_policy: MissingFeaturePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            seed: 42,
            samples_per_stage: DEFAULT_SAMPLES_PER_STAGE,
            missing_feature_policy: MissingFeaturePolicy::Zero,
        }
    }
}

impl ClassifierConfig {
    /// Unfitted forest; tree `i` bootstraps with seed `seed + i`
    fn forest(&self) -> RandomForestClassifier {
        let forest = RandomForestClassifier::new(self.n_trees).with_random_state(self.seed);
        match self.max_depth {
            Some(depth) => forest.with_max_depth(depth),
            None => forest,
        }
    }
}

/// Feature layout: five parameters, then one indicator per trained stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    stages: Vec<GrowthStage>,
}

impl FeatureSchema {
    /// Stages present in the samples, in canonical stage order
    pub fn from_samples(samples: &[TrainingSample]) -> Self {
        let stages = GrowthStage::ALL
            .into_iter()
            .filter(|stage| samples.iter().any(|s| s.stage == *stage))
            .collect();
        Self { stages }
    }

    pub fn width(&self) -> usize {
        Parameter::ALL.len() + self.stages.len()
    }

    pub fn stages(&self) -> &[GrowthStage] {
        &self.stages
    }

    pub fn column_names(&self) -> Vec<String> {
        Parameter::ALL
            .iter()
            .map(|p| p.as_str().to_string())
            .chain(self.stages.iter().map(|s| format!("stage_{}", s.label())))
            .collect()
    }

    /// Build a feature vector; stages outside the schema get no indicator
    pub fn encode(&self, values: &[f64; 5], stage: Option<GrowthStage>) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        row.extend_from_slice(values);
        row.extend(
            self.stages
                .iter()
                .map(|s| if Some(*s) == stage { 1.0 } else { 0.0 }),
        );
        row
    }
}

/// Normalized importance of the five physical parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterImportance {
    /// Ordered by descending importance; threshold picks first, then any
    /// other parameter with nonzero importance
    pub top_parameters: Vec<Parameter>,
    /// Every parameter, rounded to three decimals
    pub importance_scores: BTreeMap<Parameter, f64>,
}

impl ParameterImportance {
    /// Derive from raw per-parameter importances (parameter order).
    ///
    /// Scores are renormalized over the five parameters. The top list holds
    /// parameters at or above 10% of the maximum score, in descending order,
    /// followed by any remaining parameter whose score is nonzero.
    pub fn from_raw(raw: [f64; 5]) -> Self {
        let total: f64 = raw.iter().sum();
        let normalized = raw.map(|v| if total > 0.0 { v.max(0.0) / total } else { 0.0 });

        let mut ranked: Vec<(Parameter, f64)> = Parameter::ALL
            .into_iter()
            .map(|p| (p, normalized[p.index()]))
            .collect();
        // Stable: equal scores keep parameter order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let max = ranked.first().map_or(0.0, |(_, v)| *v);
        let threshold = 0.1 * max;

        let mut top_parameters: Vec<Parameter> = ranked
            .iter()
            .filter(|(_, v)| *v >= threshold)
            .map(|(p, _)| *p)
            .collect();
        for parameter in Parameter::ALL {
            if normalized[parameter.index()] > 0.0 && !top_parameters.contains(&parameter) {
                top_parameters.push(parameter);
            }
        }

        let importance_scores = Parameter::ALL
            .into_iter()
            .map(|p| (p, round_to(normalized[p.index()], 3)))
            .collect();

        Self {
            top_parameters,
            importance_scores,
        }
    }

    /// Score for a parameter, 0 when not reported
    pub fn score(&self, parameter: Parameter) -> f64 {
        self.importance_scores.get(&parameter).copied().unwrap_or(0.0)
    }
}

/// Result of one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressPrediction {
    pub category: StressCategory,
    /// Probability of `category`, in [0, 1]
    pub probability: f64,
    /// `probability` as a percentage rounded to one decimal
    pub confidence: f64,
    pub importance: ParameterImportance,
}

/// Fitted classifier; immutable after training
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    schema: FeatureSchema,
    forest: RandomForestClassifier,
    importance: ParameterImportance,
    missing_feature_policy: MissingFeaturePolicy,
}

impl TrainedClassifier {
    /// Fit on a prepared training set
    pub fn fit(samples: &[TrainingSample], config: &ClassifierConfig) -> Result<Self> {
        if samples.is_empty() {
            return Err(AssessmentError::EmptyTrainingSet);
        }
        if config.n_trees == 0 {
            return Err(AssessmentError::InvalidConfig("n_trees must be positive".into()));
        }

        let schema = FeatureSchema::from_samples(samples);
        let mut data = Vec::with_capacity(samples.len() * schema.width());
        let mut y = Vec::with_capacity(samples.len());
        for sample in samples {
            let row = schema.encode(&sample.values, Some(sample.stage));
            data.extend(row.iter().map(|&v| v as f32));
            y.push(sample.label.code());
        }
        let x = Matrix::from_vec(samples.len(), schema.width(), data)
            .map_err(|e| AssessmentError::Model(e.to_string()))?;

        debug!(
            columns = ?schema.column_names(),
            "training stress classifier on {} samples",
            samples.len()
        );
        let mut forest = config.forest();
        forest
            .fit(&x, &y)
            .map_err(|e| AssessmentError::Model(e.to_string()))?;

        let raw = forest
            .feature_importances()
            .ok_or_else(|| AssessmentError::Model("forest has no feature importances".into()))?;
        let importance = ParameterImportance::from_raw(
            Parameter::ALL.map(|p| raw.get(p.index()).copied().map_or(0.0, f64::from)),
        );

        info!(
            trees = config.n_trees,
            features = schema.width(),
            "stress classifier trained"
        );

        Ok(Self {
            schema,
            forest,
            importance,
            missing_feature_policy: config.missing_feature_policy,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Global parameter importance (same for every prediction)
    pub fn importance(&self) -> &ParameterImportance {
        &self.importance
    }

    /// Feature vector for a reading under the configured missing-value policy.
    ///
    /// An absent stage label is read as `GrowthStage::DEFAULT`, matching the
    /// descriptive evaluator; an unrecognized label gets no indicator.
    pub fn features_for(&self, reading: &Reading) -> Vec<f64> {
        let stage = match reading.stage.as_deref() {
            None => Some(GrowthStage::DEFAULT),
            Some(label) => GrowthStage::from_label(label),
        };

        let values = Parameter::ALL.map(|parameter| {
            reading
                .numeric(parameter)
                .unwrap_or_else(|| self.missing_value(stage, parameter))
        });

        self.schema.encode(&values, stage)
    }

    fn missing_value(&self, stage: Option<GrowthStage>, parameter: Parameter) -> f64 {
        match (self.missing_feature_policy, stage) {
            (MissingFeaturePolicy::StageMidpoint, Some(stage)) => StageRangeTable::corn()
                .range(stage, parameter)
                .midpoint(),
            _ => 0.0,
        }
    }

    /// Predict from a raw feature vector; it must match the schema width
    pub fn predict_features(&self, features: &[f64]) -> Result<(StressCategory, f64)> {
        if features.len() != self.schema.width() {
            return Err(AssessmentError::SchemaMismatch {
                expected: self.schema.width(),
                actual: features.len(),
            });
        }

        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let x = Matrix::from_vec(1, features.len(), row)
            .map_err(|e| AssessmentError::Model(e.to_string()))?;
        let proba = self.forest.predict_proba(&x);

        // lowest code wins ties
        let (code, probability) = (0..proba.n_cols())
            .map(|code| (code, proba.get(0, code)))
            .fold((0, f32::MIN), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            });

        let category = class_for_code(code)?;
        Ok((category, f64::from(probability)))
    }

    pub fn predict(&self, reading: &Reading) -> Result<StressPrediction> {
        let features = self.features_for(reading);
        let (category, probability) = self.predict_features(&features)?;

        Ok(StressPrediction {
            category,
            probability,
            confidence: round_to(probability * 100.0, 1),
            importance: self.importance.clone(),
        })
    }
}

/// Category for a class index emitted by the forest
fn class_for_code(code: usize) -> Result<StressCategory> {
    StressCategory::from_code(code).ok_or(AssessmentError::UnknownStressCode(code))
}

/// Classifier lifecycle: must be trained before it can predict
#[derive(Debug, Clone)]
pub enum StressClassifier {
    Untrained(ClassifierConfig),
    Trained(Box<TrainedClassifier>),
}

impl Default for StressClassifier {
    fn default() -> Self {
        StressClassifier::Untrained(ClassifierConfig::default())
    }
}

impl StressClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        StressClassifier::Untrained(config)
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, StressClassifier::Trained(_))
    }

    /// Train on explicit samples, replacing any previous model
    pub fn train(&mut self, samples: &[TrainingSample], config: &ClassifierConfig) -> Result<()> {
        let trained = TrainedClassifier::fit(samples, config)?;
        *self = StressClassifier::Trained(Box::new(trained));
        Ok(())
    }

    /// Train on synthetic data if still untrained; no-op otherwise
    pub fn ensure_trained(&mut self, table: &StageRangeTable) -> Result<&TrainedClassifier> {
        if let StressClassifier::Untrained(config) = self {
            let config = config.clone();
            let mut rng = StdRng::seed_from_u64(config.seed);
            let samples = generate_training_set(table, config.samples_per_stage, &mut rng);
            self.train(&samples, &config)?;
        }
        self.trained()
    }

    pub fn trained(&self) -> Result<&TrainedClassifier> {
        match self {
            StressClassifier::Trained(trained) => Ok(trained),
            StressClassifier::Untrained(_) => Err(AssessmentError::ModelNotTrained),
        }
    }

    pub fn predict(&self, reading: &Reading) -> Result<StressPrediction> {
        self.trained()?.predict(reading)
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
