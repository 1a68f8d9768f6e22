//! Assessor configuration
//!
//! Defaults reproduce the reference model (seed 42, 50 samples per stage,
//! 100 trees, unlimited depth). Every field can be overridden through a
//! `CROP_*` environment variable; a `.env` file is honored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AssessmentError;
use crate::model::{ClassifierConfig, MissingFeaturePolicy, DEFAULT_SAMPLES_PER_STAGE};

pub const ENV_SEED: &str = "CROP_SEED";
pub const ENV_SAMPLES_PER_STAGE: &str = "CROP_SAMPLES_PER_STAGE";
pub const ENV_TREES: &str = "CROP_TREES";
pub const ENV_MAX_DEPTH: &str = "CROP_MAX_DEPTH";
pub const ENV_MISSING_FEATURES: &str = "CROP_MISSING_FEATURES";
pub const ENV_READINGS_PATH: &str = "CROP_READINGS_PATH";
pub const ENV_OUTPUT_PATH: &str = "CROP_OUTPUT_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessorConfig {
    pub seed: u64,
    pub samples_per_stage: usize,
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub missing_feature_policy: MissingFeaturePolicy,
    pub readings_path: Option<PathBuf>,
    /// Where assessment records are appended; None disables storage
    pub output_path: Option<PathBuf>,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples_per_stage: DEFAULT_SAMPLES_PER_STAGE,
            n_trees: 100,
            max_depth: None,
            missing_feature_policy: MissingFeaturePolicy::Zero,
            readings_path: None,
            output_path: None,
        }
    }
}

impl AssessorConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = seed;
        }
        if let Some(samples) = parse_var(&lookup, ENV_SAMPLES_PER_STAGE)? {
            config.samples_per_stage = samples;
        }
        if let Some(trees) = parse_var(&lookup, ENV_TREES)? {
            config.n_trees = trees;
        }
        if let Some(depth) = lookup(ENV_MAX_DEPTH).filter(|v| !v.trim().is_empty()) {
            config.max_depth = match depth.trim().to_ascii_lowercase().as_str() {
                "none" | "unlimited" => None,
                other => Some(other.parse().map_err(|_| {
                    AssessmentError::InvalidConfig(format!("{}='{}' is not a depth", ENV_MAX_DEPTH, depth))
                })?),
            };
        }
        if let Some(policy) = lookup(ENV_MISSING_FEATURES).filter(|v| !v.trim().is_empty()) {
            config.missing_feature_policy = MissingFeaturePolicy::from_str(&policy)
                .with_context(|| format!("Failed to parse {}", ENV_MISSING_FEATURES))?;
        }
        config.readings_path = lookup(ENV_READINGS_PATH).map(PathBuf::from);
        config.output_path = lookup(ENV_OUTPUT_PATH).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), AssessmentError> {
        if self.samples_per_stage == 0 {
            return Err(AssessmentError::InvalidConfig(
                "samples_per_stage must be at least 1".to_string(),
            ));
        }
        if self.n_trees == 0 {
            return Err(AssessmentError::InvalidConfig("n_trees must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            seed: self.seed,
            samples_per_stage: self.samples_per_stage,
            missing_feature_policy: self.missing_feature_policy,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| AssessmentError::InvalidConfig(format!("{}='{}' is not a valid number", key, raw)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AssessorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AssessorConfig::default());
        assert_eq!(config.classifier_config(), ClassifierConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AssessorConfig::from_lookup(lookup(&[
            (ENV_SEED, "7"),
            (ENV_SAMPLES_PER_STAGE, " 20 "),
            (ENV_TREES, "15"),
            (ENV_MAX_DEPTH, "6"),
            (ENV_MISSING_FEATURES, "stage_midpoint"),
            (ENV_READINGS_PATH, "data/readings.csv"),
            (ENV_OUTPUT_PATH, "out.jsonl"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.samples_per_stage, 20);
        assert_eq!(config.n_trees, 15);
        assert_eq!(config.max_depth, Some(6));
        assert_eq!(config.missing_feature_policy, MissingFeaturePolicy::StageMidpoint);
        assert_eq!(config.readings_path, Some(PathBuf::from("data/readings.csv")));
        assert_eq!(config.output_path, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn test_unlimited_depth_keyword() {
        let config = AssessorConfig::from_lookup(lookup(&[(ENV_MAX_DEPTH, "unlimited")])).unwrap();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AssessorConfig::from_lookup(lookup(&[(ENV_SEED, "forty-two")])).is_err());
        assert!(AssessorConfig::from_lookup(lookup(&[(ENV_TREES, "0")])).is_err());
        assert!(AssessorConfig::from_lookup(lookup(&[(ENV_SAMPLES_PER_STAGE, "0")])).is_err());
        assert!(AssessorConfig::from_lookup(lookup(&[(ENV_MISSING_FEATURES, "mean")])).is_err());
        assert!(AssessorConfig::from_lookup(lookup(&[(ENV_MAX_DEPTH, "-1")])).is_err());
    }
}
