//! Synthetic Training Data
//!
//! Builds a labeled training set from the stage range table alone, so the
//! classifier can be trained with zero real observations.
//!
//! Per sample a stress category is drawn (None 40%, Mild 30%, Moderate 20%,
//! Severe 10%). Each parameter is then drawn uniformly:
//! - None: inside `[min, max]`
//! - otherwise: in the category's band above `max` or below `min`, the side
//!   chosen by an independent coin flip per parameter
//!
//! Randomness comes only from the caller's RNG, so a seeded RNG reproduces
//! the same set.

use rand::Rng;

use super::category::StressCategory;
use crate::stage_ranges::{GrowthStage, Parameter, ParameterRange, StageRangeTable};

/// Samples drawn per stage by default
pub const DEFAULT_SAMPLES_PER_STAGE: usize = 50;

/// One synthetic observation
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub stage: GrowthStage,
    /// In parameter order
    pub values: [f64; 5],
    pub label: StressCategory,
}

impl TrainingSample {
    pub fn value(&self, parameter: Parameter) -> f64 {
        self.values[parameter.index()]
    }
}

/// Generate `samples_per_stage` samples for every stage in the table
pub fn generate_training_set<R: Rng + ?Sized>(
    table: &StageRangeTable,
    samples_per_stage: usize,
    rng: &mut R,
) -> Vec<TrainingSample> {
    let mut samples = Vec::with_capacity(GrowthStage::ALL.len() * samples_per_stage);

    for stage in GrowthStage::ALL {
        for _ in 0..samples_per_stage {
            let label = draw_category(rng);
            let values = Parameter::ALL.map(|parameter| {
                sample_value(table.range(stage, parameter), label, rng)
            });
            samples.push(TrainingSample { stage, values, label });
        }
    }

    samples
}

/// Draw a stress category from the fixed synthetic distribution
fn draw_category<R: Rng + ?Sized>(rng: &mut R) -> StressCategory {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (category, weight) in StressCategory::ALL
        .into_iter()
        .zip(StressCategory::SYNTHETIC_WEIGHTS)
    {
        cumulative += weight;
        if roll < cumulative {
            return category;
        }
    }
    StressCategory::Severe
}

/// Draw one parameter value for a stress category
fn sample_value<R: Rng + ?Sized>(range: &ParameterRange, label: StressCategory, rng: &mut R) -> f64 {
    let Some((near, far)) = label.deviation_band() else {
        return rng.gen_range(range.min..=range.max);
    };

    let width = range.width();
    if rng.gen_bool(0.5) {
        rng.gen_range(range.max + near * width..=range.max + far * width)
    } else {
        rng.gen_range(range.min - far * width..=range.min - near * width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(seed: u64) -> Vec<TrainingSample> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_training_set(StageRangeTable::corn(), DEFAULT_SAMPLES_PER_STAGE, &mut rng)
    }

    #[test]
    fn test_sample_count_and_stage_coverage() {
        let samples = generate(42);
        assert_eq!(samples.len(), 300);

        for stage in GrowthStage::ALL {
            let count = samples.iter().filter(|s| s.stage == stage).count();
            assert_eq!(count, 50);
        }
        assert!(samples.iter().all(|s| s.values.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        assert_eq!(generate(7), generate(7));
        assert_ne!(generate(7), generate(8));
    }

    #[test]
    fn test_values_respect_category_bands() {
        let table = StageRangeTable::corn();

        for sample in generate(42) {
            for parameter in Parameter::ALL {
                let range = table.range(sample.stage, parameter);
                let width = range.width();
                let value = sample.value(parameter);
                let tol = 1e-9 * width.max(1.0);

                match sample.label.deviation_band() {
                    None => assert!(range.contains(value)),
                    Some((near, far)) => {
                        let above = value >= range.max + near * width - tol
                            && value <= range.max + far * width + tol;
                        let below = value >= range.min - far * width - tol
                            && value <= range.min - near * width + tol;
                        assert!(
                            above || below,
                            "{:?} {} = {} outside band for {:?}",
                            sample.stage,
                            parameter,
                            value,
                            sample.label
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_category_mix_roughly_matches_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = generate_training_set(StageRangeTable::corn(), 2000, &mut rng);
        let n = samples.len() as f64;

        for (category, weight) in StressCategory::ALL
            .into_iter()
            .zip(StressCategory::SYNTHETIC_WEIGHTS)
        {
            let share = samples.iter().filter(|s| s.label == category).count() as f64 / n;
            assert!((share - weight).abs() < 0.03, "{} share {}", category, share);
        }
    }

    #[test]
    fn test_zero_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_training_set(StageRangeTable::corn(), 0, &mut rng).is_empty());
    }
}
