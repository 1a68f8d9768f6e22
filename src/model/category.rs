//! Stress categories predicted by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal stress severity, ordered None < Mild < Moderate < Severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressCategory {
    None,
    Mild,
    Moderate,
    Severe,
}

impl StressCategory {
    pub const ALL: [StressCategory; 4] = [
        StressCategory::None,
        StressCategory::Mild,
        StressCategory::Moderate,
        StressCategory::Severe,
    ];

    /// Sampling weights for synthetic training data, aligned with `ALL`
    pub const SYNTHETIC_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

    /// Stable class code used by the classifier
    pub fn code(&self) -> usize {
        *self as usize
    }

    pub fn from_code(code: usize) -> Option<Self> {
        StressCategory::ALL.get(code).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressCategory::None => "None",
            StressCategory::Mild => "Mild",
            StressCategory::Moderate => "Moderate",
            StressCategory::Severe => "Severe",
        }
    }

    /// How far outside the optimal range synthetic values of this category
    /// fall, as `(near, far)` fractions of the range width. None means the
    /// values stay inside the range.
    pub fn deviation_band(&self) -> Option<(f64, f64)> {
        match self {
            StressCategory::None => None,
            StressCategory::Mild => Some((0.0, 0.2)),
            StressCategory::Moderate => Some((0.2, 0.5)),
            StressCategory::Severe => Some((0.5, 1.0)),
        }
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
