//! Recommendation Synthesizer
//!
//! Turns an assessment, its ranked issues and the predicted stress level into
//! an ordered list of action items:
//!
//! 1. issue messages (priority banner + ranked issues, or one line per raw issue)
//! 2. urgency tag for the stress category (none for `StressCategory::None`)
//! 3. one stage note (none for an unknown stage)
//!
//! A Healthy reading gets exactly one message and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::evaluation::{Condition, HealthAssessment, Issue};
use crate::model::StressCategory;
use crate::ranking::RankedIssue;
use crate::stage_ranges::{GrowthStage, Parameter};

pub const HEALTHY_MESSAGE: &str =
    "All parameters are within optimal ranges. Maintain current conditions.";
pub const PRIORITY_BANNER: &str = "Priority issues based on predictive analysis:";

/// Wording for one (parameter, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    /// Short imperative, used with an impact score
    pub action: &'static str,
    /// How to carry out the action
    pub remedy: &'static str,
    /// Self-contained sentence for unranked issues
    pub standalone: &'static str,
}

/// Indexed by `[parameter.index()][condition]`, low first
static PHRASES: [[Phrase; 2]; 5] = [
    [
        Phrase {
            action: "Increase temperature",
            remedy: "Use greenhouse heating or row covers to maintain warmth.",
            standalone: "Increase greenhouse temperature or use row covers to maintain warmth.",
        },
        Phrase {
            action: "Reduce temperature",
            remedy: "Apply shade cloth and consider misting to cool the crop.",
            standalone: "Apply shade cloth to reduce thermal stress and consider misting to cool the crop.",
        },
    ],
    [
        Phrase {
            action: "Increase humidity",
            remedy: "Apply regular misting or adjust irrigation schedule.",
            standalone: "Increase humidity through regular misting or irrigation.",
        },
        Phrase {
            action: "Reduce humidity",
            remedy: "Improve ventilation to prevent disease conditions.",
            standalone: "Improve ventilation to reduce excess humidity and prevent disease.",
        },
    ],
    [
        Phrase {
            action: "Increase soil moisture",
            remedy: "Begin evening irrigation daily or use drip irrigation.",
            standalone: "Begin evening irrigation daily to maintain optimal soil moisture.",
        },
        Phrase {
            action: "Reduce soil moisture",
            remedy: "Improve drainage and reduce irrigation frequency.",
            standalone: "Improve drainage and reduce irrigation frequency to avoid waterlogged conditions.",
        },
    ],
    [
        Phrase {
            action: "Increase pH",
            remedy: "Apply lime or pH-balancing biofertilizer.",
            standalone: "Apply lime or pH-balancing biofertilizer to increase soil pH.",
        },
        Phrase {
            action: "Reduce pH",
            remedy: "Apply sulfur or acidifying amendments for better nutrient uptake.",
            standalone: "Apply sulfur or acidifying amendments to lower soil pH for better nutrient uptake.",
        },
    ],
    [
        Phrase {
            action: "Increase light",
            remedy: "Supplement with grow lights for optimal growth.",
            standalone: "Supplement with grow lights to achieve optimal light intensity for this growth stage.",
        },
        Phrase {
            action: "Reduce light exposure",
            remedy: "Provide partial shade during peak hours.",
            standalone: "Provide partial shade to reduce excessive light exposure.",
        },
    ],
];

pub fn phrase(parameter: Parameter, condition: Condition) -> &'static Phrase {
    let direction = match condition {
        Condition::Low => 0,
        Condition::High => 1,
    };
    &PHRASES[parameter.index()][direction]
}

/// Urgency tag appended after the issue messages
pub fn urgency_tag(category: StressCategory) -> Option<&'static str> {
    match category {
        StressCategory::Severe => Some("URGENT: Immediate intervention required to prevent crop loss."),
        StressCategory::Moderate => {
            Some("IMPORTANT: Address issues within 48 hours to prevent significant yield impact.")
        }
        StressCategory::Mild => Some("MONITOR: Address issues during regular maintenance to optimize yield."),
        StressCategory::None => None,
    }
}

pub fn stage_note(stage: GrowthStage) -> &'static str {
    match stage {
        GrowthStage::Emergence => "Stage note: Ensure soil is warm and moist for proper emergence.",
        GrowthStage::EarlyVegetative => {
            "Stage note: Focus on nutrient application for root and leaf development."
        }
        GrowthStage::MidVegetative => "Stage note: Maintain optimal growth conditions for tasseling.",
        GrowthStage::Reproductive => "Stage note: Ensure adequate water and nutrients for kernel formation.",
        GrowthStage::Maturing => "Stage note: Monitor kernel development and prevent water stress.",
        GrowthStage::MaturityHarvest => "Stage note: Prepare for harvest and maintain dry conditions.",
    }
}

/// Yield class supplied by an external yield predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldClass {
    High,
    Medium,
    Low,
}

impl YieldClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldClass::High => "high",
            YieldClass::Medium => "medium",
            YieldClass::Low => "low",
        }
    }
}

impl fmt::Display for YieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional yield prediction extending the Healthy message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldOutlook {
    pub class: YieldClass,
    /// Percentage, e.g. 82.5
    pub confidence: f64,
}

impl YieldOutlook {
    fn clause(&self) -> String {
        match self.class {
            YieldClass::High => format!(
                " Current practices are optimal for high yield (confidence: {:?}%).",
                self.confidence
            ),
            YieldClass::Medium => format!(
                " Consider minor adjustments for optimal yield potential (confidence: {:?}%).",
                self.confidence
            ),
            YieldClass::Low => format!(
                " Despite healthy parameters, yield prediction is lower than optimal (confidence: {:?}%). Consider nutrient supplementation.",
                self.confidence
            ),
        }
    }
}

fn ranked_message(ranked: &RankedIssue) -> String {
    let phrase = phrase(ranked.issue.parameter, ranked.issue.condition);
    format!(
        "{} (impact score: {:.1}%): {}",
        phrase.action,
        ranked.importance_score * 100.0,
        phrase.remedy
    )
}

fn unranked_message(issue: &Issue) -> String {
    phrase(issue.parameter, issue.condition).standalone.to_string()
}

/// Build the recommendation list for one assessment
pub fn synthesize(
    assessment: &HealthAssessment,
    ranked_issues: &[RankedIssue],
    stress: Option<StressCategory>,
) -> Vec<String> {
    synthesize_with_outlook(assessment, ranked_issues, stress, None)
}

/// Same as [`synthesize`], with an optional yield outlook for healthy crops
pub fn synthesize_with_outlook(
    assessment: &HealthAssessment,
    ranked_issues: &[RankedIssue],
    stress: Option<StressCategory>,
    outlook: Option<&YieldOutlook>,
) -> Vec<String> {
    if assessment.is_healthy() {
        let mut message = HEALTHY_MESSAGE.to_string();
        if let Some(outlook) = outlook {
            message.push_str(&outlook.clause());
        }
        return vec![message];
    }

    let mut recommendations = Vec::with_capacity(ranked_issues.len().max(assessment.issues.len()) + 3);

    if ranked_issues.is_empty() {
        recommendations.extend(assessment.issues.iter().map(unranked_message));
    } else {
        recommendations.push(PRIORITY_BANNER.to_string());
        recommendations.extend(ranked_issues.iter().map(ranked_message));
    }

    if let Some(tag) = stress.and_then(urgency_tag) {
        recommendations.push(tag.to_string());
    }

    if let Some(stage) = assessment.stage.known() {
        recommendations.push(stage_note(stage).to_string());
    }

    recommendations
}
