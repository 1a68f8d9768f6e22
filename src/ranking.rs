//! Importance-Ranked Issue Selector
//!
//! Joins the descriptive issues of a reading with the classifier's global
//! parameter importance. Only issues on a "top" parameter survive; they are
//! ordered by descending importance, ties in parameter order.

use serde::Serialize;

use crate::evaluation::{HealthAssessment, Issue};
use crate::model::ParameterImportance;

/// An issue annotated with the importance of its parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedIssue {
    #[serde(flatten)]
    pub issue: Issue,
    pub importance_score: f64,
}

/// Select and order the issues that matter according to the classifier.
///
/// Returns an empty list when no top parameters are known; callers then
/// fall back to the unranked issue set.
pub fn select(assessment: &HealthAssessment, importance: &ParameterImportance) -> Vec<RankedIssue> {
    if importance.top_parameters.is_empty() {
        return Vec::new();
    }

    // Issues are already in parameter order, so a stable sort keeps ties there
    let mut ranked: Vec<RankedIssue> = assessment
        .issues
        .iter()
        .filter(|issue| importance.top_parameters.contains(&issue.parameter))
        .map(|issue| RankedIssue {
            issue: issue.clone(),
            importance_score: importance.score(issue.parameter),
        })
        .collect();

    ranked.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));
    ranked
}
