//! Report Formatter
//!
//! Renders an assessment into flat text lines. No computation happens here;
//! the output is a direct function of the inputs.

use crate::advice::YieldOutlook;
use crate::evaluation::{HealthAssessment, HealthStatus, Issue};
use crate::model::StressPrediction;
use crate::ranking::RankedIssue;

fn issue_line(issue: &Issue) -> String {
    let unit = issue.unit();
    format!(
        "* {} is {}: {:?} {} (Optimal: {:?}-{:?} {})",
        issue.parameter.display_name(),
        issue.condition,
        issue.value,
        unit,
        issue.optimal_range.min,
        issue.optimal_range.max,
        unit
    )
}

fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Report lines, in order: stage, status, stress level, yield, importance
/// summary, issues (Stressed only), recommendations.
pub fn format_report(
    assessment: &HealthAssessment,
    prediction: Option<&StressPrediction>,
    ranked_issues: &[RankedIssue],
    recommendations: &[String],
    outlook: Option<&YieldOutlook>,
) -> Vec<String> {
    let mut lines = vec![
        format!("Corn Growth Stage: {}", assessment.stage.label()),
        format!("Crop Status: {}", assessment.health_status),
    ];

    if let Some(prediction) = prediction {
        lines.push(format!("Stress Level: {}", prediction.category));
    }

    if let Some(outlook) = outlook {
        lines.push(format!(
            "Predicted Yield: {} (confidence: {:?}%)",
            outlook.class.as_str().to_uppercase(),
            outlook.confidence
        ));
    }

    if let Some(prediction) = prediction {
        let importance = &prediction.importance;
        if !importance.top_parameters.is_empty() {
            lines.push(String::new());
            lines.push("Key Parameters by Importance:".to_string());
            for parameter in &importance.top_parameters {
                lines.push(format!(
                    "* {}: {} impact",
                    parameter.display_name(),
                    percent(importance.score(*parameter))
                ));
            }
        }
    }

    if assessment.health_status == HealthStatus::Stressed {
        lines.push(String::new());
        if ranked_issues.is_empty() {
            lines.push("Current Issues (reason for stress):".to_string());
            lines.extend(assessment.issues.iter().map(issue_line));
        } else {
            lines.push("Current Issues (reason for stress, ranked by importance):".to_string());
            lines.extend(ranked_issues.iter().map(|ranked| {
                format!("{} - {} impact", issue_line(&ranked.issue), percent(ranked.importance_score))
            }));
        }
    }

    lines.push(String::new());
    lines.push("Recommended Actions:".to_string());
    lines.extend(recommendations.iter().map(|rec| format!("* {}", rec)));

    lines
}

/// Join report lines into one printable block
pub fn render(lines: &[String]) -> String {
    lines.join("\n")
}
