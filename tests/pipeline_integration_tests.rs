//! Pipeline Integration Tests
//!
//! Runs readings end to end through CropAssessor: evaluation, prediction,
//! ranking, recommendations and report.

use crop_stress_advisor::{
    AssessorConfig, CropAssessor, GrowthStage, HealthStatus, Parameter, Reading, StageRangeTable,
    StressCategory,
};

fn assessor() -> CropAssessor {
    CropAssessor::new(&AssessorConfig {
        n_trees: 40,
        ..Default::default()
    })
    .expect("training should succeed")
}

fn midpoint_reading(stage: GrowthStage) -> Reading {
    let table = StageRangeTable::corn();
    Reading::for_stage(stage.label()).with_values(Parameter::ALL.map(|p| table.range(stage, p).midpoint()))
}

#[test]
fn test_every_stage_midpoint_is_healthy() {
    let assessor = assessor();
    for stage in GrowthStage::ALL {
        let report = assessor.assess(&midpoint_reading(stage)).unwrap();
        assert_eq!(report.assessment.health_status, HealthStatus::Healthy, "{}", stage);
        assert_eq!(
            report.recommendations,
            vec!["All parameters are within optimal ranges. Maintain current conditions.".to_string()]
        );
    }
}

#[test]
fn test_severe_reading_gets_urgent_priority_advice() {
    let assessor = assessor();
    // Every parameter about a full range width outside its band
    let reading = Reading::for_stage("Early Vegetative (V2–V4)").with_values([41.0, 50.0, 40.0, 3.6, 16000.0]);
    let report = assessor.assess(&reading).unwrap();

    assert_eq!(report.assessment.health_status, HealthStatus::Stressed);
    assert_eq!(report.assessment.issues.len(), 5);
    assert!(report.prediction.category >= StressCategory::Moderate);
    assert!(!report.ranked_issues.is_empty());
    assert_eq!(
        report.recommendations[0],
        "Priority issues based on predictive analysis:"
    );

    let tail = &report.recommendations[report.recommendations.len() - 2..];
    assert!(tail[0].starts_with("URGENT") || tail[0].starts_with("IMPORTANT"));
    assert_eq!(tail[1], "Stage note: Focus on nutrient application for root and leaf development.");

    let rendered = report.render();
    assert!(rendered.contains("Current Issues (reason for stress, ranked by importance):"));
    assert!(rendered.contains("Key Parameters by Importance:"));
}

#[test]
fn test_unknown_stage_is_terminal_not_error() {
    let report = assessor()
        .assess(&Reading::for_stage("Flowering (XX)").with_values([50.0, 5.0, 5.0, 2.0, 1.0]))
        .unwrap();

    assert_eq!(report.assessment.health_status, HealthStatus::UnknownStage);
    assert!(report.assessment.issues.is_empty());
    assert!(report.ranked_issues.is_empty());
    assert!(report.recommendations.iter().all(|r| !r.starts_with("Stage note")));
    assert_eq!(report.report_lines[1], "Crop Status: Unknown Stage");
}

#[test]
fn test_mojibake_stage_label_is_recognized() {
    let reading = Reading::for_stage("Mid Vegetative (V5â€“VT)").with_values([30.0, 70.0, 70.0, 6.5, 45000.0]);
    let report = assessor().assess(&reading).unwrap();
    assert_eq!(report.assessment.health_status, HealthStatus::Healthy);
    assert_eq!(report.report_lines[0], "Corn Growth Stage: Mid Vegetative (V5–VT)");
}

#[test]
fn test_same_seed_gives_same_reports() {
    let reading = Reading::for_stage("Maturing (R4–R5)").with_values([34.0, 50.0, 58.0, 6.0, 52000.0]);
    let a = assessor().assess(&reading).unwrap();
    let b = assessor().assess(&reading).unwrap();

    assert_eq!(a.prediction, b.prediction);
    assert_eq!(a.recommendations, b.recommendations);
    assert_eq!(a.report_lines, b.report_lines);
}

#[test]
fn test_batch_matches_single_assessment() {
    let assessor = assessor();
    let readings = vec![
        midpoint_reading(GrowthStage::Emergence),
        Reading::for_stage("Reproductive (R1–R3)").with_values([38.0, 60.0, 70.0, 6.5, 48000.0]),
        Reading::default(),
        Reading::for_stage("Flowering (XX)"),
    ];

    let batch = assessor.assess_all(&readings).unwrap();
    for (reading, report) in readings.iter().zip(&batch) {
        let single = assessor.assess(reading).unwrap();
        assert_eq!(single.report_lines, report.report_lines);
    }
}
