//! Crop Assessor - main coordinator for the stress-assessment pipeline
//!
//! Trains the stress classifier once at construction, then runs every
//! reading through evaluation, prediction, ranking, advice and report
//! formatting. The trained model is read-only afterwards, so batches are
//! assessed in parallel with Rayon without locking.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::advice::{synthesize_with_outlook, YieldOutlook};
use crate::config::AssessorConfig;
use crate::error::Result;
use crate::evaluation::{evaluate_with, HealthAssessment};
use crate::model::{StressClassifier, StressPrediction, TrainedClassifier};
use crate::ranking::{select, RankedIssue};
use crate::reading::Reading;
use crate::report::format_report;
use crate::stage_ranges::StageRangeTable;

/// Everything produced for one reading
#[derive(Debug, Clone)]
pub struct CropReport {
    pub field_id: Option<String>,
    pub assessment: HealthAssessment,
    pub prediction: StressPrediction,
    pub ranked_issues: Vec<RankedIssue>,
    pub recommendations: Vec<String>,
    pub report_lines: Vec<String>,
}

impl CropReport {
    pub fn render(&self) -> String {
        crate::report::render(&self.report_lines)
    }
}

/// Batch summary counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub healthy: usize,
    pub stressed: usize,
    pub unknown_stage: usize,
}

impl BatchSummary {
    pub fn from_reports(reports: &[CropReport]) -> Self {
        use crate::evaluation::HealthStatus;

        reports.iter().fold(
            BatchSummary {
                total: reports.len(),
                ..Default::default()
            },
            |mut summary, report| {
                match report.assessment.health_status {
                    HealthStatus::Healthy => summary.healthy += 1,
                    HealthStatus::Stressed => summary.stressed += 1,
                    HealthStatus::UnknownStage => summary.unknown_stage += 1,
                }
                summary
            },
        )
    }
}

pub struct CropAssessor {
    table: &'static StageRangeTable,
    classifier: StressClassifier,
}

impl CropAssessor {
    /// Train on synthetic data for the corn range table
    pub fn new(config: &AssessorConfig) -> Result<Self> {
        config.validate()?;
        info!(
            seed = config.seed,
            samples_per_stage = config.samples_per_stage,
            trees = config.n_trees,
            "initializing crop assessor"
        );

        let table = StageRangeTable::corn();
        let mut classifier = StressClassifier::new(config.classifier_config());
        classifier.ensure_trained(table)?;

        Ok(Self { table, classifier })
    }

    pub fn classifier(&self) -> Result<&TrainedClassifier> {
        self.classifier.trained()
    }

    pub fn assess(&self, reading: &Reading) -> Result<CropReport> {
        self.assess_with_outlook(reading, None)
    }

    /// Assess one reading, optionally extending a Healthy verdict with a
    /// yield outlook from an external predictor
    pub fn assess_with_outlook(&self, reading: &Reading, outlook: Option<&YieldOutlook>) -> Result<CropReport> {
        let classifier = self.classifier.trained()?;

        let assessment = evaluate_with(self.table, reading);
        let prediction = classifier.predict(reading)?;
        let ranked_issues = select(&assessment, &prediction.importance);
        let recommendations =
            synthesize_with_outlook(&assessment, &ranked_issues, Some(prediction.category), outlook);
        let report_lines = format_report(
            &assessment,
            Some(&prediction),
            &ranked_issues,
            &recommendations,
            outlook,
        );

        debug!(
            field_id = ?reading.field_id,
            status = %assessment.health_status,
            stress = %prediction.category,
            issues = assessment.issues.len(),
            "reading assessed"
        );

        Ok(CropReport {
            field_id: reading.field_id.clone(),
            assessment,
            prediction,
            ranked_issues,
            recommendations,
            report_lines,
        })
    }

    /// Assess many readings in parallel; output order matches input order
    pub fn assess_all(&self, readings: &[Reading]) -> Result<Vec<CropReport>> {
        info!("assessing {} readings", readings.len());
        readings
            .par_iter()
            .map(|reading| self.assess(reading))
            .collect()
    }
}
