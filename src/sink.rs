//! Result Sink
//!
//! Serializable record of one assessment and a JSON-lines writer for it.
//! Field names are camelCase to match the documents the field database
//! already stores.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::evaluation::{Condition, HealthAssessment, Issue};
use crate::model::{StressCategory, StressPrediction};
use crate::pipeline::CropReport;
use crate::ranking::RankedIssue;
use crate::reading::SensorValue;
use crate::stage_ranges::Parameter;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeRecord {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub parameter: Parameter,
    pub value: f64,
    pub condition: Condition,
    pub optimal_range: RangeRecord,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_score: Option<f64>,
}

impl IssueRecord {
    fn from_issue(issue: &Issue, importance_score: Option<f64>) -> Self {
        Self {
            parameter: issue.parameter,
            value: issue.value,
            condition: issue.condition,
            optimal_range: RangeRecord {
                min: issue.optimal_range.min,
                max: issue.optimal_range.max,
            },
            unit: issue.unit(),
            importance_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressLevelRecord {
    pub prediction: StressCategory,
    /// Percentage
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportanceRecord {
    pub top_parameters: Vec<Parameter>,
    pub importance_scores: BTreeMap<Parameter, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsRecord {
    pub stress_level: StressLevelRecord,
    pub parameter_importance: ImportanceRecord,
}

/// Stored document for one assessed reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub timestamp: DateTime<Utc>,
    pub field_id: Option<String>,
    pub corn_stage: String,
    pub health_status: String,
    /// Raw values as received; absent values are null
    pub parameters: BTreeMap<Parameter, Option<SensorValue>>,
    pub issues: Vec<IssueRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<PredictionsRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_issues: Option<Vec<IssueRecord>>,
    pub recommendations: Vec<String>,
}

impl AssessmentRecord {
    pub fn new(
        field_id: Option<String>,
        assessment: &HealthAssessment,
        prediction: Option<&StressPrediction>,
        ranked_issues: &[RankedIssue],
        recommendations: &[String],
        timestamp: DateTime<Utc>,
    ) -> Self {
        let parameters = Parameter::ALL
            .into_iter()
            .map(|p| (p, assessment.raw_value(p).cloned()))
            .collect();

        let predictions = prediction.map(|prediction| PredictionsRecord {
            stress_level: StressLevelRecord {
                prediction: prediction.category,
                confidence: prediction.confidence,
            },
            parameter_importance: ImportanceRecord {
                top_parameters: prediction.importance.top_parameters.clone(),
                importance_scores: prediction.importance.importance_scores.clone(),
            },
        });

        let important_issues = (!ranked_issues.is_empty()).then(|| {
            ranked_issues
                .iter()
                .map(|r| IssueRecord::from_issue(&r.issue, Some(r.importance_score)))
                .collect()
        });

        Self {
            timestamp,
            field_id,
            corn_stage: assessment.stage.label().to_string(),
            health_status: assessment.health_status.display_text().to_string(),
            parameters,
            issues: assessment
                .issues
                .iter()
                .map(|issue| IssueRecord::from_issue(issue, None))
                .collect(),
            stress_level: prediction.map(|p| p.category),
            predictions,
            important_issues,
            recommendations: recommendations.to_vec(),
        }
    }

    /// Record for a pipeline report, stamped with the current time
    pub fn from_report(report: &CropReport) -> Self {
        Self::new(
            report.field_id.clone(),
            &report.assessment,
            Some(&report.prediction),
            &report.ranked_issues,
            &report.recommendations,
            Utc::now(),
        )
    }
}

/// Durable destination for assessment records
pub trait ResultSink {
    fn store(&mut self, record: &AssessmentRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON document per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Append to a file, creating it if needed
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn store(&mut self, record: &AssessmentRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize assessment record")?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush assessment records")
    }
}
