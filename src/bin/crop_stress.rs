// Crop stress CLI
//
// Loads sensor readings, assesses each one and prints the reports.
// Usage: crop_stress [readings.csv|readings.json]
// Records are appended to CROP_OUTPUT_PATH as JSON lines when it is set.

use anyhow::Context;
use crop_stress_advisor::data::source_for_path;
use crop_stress_advisor::{AssessmentRecord, AssessorConfig, BatchSummary, CropAssessor, JsonLinesSink, ResultSink};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_stress_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AssessorConfig::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config.readings_path = Some(PathBuf::from(path));
    }

    let readings_path = config
        .readings_path
        .clone()
        .context("No readings file given (pass a path or set CROP_READINGS_PATH)")?;

    tracing::info!("Configuration:");
    tracing::info!("  readings: {}", readings_path.display());
    tracing::info!("  seed: {}, trees: {}, samples/stage: {}", config.seed, config.n_trees, config.samples_per_stage);

    let readings = source_for_path(&readings_path).load()?;
    if readings.is_empty() {
        tracing::info!("No readings to assess");
        return Ok(());
    }

    let assessor = CropAssessor::new(&config)?;
    let reports = assessor.assess_all(&readings)?;

    for report in &reports {
        if let Some(field_id) = &report.field_id {
            println!("Field: {}", field_id);
        }
        println!("{}", report.render());
        println!();
    }

    if let Some(output_path) = &config.output_path {
        let mut sink = JsonLinesSink::append_to(output_path)?;
        for report in &reports {
            sink.store(&AssessmentRecord::from_report(report))?;
        }
        sink.flush()?;
        tracing::info!("Stored {} records in {}", sink.written(), output_path.display());
    }

    let summary = BatchSummary::from_reports(&reports);
    tracing::info!(
        total = summary.total,
        healthy = summary.healthy,
        stressed = summary.stressed,
        unknown_stage = summary.unknown_stage,
        "assessment complete"
    );

    Ok(())
}
