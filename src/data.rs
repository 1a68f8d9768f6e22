//! Reading Sources
//!
//! Loads sensor readings from CSV (via Polars) or JSON files.
//!
//! Column names follow either the snake_case form (`soil_moisture`,
//! `corn_stage`, `field_id`) or the camelCase form used by the field
//! database export (`soilMoisture`, `cornStage`, `fieldId`). Unrecognized
//! columns are ignored. Numeric columns become numbers; string columns keep
//! their text so every bad value is diagnosed individually by the evaluator.
//!
//! An empty file yields zero readings.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::reading::{Reading, SensorValue};
use crate::stage_ranges::Parameter;

/// Supplier of readings to assess
pub trait ReadingSource {
    fn load(&self) -> Result<Vec<Reading>>;
}

/// Where a source column lands in a `Reading`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingColumn {
    FieldId,
    Stage,
    Value(Parameter),
}

fn column_aliases() -> FxHashMap<&'static str, ReadingColumn> {
    let mut map = FxHashMap::default();
    map.insert("field_id", ReadingColumn::FieldId);
    map.insert("fieldId", ReadingColumn::FieldId);
    map.insert("corn_stage", ReadingColumn::Stage);
    map.insert("cornStage", ReadingColumn::Stage);
    map.insert("stage", ReadingColumn::Stage);
    map.insert("soilMoisture", ReadingColumn::Value(Parameter::SoilMoisture));
    for parameter in Parameter::ALL {
        map.insert(parameter.as_str(), ReadingColumn::Value(parameter));
    }
    map
}

/// CSV file with a header row
pub struct CsvReadingSource {
    path: PathBuf,
}

impl CsvReadingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReadingSource for CsvReadingSource {
    fn load(&self) -> Result<Vec<Reading>> {
        let path = &self.path;
        let size = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat readings file: {}", path.display()))?
            .len();
        if size == 0 {
            info!("readings file {} is empty", path.display());
            return Ok(Vec::new());
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            // scan every row so a late non-numeric value types the column as text
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.clone()))
            .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
            .finish()
            .with_context(|| format!("Failed to load readings CSV: {}", path.display()))?;

        let readings = readings_from_frame(&df)?;
        info!("loaded {} readings from {}", readings.len(), path.display());
        Ok(readings)
    }
}

/// JSON array of reading objects, or one object per line
pub struct JsonReadingSource {
    path: PathBuf,
}

impl JsonReadingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReadingSource for JsonReadingSource {
    fn load(&self) -> Result<Vec<Reading>> {
        let path = &self.path;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read readings file: {}", path.display()))?;
        let readings = parse_json_readings(&text)
            .with_context(|| format!("Failed to parse readings JSON: {}", path.display()))?;
        info!("loaded {} readings from {}", readings.len(), path.display());
        Ok(readings)
    }
}

/// Parse a JSON array or JSON-lines document
pub fn parse_json_readings(text: &str) -> Result<Vec<Reading>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid reading on line {}", idx + 1))
        })
        .collect()
}

/// Pick a source by file extension (`.json`/`.jsonl` → JSON, else CSV)
pub fn source_for_path(path: &Path) -> Box<dyn ReadingSource> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") | Some("jsonl") | Some("ndjson") => Box::new(JsonReadingSource::new(path)),
        _ => Box::new(CsvReadingSource::new(path)),
    }
}

/// Convert a loaded frame into readings, one per row
pub fn readings_from_frame(df: &DataFrame) -> Result<Vec<Reading>> {
    let aliases = column_aliases();
    let mut readings = vec![Reading::default(); df.height()];

    for column in df.get_columns() {
        let name = column.name().as_str();
        let Some(&target) = aliases.get(name) else {
            debug!("ignoring column '{}'", name);
            continue;
        };

        match target {
            ReadingColumn::FieldId | ReadingColumn::Stage => {
                let text = column
                    .cast(&DataType::String)
                    .with_context(|| format!("Column '{}' cannot be read as text", name))?;
                let text = text
                    .str()
                    .with_context(|| format!("Column '{}' is not string type", name))?;
                for (reading, value) in readings.iter_mut().zip(text.into_iter()) {
                    let value = value.map(str::to_string);
                    match target {
                        ReadingColumn::FieldId => reading.field_id = value,
                        _ => reading.stage = value,
                    }
                }
            }
            ReadingColumn::Value(parameter) => {
                let values: Vec<Option<SensorValue>> = if column.dtype() == &DataType::String {
                    column
                        .str()
                        .with_context(|| format!("Column '{}' is not string type", name))?
                        .into_iter()
                        .map(|v| v.map(SensorValue::from))
                        .collect()
                } else {
                    match column.cast(&DataType::Float64) {
                        Ok(cast) => cast
                            .f64()
                            .with_context(|| format!("Column '{}' is not numeric", name))?
                            .into_iter()
                            .map(|v| v.map(SensorValue::Number))
                            .collect(),
                        Err(e) => {
                            warn!("column '{}' ({:?}) is not numeric, treating as missing: {}", name, column.dtype(), e);
                            continue;
                        }
                    }
                };
                for (reading, value) in readings.iter_mut().zip(values) {
                    reading.set_value(parameter, value);
                }
            }
        }
    }

    Ok(readings)
}
