//! Reading source and result sink tests against real files.

use crop_stress_advisor::data::source_for_path;
use crop_stress_advisor::{
    AssessmentRecord, AssessorConfig, CropAssessor, CsvReadingSource, JsonLinesSink, JsonReadingSource,
    Parameter, ReadingSource, ResultSink, SensorValue,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_csv_source_with_mixed_columns() {
    let file = write_temp(
        ".csv",
        "fieldId,cornStage,temperature,humidity,soilMoisture,ph,light\n\
         field_1,Emergence (VE),26.5,72,65,6.4,18000\n\
         field_2,Reproductive (R1–R3),31.0,n/a,90,6.9,60000\n\
         field_3,,28.0,70,,6.5,45000\n",
    );

    let readings = CsvReadingSource::new(file.path()).load().unwrap();
    assert_eq!(readings.len(), 3);

    assert_eq!(readings[0].field_id.as_deref(), Some("field_1"));
    assert_eq!(readings[0].numeric(Parameter::Humidity), Some(72.0));
    assert_eq!(readings[1].stage.as_deref(), Some("Reproductive (R1–R3)"));
    // Text column: every value stays text and is coerced per value
    assert_eq!(readings[1].value(Parameter::Humidity), Some(&SensorValue::from("n/a")));
    assert_eq!(readings[1].numeric(Parameter::Humidity), None);
    assert!(readings[2].value(Parameter::SoilMoisture).is_none());
    assert!(readings[2].stage.is_none());
}

#[test]
fn test_csv_late_non_numeric_value_loads() {
    let mut contents = String::from("field_id,corn_stage,temperature,humidity,soil_moisture,ph,light\n");
    for row in 1..=150 {
        let humidity = if row == 120 { "n/a".to_string() } else { "75".to_string() };
        contents.push_str(&format!("f{row},Emergence (VE),27,{humidity},70,6.5,20000\n"));
    }
    let file = write_temp(".csv", &contents);

    let readings = CsvReadingSource::new(file.path()).load().unwrap();
    assert_eq!(readings.len(), 150);

    let late = &readings[119];
    assert_eq!(late.field_id.as_deref(), Some("f120"));
    assert_eq!(late.value(Parameter::Humidity), Some(&SensorValue::from("n/a")));
    assert_eq!(late.numeric(Parameter::Humidity), None);

    assert!(readings
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 119)
        .all(|(_, r)| r.numeric(Parameter::Humidity) == Some(75.0)));
    assert_eq!(readings[149].numeric(Parameter::Temperature), Some(27.0));
}

#[test]
fn test_empty_files_yield_no_readings() {
    let csv = write_temp(".csv", "");
    assert!(CsvReadingSource::new(csv.path()).load().unwrap().is_empty());

    let header_only = write_temp(".csv", "field_id,corn_stage,temperature\n");
    assert!(CsvReadingSource::new(header_only.path()).load().unwrap().is_empty());

    let json = write_temp(".json", "[]");
    assert!(JsonReadingSource::new(json.path()).load().unwrap().is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let source = CsvReadingSource::new("/nonexistent/readings.csv");
    assert!(source.load().is_err());
}

#[test]
fn test_source_selected_by_extension() {
    let json = write_temp(
        ".jsonl",
        "{\"fieldId\": \"a\", \"cornStage\": \"Emergence (VE)\", \"temperature\": 27}\n\
         {\"fieldId\": \"b\", \"corn_stage\": \"Maturing (R4–R5)\", \"ph\": \"6.1\"}\n",
    );
    let readings = source_for_path(json.path()).load().unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1].numeric(Parameter::Ph), Some(6.1));
}

#[test]
fn test_csv_to_json_lines_round() {
    let input = write_temp(
        ".csv",
        "field_id,corn_stage,temperature,humidity,soil_moisture,ph,light\n\
         north,Emergence (VE),27,75,70,6.5,20000\n\
         south,Emergence (VE),20,75,70,6.5,20000\n",
    );
    let readings = CsvReadingSource::new(input.path()).load().unwrap();
    let assessor = CropAssessor::new(&AssessorConfig {
        n_trees: 20,
        ..Default::default()
    })
    .unwrap();
    let reports = assessor.assess_all(&readings).unwrap();

    let output = NamedTempFile::new().unwrap();
    {
        let mut sink = JsonLinesSink::append_to(output.path()).unwrap();
        for report in &reports {
            sink.store(&AssessmentRecord::from_report(report)).unwrap();
        }
        sink.flush().unwrap();
        assert_eq!(sink.written(), 2);
    }

    let stored = std::fs::read_to_string(output.path()).unwrap();
    let docs: Vec<serde_json::Value> = stored
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["fieldId"], "north");
    assert_eq!(docs[0]["healthStatus"], "Healthy");
    assert_eq!(docs[1]["healthStatus"], "Stressed");
    assert_eq!(docs[1]["issues"][0]["parameter"], "temperature");
    assert!(docs[1]["predictions"]["parameterImportance"]["importanceScores"].is_object());
    assert_eq!(docs[1]["recommendations"].as_array().map(|r| r.is_empty()), Some(false));
}
