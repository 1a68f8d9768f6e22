//! Sensor Readings
//!
//! One periodic observation from a field: five environmental parameters,
//! a growth stage label and an optional field identifier. Any parameter may
//! be absent or arrive as something other than a number; absence stays
//! `None` all the way through (never zero).

use serde::{Deserialize, Serialize};

use crate::stage_ranges::Parameter;

/// Raw sensor value as delivered by the reading source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
    /// Anything else a loosely typed source may hand over (bools, objects, ...)
    Other(serde_json::Value),
}

impl SensorValue {
    /// Best-effort numeric coercion.
    ///
    /// Numbers pass through, text is trimmed and parsed. Non-finite results
    /// count as coercion failures.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            SensorValue::Number(v) => *v,
            SensorValue::Text(s) => s.trim().parse::<f64>().ok()?,
            SensorValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        SensorValue::Number(value)
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        SensorValue::Text(value.to_string())
    }
}

/// A single sensor reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default, alias = "fieldId")]
    pub field_id: Option<String>,

    #[serde(default, rename = "corn_stage", alias = "cornStage", alias = "stage")]
    pub stage: Option<String>,

    #[serde(default)]
    pub temperature: Option<SensorValue>,

    #[serde(default)]
    pub humidity: Option<SensorValue>,

    #[serde(default, alias = "soilMoisture")]
    pub soil_moisture: Option<SensorValue>,

    #[serde(default)]
    pub ph: Option<SensorValue>,

    #[serde(default)]
    pub light: Option<SensorValue>,
}

impl Reading {
    /// Reading for a stage label with no parameter values yet
    pub fn for_stage(stage: &str) -> Self {
        Self {
            stage: Some(stage.to_string()),
            ..Default::default()
        }
    }

    pub fn with_field_id(mut self, field_id: &str) -> Self {
        self.field_id = Some(field_id.to_string());
        self
    }

    pub fn with_value(mut self, parameter: Parameter, value: impl Into<SensorValue>) -> Self {
        *self.slot_mut(parameter) = Some(value.into());
        self
    }

    /// All five numeric values at once, in parameter order
    pub fn with_values(mut self, values: [f64; 5]) -> Self {
        for (parameter, value) in Parameter::ALL.into_iter().zip(values) {
            *self.slot_mut(parameter) = Some(SensorValue::Number(value));
        }
        self
    }

    pub fn value(&self, parameter: Parameter) -> Option<&SensorValue> {
        match parameter {
            Parameter::Temperature => self.temperature.as_ref(),
            Parameter::Humidity => self.humidity.as_ref(),
            Parameter::SoilMoisture => self.soil_moisture.as_ref(),
            Parameter::Ph => self.ph.as_ref(),
            Parameter::Light => self.light.as_ref(),
        }
    }

    /// Numeric value, or None when absent or not coercible
    pub fn numeric(&self, parameter: Parameter) -> Option<f64> {
        self.value(parameter).and_then(SensorValue::to_f64)
    }

    pub fn set_value(&mut self, parameter: Parameter, value: Option<SensorValue>) {
        *self.slot_mut(parameter) = value;
    }

    fn slot_mut(&mut self, parameter: Parameter) -> &mut Option<SensorValue> {
        match parameter {
            Parameter::Temperature => &mut self.temperature,
            Parameter::Humidity => &mut self.humidity,
            Parameter::SoilMoisture => &mut self.soil_moisture,
            Parameter::Ph => &mut self.ph,
            Parameter::Light => &mut self.light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(SensorValue::Number(27.5).to_f64(), Some(27.5));
        assert_eq!(SensorValue::from(" 6.8 ").to_f64(), Some(6.8));
        assert_eq!(SensorValue::from("n/a").to_f64(), None);
        assert_eq!(SensorValue::from("NaN").to_f64(), None);
        assert_eq!(SensorValue::Other(serde_json::json!(true)).to_f64(), None);
    }

    #[test]
    fn test_deserialize_mixed_document() {
        let json = r#"{
            "fieldId": "field_7",
            "cornStage": "Emergence (VE)",
            "temperature": 26.1,
            "humidity": "72",
            "soilMoisture": null,
            "ph": true
        }"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.field_id.as_deref(), Some("field_7"));
        assert_eq!(reading.stage.as_deref(), Some("Emergence (VE)"));
        assert_eq!(reading.numeric(Parameter::Temperature), Some(26.1));
        assert_eq!(reading.numeric(Parameter::Humidity), Some(72.0));
        assert!(reading.value(Parameter::SoilMoisture).is_none());
        assert!(reading.value(Parameter::Ph).is_some());
        assert_eq!(reading.numeric(Parameter::Ph), None);
        assert!(reading.value(Parameter::Light).is_none());
    }

    #[test]
    fn test_builder() {
        let reading = Reading::for_stage("Maturing (R4–R5)")
            .with_values([28.0, 60.0, 70.0, 6.5, 40000.0])
            .with_value(Parameter::Light, "bright");

        assert_eq!(reading.numeric(Parameter::SoilMoisture), Some(70.0));
        assert_eq!(reading.numeric(Parameter::Light), None);
    }
}
