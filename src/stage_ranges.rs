//! Stage Range Table
//!
//! Optimal environmental ranges for each corn growth stage. The table is a
//! dense `stage × parameter` array, so every stage carries every parameter by
//! construction; `StageRangeTable::from_entries` checks completeness when a
//! table is assembled from loose entries instead.
//!
//! Parameter order here (temperature, humidity, soil_moisture, ph, light) is
//! the canonical order used for feature vectors, issue lists and tie-breaks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AssessmentError, Result};

/// Corn growth stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    #[serde(rename = "Emergence (VE)")]
    Emergence,
    #[serde(rename = "Early Vegetative (V2–V4)")]
    EarlyVegetative,
    #[serde(rename = "Mid Vegetative (V5–VT)")]
    MidVegetative,
    #[serde(rename = "Reproductive (R1–R3)")]
    Reproductive,
    #[serde(rename = "Maturing (R4–R5)")]
    Maturing,
    #[serde(rename = "Maturity/Harvest (R6)")]
    MaturityHarvest,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 6] = [
        GrowthStage::Emergence,
        GrowthStage::EarlyVegetative,
        GrowthStage::MidVegetative,
        GrowthStage::Reproductive,
        GrowthStage::Maturing,
        GrowthStage::MaturityHarvest,
    ];

    /// Stage assumed when a reading carries no stage at all
    pub const DEFAULT: GrowthStage = GrowthStage::MidVegetative;

    /// Canonical label, as stored by field devices
    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Emergence => "Emergence (VE)",
            GrowthStage::EarlyVegetative => "Early Vegetative (V2–V4)",
            GrowthStage::MidVegetative => "Mid Vegetative (V5–VT)",
            GrowthStage::Reproductive => "Reproductive (R1–R3)",
            GrowthStage::Maturing => "Maturing (R4–R5)",
            GrowthStage::MaturityHarvest => "Maturity/Harvest (R6)",
        }
    }

    /// Parse a stage label.
    ///
    /// Accepts the canonical en-dash labels, plain hyphens, and the
    /// `â€“` mojibake some upstream loaders produce for the en dash.
    /// Returns None for anything else (an unknown stage, not an error).
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().replace("â€“", "–").replace('-', "–");
        GrowthStage::ALL
            .into_iter()
            .find(|stage| stage.label() == normalized)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sensor parameter monitored per reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Temperature,
    Humidity,
    SoilMoisture,
    Ph,
    Light,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::SoilMoisture,
        Parameter::Ph,
        Parameter::Light,
    ];

    /// Field name used in readings and stored records
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::Humidity => "humidity",
            Parameter::SoilMoisture => "soil_moisture",
            Parameter::Ph => "ph",
            Parameter::Light => "light",
        }
    }

    /// Human-facing name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Humidity => "Humidity",
            Parameter::SoilMoisture => "Soil Moisture",
            Parameter::Ph => "pH",
            Parameter::Light => "Light",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimal (inclusive) range for one parameter at one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, unit: &'static str) -> Self {
        Self { min, max, unit }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

const CELSIUS: &str = "°C";
const PERCENT: &str = "%";
const PH: &str = "pH";
const LUX: &str = "lux";

// Rows follow GrowthStage::ALL, columns follow Parameter::ALL.
static CORN_RANGES: StageRangeTable = StageRangeTable {
    ranges: [
        // Emergence (VE)
        [
            ParameterRange::new(25.0, 30.0, CELSIUS),
            ParameterRange::new(70.0, 85.0, PERCENT),
            ParameterRange::new(60.0, 80.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(15000.0, 25000.0, LUX),
        ],
        // Early Vegetative (V2–V4)
        [
            ParameterRange::new(26.0, 33.0, CELSIUS),
            ParameterRange::new(65.0, 80.0, PERCENT),
            ParameterRange::new(60.0, 80.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(30000.0, 45000.0, LUX),
        ],
        // Mid Vegetative (V5–VT)
        [
            ParameterRange::new(27.0, 33.0, CELSIUS),
            ParameterRange::new(60.0, 80.0, PERCENT),
            ParameterRange::new(60.0, 80.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(40000.0, 50000.0, LUX),
        ],
        // Reproductive (R1–R3)
        [
            ParameterRange::new(27.0, 35.0, CELSIUS),
            ParameterRange::new(65.0, 80.0, PERCENT),
            ParameterRange::new(80.0, 100.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(50000.0, 70000.0, LUX),
        ],
        // Maturing (R4–R5)
        [
            ParameterRange::new(25.0, 32.0, CELSIUS),
            ParameterRange::new(55.0, 75.0, PERCENT),
            ParameterRange::new(60.0, 80.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(35000.0, 50000.0, LUX),
        ],
        // Maturity/Harvest (R6)
        [
            ParameterRange::new(25.0, 30.0, CELSIUS),
            ParameterRange::new(50.0, 70.0, PERCENT),
            ParameterRange::new(60.0, 75.0, PERCENT),
            ParameterRange::new(5.5, 7.5, PH),
            ParameterRange::new(0.0, 99999.0, LUX),
        ],
    ],
};

/// Growth stage → parameter → optimal range
#[derive(Debug, Clone, PartialEq)]
pub struct StageRangeTable {
    ranges: [[ParameterRange; 5]; 6],
}

impl StageRangeTable {
    /// The built-in corn table
    pub fn corn() -> &'static StageRangeTable {
        &CORN_RANGES
    }

    /// Assemble a table from loose `(stage, parameter, range)` entries.
    ///
    /// Every stage must define every parameter and each range must have
    /// `min <= max`. Later duplicates overwrite earlier ones.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (GrowthStage, Parameter, ParameterRange)>,
    {
        let mut slots: [[Option<ParameterRange>; 5]; 6] = [[None; 5]; 6];

        for (stage, parameter, range) in entries {
            if !(range.min <= range.max) {
                return Err(AssessmentError::InvalidRange {
                    stage,
                    parameter,
                    min: range.min,
                    max: range.max,
                });
            }
            slots[stage.index()][parameter.index()] = Some(range);
        }

        let mut ranges = [[ParameterRange::new(0.0, 0.0, ""); 5]; 6];
        for stage in GrowthStage::ALL {
            for parameter in Parameter::ALL {
                ranges[stage.index()][parameter.index()] = slots[stage.index()]
                    [parameter.index()]
                .ok_or(AssessmentError::IncompleteRangeTable { stage, parameter })?;
            }
        }

        Ok(Self { ranges })
    }

    pub fn range(&self, stage: GrowthStage, parameter: Parameter) -> &ParameterRange {
        &self.ranges[stage.index()][parameter.index()]
    }

    /// All ranges for one stage, in parameter order
    pub fn stage_ranges(
        &self,
        stage: GrowthStage,
    ) -> impl Iterator<Item = (Parameter, &ParameterRange)> + '_ {
        Parameter::ALL
            .into_iter()
            .zip(self.ranges[stage.index()].iter())
    }

    /// Flatten back into entries (handy for deriving custom tables)
    pub fn entries(&self) -> Vec<(GrowthStage, Parameter, ParameterRange)> {
        GrowthStage::ALL
            .into_iter()
            .flat_map(|stage| {
                self.stage_ranges(stage)
                    .map(move |(parameter, range)| (stage, parameter, *range))
            })
            .collect()
    }
}
