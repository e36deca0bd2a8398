use nom::{
    character::complete::multispace0, combinator::all_consuming, number::complete::double,
    sequence::delimited, IResult, Parser,
};
use serde::{Deserialize, Serialize};

/// Marker entered in forms for a parameter that could not be tested.
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// Canonical parameter keys shared by the built-in modes and the advisor.
pub mod params {
    pub const TEMPERATURE: &str = "Temperature (°F)";
    pub const SALINITY: &str = "Salinity (SG)";
    pub const PH: &str = "pH";
    pub const ALKALINITY: &str = "Alkalinity (dKH)";
    pub const CALCIUM: &str = "Calcium (ppm)";
    pub const MAGNESIUM: &str = "Magnesium (ppm)";
    pub const NITRATE: &str = "Nitrate (ppm)";
    pub const PHOSPHATE: &str = "Phosphate (ppm)";
    pub const AMMONIA: &str = "Ammonia (ppm)";
}

/// Equipment categories the advisor and compatibility checker look at.
pub mod categories {
    pub const HEATER: &str = "Heater";
    pub const SKIMMER: &str = "Skimmer";
    pub const RETURN_PUMP: &str = "Return Pump";
    pub const OVERFLOW_TYPE: &str = "Overflow Type";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ParameterBound {
    pub parameter: String,
    pub low: f64,
    pub high: f64,
}

impl ParameterBound {
    pub fn new(parameter: &str, low: f64, high: f64) -> Self {
        Self {
            parameter: parameter.to_string(),
            low,
            high,
        }
    }

    /// True when the value lies strictly outside `[low, high]`.
    pub fn excludes(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}

/// Named profile of acceptable parameter ranges.
///
/// Bounds keep insertion order; alerts are reported in that order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Mode {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<ParameterBound>,
}

impl Mode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bounds: Vec::new(),
        }
    }

    pub fn bound(&self, parameter: &str) -> Option<&ParameterBound> {
        self.bounds.iter().find(|b| b.parameter == parameter)
    }
}

/// A raw measurement as entered by the keeper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Enum)]
#[serde(from = "RawRepr", into = "RawRepr")]
pub enum RawValue {
    Number { value: f64 },
    Text { value: String },
    NotMeasured,
}

impl RawValue {
    /// Numeric view of the value; `None` when it was not measured or is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number { value } => Some(*value).filter(|v| v.is_finite()),
            RawValue::Text { value } => parse_number_text(value),
            RawValue::NotMeasured => None,
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number { value } => write!(f, "{}", format_number(*value)),
            RawValue::Text { value } => write!(f, "{}", value),
            RawValue::NotMeasured => write!(f, "{}", UNAVAILABLE_MARKER),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRepr {
    Number(f64),
    Text(String),
    NotMeasured,
}

impl From<RawRepr> for RawValue {
    fn from(repr: RawRepr) -> Self {
        match repr {
            RawRepr::Number(value) => RawValue::Number { value },
            RawRepr::Text(value) => RawValue::Text { value },
            RawRepr::NotMeasured => RawValue::NotMeasured,
        }
    }
}

impl From<RawValue> for RawRepr {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Number { value } => RawRepr::Number(value),
            RawValue::Text { value } => RawRepr::Text(value),
            RawValue::NotMeasured => RawRepr::NotMeasured,
        }
    }
}

fn parse_number_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNAVAILABLE_MARKER) {
        return None;
    }
    let parsed: IResult<&str, f64> =
        all_consuming(delimited(multispace0, double, multispace0)).parse(trimmed);
    parsed.ok().map(|(_, v)| v).filter(|v| v.is_finite())
}

/// Formats a number with `f64`'s `Debug` output, as readings are shown to the
/// keeper: `9.0`, `0.25`, and exponent form outside that range (`1e16`, `1e-7`).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Reading {
    pub parameter: String,
    pub value: RawValue,
}

/// One water test. Readings keep the order they were entered in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ParameterLogRecord {
    pub timestamp: String,
    #[serde(default)]
    pub readings: Vec<Reading>,
}

impl ParameterLogRecord {
    pub fn new(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            readings: Vec::new(),
        }
    }

    pub fn with(mut self, parameter: &str, value: RawValue) -> Self {
        self.readings.push(Reading {
            parameter: parameter.to_string(),
            value,
        });
        self
    }

    pub fn with_number(self, parameter: &str, value: f64) -> Self {
        self.with(parameter, RawValue::Number { value })
    }

    pub fn get(&self, parameter: &str) -> Option<&RawValue> {
        self.readings
            .iter()
            .find(|r| r.parameter == parameter)
            .map(|r| &r.value)
    }

    pub fn numeric(&self, parameter: &str) -> Option<f64> {
        self.get(parameter).and_then(RawValue::as_number)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct MaintenanceRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub task: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct DiaryEntry {
    pub date: String,
    pub entry: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct EquipmentSelection {
    pub category: String,
    pub model: String,
}

/// Reference data for an equipment model. Not every attribute applies to every category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct EquipmentSpec {
    #[serde(default)]
    pub wattage: Option<f64>,
    #[serde(default)]
    pub rated_tank_volume: Option<f64>,
    #[serde(default)]
    pub flow_rate: Option<f64>,
    #[serde(default)]
    pub recommended_flow_rate: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Tank {
    pub name: String,
    #[serde(default)]
    pub display_volume: Option<f64>,
    #[serde(default)]
    pub sump_volume: Option<f64>,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub livestock: String,
    pub mode: String,
    #[serde(default)]
    pub equipment: Vec<EquipmentSelection>,
    #[serde(default)]
    pub log: Vec<ParameterLogRecord>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceRecord>,
    #[serde(default)]
    pub diary: Vec<DiaryEntry>,
}

impl Tank {
    pub fn new(name: &str, mode: &str) -> Self {
        Self {
            name: name.to_string(),
            display_volume: None,
            sump_volume: None,
            theme: String::new(),
            livestock: String::new(),
            mode: mode.to_string(),
            equipment: Vec::new(),
            log: Vec::new(),
            maintenance: Vec::new(),
            diary: Vec::new(),
        }
    }

    pub fn latest_record(&self) -> Option<&ParameterLogRecord> {
        self.log.last()
    }

    /// Display plus sump capacity; a missing capacity counts as zero.
    pub fn total_volume(&self) -> f64 {
        self.display_volume.unwrap_or(0.0) + self.sump_volume.unwrap_or(0.0)
    }

    pub fn has_equipment(&self, category: &str) -> bool {
        self.equipment.iter().any(|e| e.category == category)
    }

    pub fn equipment_model(&self, category: &str) -> Option<&str> {
        self.equipment
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.model.trim())
            .filter(|m| !m.is_empty())
    }

    /// Binds a category to a model, replacing an earlier choice for that category.
    pub fn set_equipment(&mut self, category: &str, model: &str) {
        match self.equipment.iter_mut().find(|e| e.category == category) {
            Some(existing) => existing.model = model.to_string(),
            None => self.equipment.push(EquipmentSelection {
                category: category.to_string(),
                model: model.to_string(),
            }),
        }
    }
}
