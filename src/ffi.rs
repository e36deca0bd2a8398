//! Functions exported to the app through uniffi.
//!
//! Records cross the boundary by value; dates are `YYYY-MM-DD` strings.

use std::collections::HashMap;

use crate::advisor::{self, Advisory};
use crate::compatibility;
use crate::config::AdvisorConfig;
use crate::error::AdvisoryError;
use crate::evaluator::{self, Alert};
use crate::models::{EquipmentSpec, Mode, ParameterLogRecord, Tank};
use crate::report::TankReport;

#[uniffi::export]
pub fn builtin_modes() -> Vec<Mode> {
    crate::modes::builtin_modes()
}

#[uniffi::export]
pub fn default_advisor_config() -> AdvisorConfig {
    AdvisorConfig::default()
}

#[uniffi::export]
pub fn evaluate_record(record: ParameterLogRecord, mode: Mode) -> Vec<Alert> {
    evaluator::evaluate(&record, &mode)
}

#[uniffi::export]
pub fn format_alert(alert: Alert) -> String {
    alert.to_string()
}

#[uniffi::export]
pub fn suggest_maintenance(
    tank: Tank,
    as_of: String,
    config: AdvisorConfig,
) -> Result<Advisory, AdvisoryError> {
    let as_of = advisor::parse_date(&as_of)?;
    Ok(advisor::suggest(&tank, as_of, &config))
}

#[uniffi::export]
pub fn check_equipment_compatibility(
    tank: Tank,
    specs: HashMap<String, EquipmentSpec>,
    config: AdvisorConfig,
) -> Vec<String> {
    compatibility::check_compatibility(&tank, &specs, &config)
}

#[uniffi::export]
pub fn render_report(tank: Tank, suggestions: Vec<String>) -> String {
    TankReport::build(&tank, &suggestions).render()
}
