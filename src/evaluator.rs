use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::models::{format_number, Mode, ParameterLogRecord, Tank};
use crate::modes::ModeRegistry;

/// A measurement outside the active mode's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Alert {
    pub parameter: String,
    pub observed_value: f64,
    pub low: f64,
    pub high: f64,
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (Expected: {}-{})",
            self.parameter,
            format_number(self.observed_value),
            format_number(self.low),
            format_number(self.high)
        )
    }
}

/// Compare a record against a mode's bounds.
///
/// Only parameters bounded by the mode are checked. Missing or non-numeric
/// values are skipped. Alerts follow the order of the mode's bounds.
pub fn evaluate(record: &ParameterLogRecord, mode: &Mode) -> Vec<Alert> {
    mode.bounds
        .iter()
        .filter_map(|bound| {
            let value = record.numeric(&bound.parameter)?;
            bound.excludes(value).then(|| Alert {
                parameter: bound.parameter.clone(),
                observed_value: value,
                low: bound.low,
                high: bound.high,
            })
        })
        .collect()
}

/// Evaluate the tank's most recent record against its selected mode.
pub fn evaluate_latest(tank: &Tank, registry: &ModeRegistry) -> Result<Vec<Alert>, RegistryError> {
    let mode = registry.resolve(&tank.mode)?;
    Ok(tank
        .latest_record()
        .map(|record| evaluate(record, mode))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{params, ParameterBound, RawValue};
    use crate::modes::SPS;

    fn reef_mode() -> Mode {
        Mode {
            name: "Test".to_string(),
            bounds: vec![
                ParameterBound::new(params::PH, 7.9, 8.4),
                ParameterBound::new(params::ALKALINITY, 7.5, 8.5),
                ParameterBound::new(params::NITRATE, 1.0, 10.0),
            ],
        }
    }

    #[test]
    fn test_evaluate_in_range() {
        let record = ParameterLogRecord::new("2024-01-01")
            .with_number(params::PH, 8.1)
            .with_number(params::ALKALINITY, 8.5)
            .with_number(params::NITRATE, 1.0);
        assert!(evaluate(&record, &reef_mode()).is_empty());
    }

    #[test]
    fn test_evaluate_out_of_range() {
        let record = ParameterLogRecord::new("2024-01-01")
            .with_number(params::PH, 7.6)
            .with_number(params::ALKALINITY, 9.0);
        let alerts = evaluate(&record, &reef_mode());

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].parameter, params::PH);
        assert_eq!(alerts[1].to_string(), "Alkalinity (dKH): 9.0 (Expected: 7.5-8.5)");
    }

    #[test]
    fn test_evaluate_follows_mode_order() {
        let record = ParameterLogRecord::new("2024-01-01")
            .with_number(params::NITRATE, 25.0)
            .with_number(params::PH, 9.0);
        let alerts = evaluate(&record, &reef_mode());
        let order: Vec<_> = alerts.iter().map(|a| a.parameter.as_str()).collect();
        assert_eq!(order, vec![params::PH, params::NITRATE]);
    }

    #[test]
    fn test_evaluate_skips_absent_values() {
        let record = ParameterLogRecord::new("2024-01-01")
            .with(params::PH, RawValue::NotMeasured)
            .with(
                params::ALKALINITY,
                RawValue::Text {
                    value: "N/A".to_string(),
                },
            )
            .with(
                params::NITRATE,
                RawValue::Text {
                    value: "lots".to_string(),
                },
            )
            .with_number(params::CALCIUM, 100.0);
        assert!(evaluate(&record, &reef_mode()).is_empty());
    }

    #[test]
    fn test_evaluate_text_values() {
        let record = ParameterLogRecord::new("2024-01-01").with(
            params::NITRATE,
            RawValue::Text {
                value: "40".to_string(),
            },
        );
        let alerts = evaluate(&record, &reef_mode());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].observed_value, 40.0);
    }

    #[test]
    fn test_evaluate_latest() {
        let registry = ModeRegistry::new();
        let mut tank = Tank::new("Display", SPS);
        assert!(evaluate_latest(&tank, &registry).unwrap().is_empty());

        tank.log
            .push(ParameterLogRecord::new("2024-01-01").with_number(params::ALKALINITY, 6.0));
        tank.log
            .push(ParameterLogRecord::new("2024-01-02").with_number(params::ALKALINITY, 9.0));
        let alerts = evaluate_latest(&tank, &registry).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].observed_value, 9.0);

        tank.mode = "Missing".to_string();
        assert!(evaluate_latest(&tank, &registry).is_err());
    }
}
