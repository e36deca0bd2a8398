//! Maintenance suggestions derived from the latest readings, the selected
//! equipment and the maintenance history.
//!
//! Every rule runs on every call, in the order of [`AdvisoryRule::ALL`]. A rule
//! that cannot be evaluated (a malformed maintenance date) is reported in
//! [`Advisory::failures`] while the remaining rules still produce output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;
use crate::error::AdvisoryError;
use crate::models::{categories, format_number, params, ParameterLogRecord, Tank};
use crate::modes::{LPS, SPS};

/// Date format used by maintenance records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum AdvisoryRule {
    Nitrate,
    Phosphate,
    Ammonia,
    Ph,
    Alkalinity,
    SkimmerCleaning,
    HeaterCalibration,
    SpsStability,
}

impl AdvisoryRule {
    /// Evaluation order.
    pub const ALL: [AdvisoryRule; 8] = [
        AdvisoryRule::Nitrate,
        AdvisoryRule::Phosphate,
        AdvisoryRule::Ammonia,
        AdvisoryRule::Ph,
        AdvisoryRule::Alkalinity,
        AdvisoryRule::SkimmerCleaning,
        AdvisoryRule::HeaterCalibration,
        AdvisoryRule::SpsStability,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AdvisoryRule::Nitrate => "nitrate",
            AdvisoryRule::Phosphate => "phosphate",
            AdvisoryRule::Ammonia => "ammonia",
            AdvisoryRule::Ph => "ph",
            AdvisoryRule::Alkalinity => "alkalinity",
            AdvisoryRule::SkimmerCleaning => "skimmer_cleaning",
            AdvisoryRule::HeaterCalibration => "heater_calibration",
            AdvisoryRule::SpsStability => "sps_stability",
        }
    }

    fn apply(self, ctx: &AdvisoryContext<'_>) -> Result<Option<String>, AdvisoryError> {
        let config = ctx.config;
        let suggestion = match self {
            AdvisoryRule::Nitrate => ctx
                .reading(params::NITRATE)
                .filter(|v| *v > config.nitrate_max)
                .map(|_| {
                    "Nitrate is high – perform a water change and clean filter media.".to_string()
                }),
            AdvisoryRule::Phosphate => ctx
                .reading(params::PHOSPHATE)
                .filter(|v| *v > config.phosphate_max)
                .map(|_| "Phosphate is elevated – replace GFO or reduce feeding.".to_string()),
            AdvisoryRule::Ammonia => ctx
                .reading(params::AMMONIA)
                .filter(|v| *v > config.ammonia_max)
                .map(|_| "Ammonia detected – perform an urgent water change!".to_string()),
            AdvisoryRule::Ph => ctx
                .reading(params::PH)
                .filter(|v| *v < config.ph_min)
                .map(|_| "pH is low – check aeration and CO₂ levels.".to_string()),
            AdvisoryRule::Alkalinity => alkalinity(ctx),
            AdvisoryRule::SkimmerCleaning => skimmer_cleaning(ctx)?,
            AdvisoryRule::HeaterCalibration => ctx.tank.has_equipment(categories::HEATER).then(|| {
                "Heater installed – verify calibration with a separate thermometer.".to_string()
            }),
            AdvisoryRule::SpsStability => (ctx.tank.mode == SPS).then(|| {
                "SPS mode – test alkalinity often and keep parameters stable.".to_string()
            }),
        };
        Ok(suggestion)
    }
}

/// A rule that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct RuleFailure {
    pub rule: AdvisoryRule,
    pub message: String,
}

/// Output of one advisory pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Advisory {
    pub suggestions: Vec<String>,
    pub failures: Vec<RuleFailure>,
}

struct AdvisoryContext<'a> {
    tank: &'a Tank,
    latest: Option<&'a ParameterLogRecord>,
    as_of: NaiveDate,
    config: &'a AdvisorConfig,
}

impl AdvisoryContext<'_> {
    fn reading(&self, parameter: &str) -> Option<f64> {
        self.latest.and_then(|r| r.numeric(parameter))
    }
}

/// Run every advisory rule against the tank as of the given date.
pub fn suggest(tank: &Tank, as_of: NaiveDate, config: &AdvisorConfig) -> Advisory {
    let ctx = AdvisoryContext {
        tank,
        latest: tank.latest_record(),
        as_of,
        config,
    };

    let mut advisory = Advisory::default();
    for rule in AdvisoryRule::ALL {
        match rule.apply(&ctx) {
            Ok(Some(suggestion)) => advisory.suggestions.push(suggestion),
            Ok(None) => {}
            Err(e) => {
                log::warn!("rule {} failed for tank {}: {}", rule.id(), tank.name, e);
                advisory.failures.push(RuleFailure {
                    rule,
                    message: e.to_string(),
                });
            }
        }
    }
    advisory
}

/// [`suggest`] evaluated against the local calendar date.
pub fn suggest_today(tank: &Tank, config: &AdvisorConfig) -> Advisory {
    suggest(tank, chrono::Local::now().date_naive(), config)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AdvisoryError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| AdvisoryError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn alkalinity(ctx: &AdvisoryContext<'_>) -> Option<String> {
    let config = ctx.config;
    let (low, high) = match ctx.tank.mode.as_str() {
        SPS => (config.sps_alkalinity_low, config.sps_alkalinity_high),
        LPS => (config.lps_alkalinity_low, config.lps_alkalinity_high),
        _ => return None,
    };
    let alk = ctx.reading(params::ALKALINITY)?;
    if alk >= low && alk <= high {
        return None;
    }
    Some(format!(
        "Alkalinity is outside the {} range – keep it between {} and {} dKH.",
        ctx.tank.mode,
        format_number(low),
        format_number(high)
    ))
}

fn skimmer_cleaning(ctx: &AdvisoryContext<'_>) -> Result<Option<String>, AdvisoryError> {
    if !ctx.tank.has_equipment(categories::SKIMMER) {
        return Ok(None);
    }

    let mut last_cleaned: Option<NaiveDate> = None;
    for record in ctx
        .tank
        .maintenance
        .iter()
        .filter(|r| r.task.to_lowercase().contains("skimmer"))
    {
        let date = parse_date(&record.date)?;
        last_cleaned = last_cleaned.max(Some(date));
    }

    let Some(date) = last_cleaned else {
        return Ok(Some(
            "Skimmer installed but never cleaned – log a clean soon.".to_string(),
        ));
    };
    let days = (ctx.as_of - date).num_days();
    if days > ctx.config.skimmer_clean_interval_days {
        Ok(Some(format!(
            "Skimmer last cleaned {days} days ago – clean recommended."
        )))
    } else {
        Ok(None)
    }
}
