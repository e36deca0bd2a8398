//! Thresholds used by the maintenance advisor and the compatibility checker.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct AdvisorConfig {
    /// ppm
    pub nitrate_max: f64,
    /// ppm
    pub phosphate_max: f64,
    /// ppm
    pub ammonia_max: f64,
    pub ph_min: f64,
    /// dKH
    pub sps_alkalinity_low: f64,
    pub sps_alkalinity_high: f64,
    pub lps_alkalinity_low: f64,
    pub lps_alkalinity_high: f64,
    pub skimmer_clean_interval_days: i64,
    /// Largest acceptable volume per heater watt.
    pub max_volume_per_watt: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            nitrate_max: 40.0,
            phosphate_max: 0.1,
            ammonia_max: 0.25,
            ph_min: 7.9,
            sps_alkalinity_low: 7.5,
            sps_alkalinity_high: 8.5,
            lps_alkalinity_low: 7.0,
            lps_alkalinity_high: 12.0,
            skimmer_clean_interval_days: 10,
            max_volume_per_watt: 3.0,
        }
    }
}

impl AdvisorConfig {
    /// Parse a TOML document; keys left out keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}
