//! Parameter-range profiles.
//!
//! Built-in modes are fixed; custom modes are edited by the keeper and are
//! layered over the built-ins. A custom mode that shares a built-in's name
//! hides the built-in completely for lookups.

use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::models::{params, Mode, ParameterBound};

pub const SPS: &str = "SPS";
pub const LPS: &str = "LPS";
pub const MIXED_REEF: &str = "Mixed Reef";
pub const FISH_ONLY: &str = "Fish Only";

/// The fixed set of built-in modes, in display order.
pub fn builtin_modes() -> Vec<Mode> {
    vec![
        Mode {
            name: SPS.to_string(),
            bounds: vec![
                ParameterBound::new(params::TEMPERATURE, 76.0, 79.0),
                ParameterBound::new(params::SALINITY, 1.024, 1.026),
                ParameterBound::new(params::PH, 8.0, 8.4),
                ParameterBound::new(params::ALKALINITY, 7.5, 8.5),
                ParameterBound::new(params::CALCIUM, 400.0, 450.0),
                ParameterBound::new(params::MAGNESIUM, 1300.0, 1400.0),
                ParameterBound::new(params::NITRATE, 1.0, 10.0),
                ParameterBound::new(params::PHOSPHATE, 0.02, 0.08),
                ParameterBound::new(params::AMMONIA, 0.0, 0.1),
            ],
        },
        Mode {
            name: LPS.to_string(),
            bounds: vec![
                ParameterBound::new(params::TEMPERATURE, 75.0, 80.0),
                ParameterBound::new(params::SALINITY, 1.024, 1.026),
                ParameterBound::new(params::PH, 7.9, 8.4),
                ParameterBound::new(params::ALKALINITY, 7.0, 12.0),
                ParameterBound::new(params::CALCIUM, 380.0, 450.0),
                ParameterBound::new(params::MAGNESIUM, 1250.0, 1400.0),
                ParameterBound::new(params::NITRATE, 2.0, 20.0),
                ParameterBound::new(params::PHOSPHATE, 0.03, 0.15),
                ParameterBound::new(params::AMMONIA, 0.0, 0.1),
            ],
        },
        Mode {
            name: MIXED_REEF.to_string(),
            bounds: vec![
                ParameterBound::new(params::TEMPERATURE, 76.0, 80.0),
                ParameterBound::new(params::SALINITY, 1.024, 1.026),
                ParameterBound::new(params::PH, 7.9, 8.4),
                ParameterBound::new(params::ALKALINITY, 7.5, 10.0),
                ParameterBound::new(params::CALCIUM, 380.0, 450.0),
                ParameterBound::new(params::MAGNESIUM, 1250.0, 1400.0),
                ParameterBound::new(params::NITRATE, 2.0, 15.0),
                ParameterBound::new(params::PHOSPHATE, 0.03, 0.1),
                ParameterBound::new(params::AMMONIA, 0.0, 0.1),
            ],
        },
        Mode {
            name: FISH_ONLY.to_string(),
            bounds: vec![
                ParameterBound::new(params::TEMPERATURE, 75.0, 82.0),
                ParameterBound::new(params::SALINITY, 1.020, 1.025),
                ParameterBound::new(params::PH, 7.8, 8.4),
                ParameterBound::new(params::ALKALINITY, 7.0, 12.0),
                ParameterBound::new(params::NITRATE, 0.0, 40.0),
                ParameterBound::new(params::AMMONIA, 0.0, 0.25),
            ],
        },
    ]
}

/// Layered lookup of built-in and custom modes.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeRegistry {
    builtin: Vec<Mode>,
    custom: BTreeMap<String, Mode>,
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self {
            builtin: builtin_modes(),
            custom: BTreeMap::new(),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&Mode, RegistryError> {
        self.custom
            .get(name)
            .or_else(|| self.builtin.iter().find(|m| m.name == name))
            .ok_or_else(|| RegistryError::ModeNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Built-in names first, then custom-only names in sorted order.
    pub fn mode_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builtin.iter().map(|m| m.name.clone()).collect();
        for name in self.custom.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn custom_modes(&self) -> &BTreeMap<String, Mode> {
        &self.custom
    }

    pub fn is_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Creates an empty custom mode unless one of that name already exists.
    pub fn define_mode(&mut self, mode_name: &str) {
        self.custom
            .entry(mode_name.to_string())
            .or_insert_with(|| Mode::new(mode_name));
    }

    /// Sets one parameter's bounds on a custom mode, creating the mode if needed.
    ///
    /// A new custom mode starts empty even when it shadows a built-in.
    pub fn define_parameter(
        &mut self,
        mode_name: &str,
        parameter: &str,
        low: f64,
        high: f64,
    ) -> Result<(), RegistryError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(RegistryError::InvalidBounds {
                parameter: parameter.to_string(),
                low,
                high,
            });
        }

        let mode = self
            .custom
            .entry(mode_name.to_string())
            .or_insert_with(|| Mode::new(mode_name));
        match mode.bounds.iter_mut().find(|b| b.parameter == parameter) {
            Some(bound) => {
                bound.low = low;
                bound.high = high;
            }
            None => mode.bounds.push(ParameterBound::new(parameter, low, high)),
        }
        log::debug!("defined {parameter} [{low}, {high}] on custom mode {mode_name}");
        Ok(())
    }

    /// Returns whether a bound was removed.
    pub fn remove_parameter(&mut self, mode_name: &str, parameter: &str) -> bool {
        let Some(mode) = self.custom.get_mut(mode_name) else {
            return false;
        };
        let before = mode.bounds.len();
        mode.bounds.retain(|b| b.parameter != parameter);
        before != mode.bounds.len()
    }

    /// Deletes a custom mode. Built-ins cannot be deleted; a shadowed built-in
    /// becomes visible again.
    pub fn delete_mode(&mut self, mode_name: &str) -> bool {
        self.custom.remove(mode_name).is_some()
    }
}
