use std::collections::HashMap;

use crate::config::AdvisorConfig;
use crate::models::{categories, format_number, EquipmentSpec, Tank};

/// Source of equipment reference data, keyed by model identifier.
pub trait SpecLookup {
    fn spec(&self, model: &str) -> Option<EquipmentSpec>;
}

impl SpecLookup for HashMap<String, EquipmentSpec> {
    fn spec(&self, model: &str) -> Option<EquipmentSpec> {
        self.get(model).cloned()
    }
}

impl<F> SpecLookup for F
where
    F: Fn(&str) -> Option<EquipmentSpec>,
{
    fn spec(&self, model: &str) -> Option<EquipmentSpec> {
        self(model)
    }
}

/// Cross-check the tank's selected equipment against reference specs.
///
/// Notes are informational only. A model missing from the lookup, or missing
/// the attribute a check needs, skips that check.
pub fn check_compatibility<L: SpecLookup>(
    tank: &Tank,
    lookup: &L,
    config: &AdvisorConfig,
) -> Vec<String> {
    let total_volume = tank.total_volume();
    let mut notes = Vec::new();

    let spec_for = |category: &str| {
        let model = tank.equipment_model(category)?;
        let spec = lookup.spec(model);
        if spec.is_none() {
            log::debug!("no spec for {category} model {model}, skipping check");
        }
        spec.map(|s| (model, s))
    };

    if let Some((model, spec)) = spec_for(categories::HEATER) {
        if let Some(wattage) = spec.wattage.filter(|w| *w > 0.0) {
            if total_volume / wattage > config.max_volume_per_watt {
                notes.push(format!(
                    "Heater {model} ({} W) may be underpowered for {} total volume.",
                    format_number(wattage),
                    format_number(total_volume)
                ));
            }
        }
    }

    if let Some((model, spec)) = spec_for(categories::SKIMMER) {
        if let Some(rated) = spec.rated_tank_volume {
            if rated < total_volume {
                notes.push(format!(
                    "Skimmer {model} is rated for {} but total volume is {}.",
                    format_number(rated),
                    format_number(total_volume)
                ));
            }
        }
    }

    if let (Some((pump, pump_spec)), Some((overflow, overflow_spec))) = (
        spec_for(categories::RETURN_PUMP),
        spec_for(categories::OVERFLOW_TYPE),
    ) {
        if let (Some(flow), Some(recommended)) =
            (pump_spec.flow_rate, overflow_spec.recommended_flow_rate)
        {
            if flow > recommended {
                notes.push(format!(
                    "Return pump {pump} flow ({}) exceeds {overflow} recommended flow ({}).",
                    format_number(flow),
                    format_number(recommended)
                ));
            }
        }
    }

    notes
}
