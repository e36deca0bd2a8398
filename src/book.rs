//! The keeper's tank collection and custom modes.
//!
//! Owned by the caller and passed explicitly into every operation. Records are
//! append-only; tanks are never removed.

use chrono::NaiveDate;

use crate::advisor::{self, Advisory};
use crate::compatibility::{self, SpecLookup};
use crate::config::AdvisorConfig;
use crate::error::{BookError, RegistryError};
use crate::evaluator::{self, Alert};
use crate::models::{DiaryEntry, MaintenanceRecord, ParameterLogRecord, Tank};
use crate::modes::ModeRegistry;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TankBook {
    tanks: Vec<Tank>,
    registry: ModeRegistry,
}

impl TankBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn tank_names(&self) -> Vec<&str> {
        self.tanks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn tank(&self, name: &str) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.name == name)
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModeRegistry {
        &mut self.registry
    }

    fn tank_mut(&mut self, name: &str) -> Result<&mut Tank, BookError> {
        self.tanks
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| BookError::TankNotFound(name.to_string()))
    }

    pub fn add_tank(&mut self, tank: Tank) -> Result<(), BookError> {
        if self.tank(&tank.name).is_some() {
            return Err(BookError::DuplicateTank(tank.name));
        }
        self.registry.resolve(&tank.mode)?;
        log::info!("added tank {} ({})", tank.name, tank.mode);
        self.tanks.push(tank);
        Ok(())
    }

    pub fn set_mode(&mut self, tank: &str, mode: &str) -> Result<(), BookError> {
        self.registry.resolve(mode)?;
        self.tank_mut(tank)?.mode = mode.to_string();
        Ok(())
    }

    pub fn set_volumes(
        &mut self,
        tank: &str,
        display_volume: Option<f64>,
        sump_volume: Option<f64>,
    ) -> Result<(), BookError> {
        let tank = self.tank_mut(tank)?;
        tank.display_volume = display_volume;
        tank.sump_volume = sump_volume;
        Ok(())
    }

    pub fn set_equipment(&mut self, tank: &str, category: &str, model: &str) -> Result<(), BookError> {
        self.tank_mut(tank)?.set_equipment(category, model);
        Ok(())
    }

    pub fn append_log(&mut self, tank: &str, record: ParameterLogRecord) -> Result<(), BookError> {
        self.tank_mut(tank)?.log.push(record);
        Ok(())
    }

    pub fn append_maintenance(
        &mut self,
        tank: &str,
        record: MaintenanceRecord,
    ) -> Result<(), BookError> {
        self.tank_mut(tank)?.maintenance.push(record);
        Ok(())
    }

    pub fn append_diary(&mut self, tank: &str, entry: DiaryEntry) -> Result<(), BookError> {
        self.tank_mut(tank)?.diary.push(entry);
        Ok(())
    }

    pub fn alerts(&self, tank: &str) -> Result<Vec<Alert>, BookError> {
        let tank = self
            .tank(tank)
            .ok_or_else(|| BookError::TankNotFound(tank.to_string()))?;
        evaluator::evaluate_latest(tank, &self.registry).map_err(BookError::from)
    }

    pub fn suggestions(
        &self,
        tank: &str,
        as_of: NaiveDate,
        config: &AdvisorConfig,
    ) -> Result<Advisory, BookError> {
        let tank = self
            .tank(tank)
            .ok_or_else(|| BookError::TankNotFound(tank.to_string()))?;
        Ok(advisor::suggest(tank, as_of, config))
    }

    pub fn compatibility<L: SpecLookup>(
        &self,
        tank: &str,
        lookup: &L,
        config: &AdvisorConfig,
    ) -> Result<Vec<String>, BookError> {
        let tank = self
            .tank(tank)
            .ok_or_else(|| BookError::TankNotFound(tank.to_string()))?;
        Ok(compatibility::check_compatibility(tank, lookup, config))
    }

    /// Delete a custom mode unless a tank still selects it and no built-in
    /// of the same name would take its place.
    pub fn delete_mode(&mut self, mode: &str) -> Result<bool, BookError> {
        let mut trial = self.registry.clone();
        if !trial.delete_mode(mode) {
            return Ok(false);
        }
        if self.tanks.iter().any(|t| t.mode == mode) && !trial.contains(mode) {
            return Err(RegistryError::ModeNotFound(mode.to_string()).into());
        }
        self.registry = trial;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params;
    use crate::modes::{LPS, SPS};

    fn book_with_display() -> TankBook {
        let mut book = TankBook::new();
        book.add_tank(Tank::new("Display", SPS)).unwrap();
        book
    }

    #[test]
    fn test_add_tank_rejects_duplicates_and_unknown_modes() {
        let mut book = book_with_display();
        assert_eq!(
            book.add_tank(Tank::new("Display", LPS)),
            Err(BookError::DuplicateTank("Display".to_string()))
        );
        assert!(matches!(
            book.add_tank(Tank::new("Frag", "Nano")),
            Err(BookError::Registry(RegistryError::ModeNotFound(_)))
        ));
        assert_eq!(book.tank_names(), vec!["Display"]);
    }

    #[test]
    fn test_append_records_in_order() {
        let mut book = book_with_display();
        book.append_log(
            "Display",
            ParameterLogRecord::new("2024-01-01").with_number(params::ALKALINITY, 8.0),
        )
        .unwrap();
        book.append_log(
            "Display",
            ParameterLogRecord::new("2024-01-02").with_number(params::ALKALINITY, 9.0),
        )
        .unwrap();

        let tank = book.tank("Display").unwrap();
        assert_eq!(tank.log.len(), 2);
        assert_eq!(tank.latest_record().unwrap().timestamp, "2024-01-02");
        assert_eq!(book.alerts("Display").unwrap().len(), 1);

        assert!(matches!(
            book.append_log("Frag", ParameterLogRecord::new("2024-01-01")),
            Err(BookError::TankNotFound(_))
        ));
    }

    #[test]
    fn test_set_mode_requires_known_mode() {
        let mut book = book_with_display();
        assert!(book.set_mode("Display", "Nano").is_err());

        book.registry_mut()
            .define_parameter("Nano", params::PH, 7.8, 8.4)
            .unwrap();
        book.set_mode("Display", "Nano").unwrap();
        assert_eq!(book.tank("Display").unwrap().mode, "Nano");
    }

    #[test]
    fn test_delete_mode_in_use() {
        let mut book = book_with_display();
        book.registry_mut()
            .define_parameter("Nano", params::PH, 7.8, 8.4)
            .unwrap();
        book.registry_mut()
            .define_parameter(SPS, params::PH, 7.8, 8.4)
            .unwrap();
        book.set_mode("Display", "Nano").unwrap();

        assert!(book.delete_mode("Nano").is_err());
        assert!(book.registry().contains("Nano"));

        book.set_mode("Display", SPS).unwrap();
        assert_eq!(book.delete_mode(SPS), Ok(true));
        assert_eq!(book.delete_mode("Nano"), Ok(true));
        assert_eq!(book.delete_mode("Nano"), Ok(false));
    }
}
