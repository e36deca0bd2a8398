use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::book::TankBook;
use crate::error::{BookError, StorageError};
use crate::models::{Mode, Tank};

/// Default file name for the saved collection.
pub const SAVE_FILE: &str = "reef_data.json";

/// On-disk layout of a saved collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TankDocument {
    #[serde(default)]
    pub tanks: Vec<Tank>,
    #[serde(default)]
    pub custom_modes: BTreeMap<String, Mode>,
}

impl From<&TankBook> for TankDocument {
    fn from(book: &TankBook) -> Self {
        Self {
            tanks: book.tanks().to_vec(),
            custom_modes: book.registry().custom_modes().clone(),
        }
    }
}

/// Rebuilds a collection through the same checks as interactive edits.
///
/// Custom modes are named by their map key. Bounds must be ordered, tank names
/// unique, and every tank's mode must resolve.
impl TryFrom<TankDocument> for TankBook {
    type Error = BookError;

    fn try_from(doc: TankDocument) -> Result<Self, Self::Error> {
        let mut book = TankBook::new();
        let registry = book.registry_mut();
        for (name, mode) in &doc.custom_modes {
            registry.define_mode(name);
            for bound in &mode.bounds {
                registry.define_parameter(name, &bound.parameter, bound.low, bound.high)?;
            }
        }
        for tank in doc.tanks {
            book.add_tank(tank)?;
        }
        Ok(book)
    }
}

pub trait Storage {
    fn load(&self) -> Result<TankBook, StorageError>;
    fn save(&mut self, book: &TankBook) -> Result<(), StorageError>;
}

/// Stores the collection as a single JSON document.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    /// A missing file loads as an empty collection.
    fn load(&self) -> Result<TankBook, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, starting empty", self.path.display());
                return Ok(TankBook::new());
            }
            Err(e) => return Err(e.into()),
        };
        let doc: TankDocument = serde_json::from_str(&text)?;
        Ok(TankBook::try_from(doc)?)
    }

    fn save(&mut self, book: &TankBook) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&TankDocument::from(book))?;
        fs::write(&self.path, json)?;
        log::debug!("saved {} tanks to {}", book.tanks().len(), self.path.display());
        Ok(())
    }
}

/// Keeps the serialized document in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    pub document: Option<String>,
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<TankBook, StorageError> {
        match &self.document {
            Some(json) => {
                let doc: TankDocument = serde_json::from_str(json)?;
                Ok(TankBook::try_from(doc)?)
            }
            None => Ok(TankBook::new()),
        }
    }

    fn save(&mut self, book: &TankBook) -> Result<(), StorageError> {
        self.document = Some(serde_json::to_string(&TankDocument::from(book))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::models::{categories, params, MaintenanceRecord, ParameterLogRecord, RawValue};
    use crate::modes::SPS;

    fn sample_book() -> TankBook {
        let mut book = TankBook::new();
        book.registry_mut()
            .define_parameter("Nano", params::PH, 7.8, 8.4)
            .unwrap();
        book.add_tank(Tank::new("Display", SPS)).unwrap();
        book.set_equipment("Display", categories::SKIMMER, "Nyos Quantum 120")
            .unwrap();
        book.append_log(
            "Display",
            ParameterLogRecord::new("2024-01-01 08:00")
                .with_number(params::PH, 8.1)
                .with(params::NITRATE, RawValue::NotMeasured),
        )
        .unwrap();
        book.append_maintenance(
            "Display",
            MaintenanceRecord {
                date: "2024-01-01".to_string(),
                task: "Cleaned skimmer".to_string(),
                notes: String::new(),
            },
        )
        .unwrap();
        book
    }

    #[test]
    fn test_json_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join(SAVE_FILE));
        let book = storage.load().unwrap();
        assert!(book.tanks().is_empty());
    }

    #[test]
    fn test_json_file_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join(SAVE_FILE));
        let book = sample_book();

        storage.save(&book).unwrap();
        assert_eq!(storage.load().unwrap(), book);
    }

    #[test]
    fn test_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SAVE_FILE);
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStorage::new(&path).load();
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_document_layout() {
        let mut storage = MemoryStorage::default();
        storage.save(&sample_book()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(storage.document.as_deref().unwrap()).unwrap();
        assert_eq!(value["tanks"][0]["name"], "Display");
        assert_eq!(value["custom_modes"]["Nano"]["bounds"][0]["parameter"], "pH");
        assert!(value["tanks"][0]["log"][0]["readings"][1]["value"].is_null());

        let loaded = storage.load().unwrap();
        assert!(loaded.registry().is_custom("Nano"));
    }

    fn load_json(json: &str) -> Result<TankBook, StorageError> {
        MemoryStorage {
            document: Some(json.to_string()),
        }
        .load()
    }

    #[test]
    fn test_load_names_custom_modes_by_key() {
        let book = load_json(
            r#"{"tanks":[{"name":"Display","mode":"Nano"}],
                "custom_modes":{"Nano":{"name":"Other","bounds":[
                    {"parameter":"pH","low":7.8,"high":8.4}]},
                "Empty":{"name":"Empty"}}}"#,
        )
        .unwrap();

        let nano = book.registry().resolve("Nano").unwrap();
        assert_eq!(nano.name, "Nano");
        assert_eq!(nano.bounds.len(), 1);
        assert!(!book.registry().contains("Other"));
        assert!(book.registry().resolve("Empty").unwrap().bounds.is_empty());
    }

    #[test]
    fn test_load_rejects_inverted_bounds() {
        let result = load_json(
            r#"{"custom_modes":{"Nano":{"name":"Nano","bounds":[
                {"parameter":"pH","low":9.0,"high":7.0}]}}}"#,
        );
        assert!(matches!(
            result,
            Err(StorageError::Invalid(BookError::Registry(
                RegistryError::InvalidBounds { .. }
            )))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_tank_mode() {
        let result = load_json(r#"{"tanks":[{"name":"Display","mode":"Gone"}]}"#);
        assert!(matches!(
            result,
            Err(StorageError::Invalid(BookError::Registry(
                RegistryError::ModeNotFound(ref name)
            ))) if name == "Gone"
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_tanks() {
        let result = load_json(
            r#"{"tanks":[{"name":"Display","mode":"SPS"},{"name":"Display","mode":"LPS"}]}"#,
        );
        assert!(matches!(
            result,
            Err(StorageError::Invalid(BookError::DuplicateTank(ref name))) if name == "Display"
        ));
    }
}
