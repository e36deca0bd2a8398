pub mod advisor;
pub mod book;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod ffi;
pub mod models;
pub mod modes;
pub mod report;
pub mod storage;

uniffi::setup_scaffolding!();

pub use advisor::{suggest, suggest_today, Advisory, AdvisoryRule, RuleFailure};
pub use book::TankBook;
pub use compatibility::{check_compatibility, SpecLookup};
pub use config::AdvisorConfig;
pub use error::{AdvisoryError, BookError, ConfigError, RegistryError, StorageError};
pub use evaluator::{evaluate, evaluate_latest, Alert};
pub use models::{
    DiaryEntry, EquipmentSelection, EquipmentSpec, MaintenanceRecord, Mode, ParameterBound,
    ParameterLogRecord, RawValue, Reading, Tank,
};
pub use modes::ModeRegistry;
pub use report::TankReport;
pub use storage::{JsonFileStorage, MemoryStorage, Storage, TankDocument};
