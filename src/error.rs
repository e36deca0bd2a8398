use thiserror::Error;

/// Error type for mode lookup and custom mode editing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("mode not found: {0}")]
    ModeNotFound(String),

    #[error("invalid bounds for {parameter}: low {low} must not exceed high {high}")]
    InvalidBounds {
        parameter: String,
        low: f64,
        high: f64,
    },
}

/// Error raised by a single advisory rule. Other rules keep running.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum AdvisoryError {
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}

/// Error type for tank collection edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    #[error("tank already exists: {0}")]
    DuplicateTank(String),

    #[error("tank not found: {0}")]
    TankNotFound(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tank data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent tank data: {0}")]
    Invalid(#[from] BookError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid advisor config: {0}")]
    Toml(#[from] toml::de::Error),
}
