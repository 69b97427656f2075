use thiserror::Error;

/// Errors surfaced by the copy pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode settings: {0}")]
    SettingsEncode(#[from] toml::ser::Error),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting {key}")]
    InvalidSetting { key: String, value: String },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, CopyError>;
