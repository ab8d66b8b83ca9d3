use thiserror::Error;

/// Errors produced by the setting store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// A derive was attempted before the shared entry was installed
    /// (or after it was reset).
    #[error("shared setting '{key}' is not initialized")]
    NotInitialized { key: String },

    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SettingError>;
