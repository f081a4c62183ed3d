//! Error types for Estante Core

use thiserror::Error;

/// Result type alias using EstanteError
pub type Result<T> = std::result::Result<T, EstanteError>;

/// Top-level error type for all Estante operations
#[derive(Debug, Error)]
pub enum EstanteError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid page input: {0}")]
    PageInput(#[from] PageInputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the content collection from the data provider.
///
/// Cloneable because one failed read is shared by every caller that was
/// waiting on the same in-flight query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode provider response: {0}")]
    Decode(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Errors from asking the host environment to do something on our behalf
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Could not open {url}: {reason}")]
    OpenFailed { url: String, reason: String },

    #[error("Could not save {filename}: {reason}")]
    DownloadFailed { filename: String, reason: String },

    #[error("Fullscreen request rejected: {0}")]
    Fullscreen(String),
}

/// Rejected manual page-number entry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageInputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("page must be at least 1, got {0}")]
    NotPositive(i64),

    #[error("page {0} is out of range")]
    OutOfRange(i64),
}

/// Errors from reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
