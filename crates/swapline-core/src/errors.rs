//! Error types for Swapline

use thiserror::Error;

/// Core errors that can occur in Swapline
#[derive(Debug, Error)]
pub enum Error {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Invalid transaction id: {id}")]
    InvalidTxId { id: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Asset parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset cannot be empty")]
    Empty,

    #[error("invalid asset format: {0}")]
    InvalidFormat(String),

    #[error("invalid chain: {0}")]
    InvalidChain(String),
}

/// Result type alias for Swapline operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Asset(_) => "invalid_asset",
            Self::InvalidTxId { .. } => "invalid_tx_id",
            Self::InvalidVersion(_) => "invalid_version",
            Self::UnsupportedVersion { .. } => "unsupported_version",
            Self::Config(_) => "config_error",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<semver::Error> for Error {
    fn from(e: semver::Error) -> Self {
        Self::InvalidVersion(e.to_string())
    }
}
