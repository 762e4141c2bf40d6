//! Error types for the launchpad service

use gaspad_types::GasPadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchpadError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    
    #[error("IO error: {0}")]
    Io(String),
    
    #[error("Network error: {0}")]
    NetworkError(String),
    
    #[error("Serialization error: {0}")]
    SerializationError(String),
    
    #[error(transparent)]
    Domain(#[from] GasPadError),
}

pub type LaunchpadResult<T> = Result<T, LaunchpadError>;

impl From<std::io::Error> for LaunchpadError {
    fn from(err: std::io::Error) -> Self {
        LaunchpadError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LaunchpadError {
    fn from(err: serde_json::Error) -> Self {
        LaunchpadError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for LaunchpadError {
    fn from(err: toml::de::Error) -> Self {
        LaunchpadError::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for LaunchpadError {
    fn from(err: toml::ser::Error) -> Self {
        LaunchpadError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LaunchpadError {
    fn from(err: reqwest::Error) -> Self {
        LaunchpadError::NetworkError(err.to_string())
    }
}
