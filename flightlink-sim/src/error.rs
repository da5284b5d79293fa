//! Error types for the simulator

use thiserror::Error;

use flightlink_core::ConfigError;
use flightlink_protocol::EncodeError;

use crate::link::LinkError;

/// Result type alias using SimError
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for simulator runs
#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Controller configuration rejected: {0:?}")]
    Controller(ConfigError),

    #[error("Failed to encode command: {0:?}")]
    Encode(EncodeError),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Controller(e)
    }
}

impl From<EncodeError> for SimError {
    fn from(e: EncodeError) -> Self {
        SimError::Encode(e)
    }
}
