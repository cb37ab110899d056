//! Error types for the reel machine

use thiserror::Error;

/// Machine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// Invalid machine configuration. Fatal to construction.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed caller input. Machine state is left untouched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: u64, available: u64 },
}

impl MachineError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Check if this error came from configuration validation
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias
pub type MachineResult<T> = Result<T, MachineError>;
