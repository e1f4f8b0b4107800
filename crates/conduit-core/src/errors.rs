//! Unified error type for Conduit
//!
//! The slot protocol and the activation machine never fail; they report
//! "nothing happened" through empty or zero results. Errors only surface at
//! the edges that run once at startup: configuration and allow-list setup.

use serde::{Deserialize, Serialize};

/// Error type for fallible Conduit setup operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ConduitError {
    /// A configuration value is outside its accepted range
    #[error("Invalid config: {field}: {message}")]
    InvalidConfig {
        /// Offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Configuration text could not be parsed
    #[error("Parse error: {message}")]
    Parse {
        /// Parser message
        message: String,
    },

    /// A process-wide value was installed twice
    #[error("Already initialized: {what}")]
    AlreadyInitialized {
        /// Name of the value
        what: String,
    },
}

impl ConduitError {
    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an already-initialized error
    pub fn already_initialized(what: impl Into<String>) -> Self {
        Self::AlreadyInitialized { what: what.into() }
    }
}

impl From<toml::de::Error> for ConduitError {
    fn from(err: toml::de::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Standard Result type for Conduit operations
pub type Result<T> = std::result::Result<T, ConduitError>;
