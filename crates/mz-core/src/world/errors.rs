//! Error types for generation and configuration
//!
//! Only configuration problems are hard failures. Thin layouts, grids with
//! nothing to connect, and unsatisfiable spawn separation are reported as
//! values (and logged) rather than errors.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use thiserror::Error;

/// Errors that abort a generation call before anything is allocated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Options(#[from] OptionsError),
}

impl GenerationError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        GenerationError::Configuration(message.into())
    }
}

/// Problems reading or parsing generator options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
