//! Unified error handling for the techstack crate
//!
//! Domain-specific errors ([`ParseError`], [`StoreError`]) are wrapped by a
//! single [`Error`] enum so the update pipeline can use `?` across module
//! boundaries, while [`ErrorCategory`] lets the binary decide how to report
//! a failure.

use thiserror::Error;

pub use crate::utils::error::{ParseError, StoreError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Report was not recognized or could not be read
    Parsing,
    /// Dataset read and write errors
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the techstack crate
#[derive(Error, Debug)]
pub enum Error {
    /// Report parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Dataset store errors
    #[error("Dataset error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::Store(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// True when the report matched neither known layout
    pub fn is_unrecognized_report(&self) -> bool {
        matches!(self, Self::Parse(ParseError::UnrecognizedReport))
    }
}

// Config loading reports through anyhow; keep the whole context chain
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(format!("{err:#}"))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
