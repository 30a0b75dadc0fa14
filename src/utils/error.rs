//! Error types for the techstack extractor
//!
//! This module defines the domain errors raised by report parsing and by
//! the dataset store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing a report
#[derive(Error, Debug)]
pub enum ParseError {
    /// HTML matches neither the free nor the detailed report layout
    #[error("Not a recognized report")]
    UnrecognizedReport,

    /// Report file could not be read
    #[error("Failed to read report {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading or writing the dataset file
#[derive(Error, Debug)]
pub enum StoreError {
    /// Dataset file exists but could not be opened
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Reading rows from the dataset failed at the I/O level
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Dataset directory or temporary file could not be created
    #[error("Failed to prepare dataset {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing rows to the dataset failed
    #[error("Failed to write dataset {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Replacing the dataset with the freshly written file failed
    #[error("Failed to replace dataset {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
