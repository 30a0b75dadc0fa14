//! techstack - technology report extractor and dataset merger
//!
//! Reads saved HTML reports of a web-technology detection service, extracts
//! one record per detected technology and merges them into a CSV dataset
//! that only ever grows richer across runs.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`parser`] - Report classification and record extraction
//! - [`models`] - The technology record and its identity key
//! - [`merge`] - Field-level reconciliation of record collections
//! - [`storage`] - CSV dataset persistence
//! - [`commands`] - The read, merge, conditional write pipeline
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use techstack::commands::update;
//!
//! fn main() -> techstack::error::Result<()> {
//!     let outcome = update(Path::new("report.html"), Path::new("technologies.csv"))?;
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod merge;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commands::{update, UpdateOutcome};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::merge::{has_changed, merge, merge_all, reconcile, Reconciliation};
    pub use crate::models::{RecordKey, TechRecord};
    pub use crate::parser::{ReportFormat, ReportParser};
    pub use crate::storage::DatasetStore;
}

// Direct re-exports for convenience
pub use models::{RecordKey, TechRecord};
