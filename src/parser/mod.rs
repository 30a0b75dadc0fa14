//! HTML parsing and record extraction
//!
//! This module classifies saved technology reports and extracts flat
//! [`TechRecord`](crate::models::TechRecord)s from them.

pub mod html;
pub mod sanitize;
pub mod selectors;

// Re-export main parser and public types
pub use html::{detect_format, Extraction, ReportParser};
pub use selectors::ReportFormat;
