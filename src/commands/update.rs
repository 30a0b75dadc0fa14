//! Update command: merge one saved report into the dataset
//!
//! Runs the read, merge, conditional write pipeline:
//! 1. Read and classify the report
//! 2. Extract its technology records
//! 3. Load the current dataset snapshot
//! 4. Reconcile snapshot and extraction
//! 5. Rewrite the dataset only if the merge changed it

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::merge::reconcile;
use crate::parser::{ReportFormat, ReportParser};
use crate::storage::DatasetStore;
use crate::utils::error::ParseError;

/// What an update run did to the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Dataset was rewritten
    Updated {
        dataset: PathBuf,
        format: ReportFormat,
        technologies: usize,
    },
    /// Dataset already held everything the report contains
    Unchanged {
        dataset: PathBuf,
        format: ReportFormat,
    },
}

impl UpdateOutcome {
    /// Message printed to stdout for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::Updated {
                dataset,
                technologies,
                ..
            } => format!(
                "Updated {} with {technologies} technologies.",
                dataset.display()
            ),
            Self::Unchanged { dataset, .. } => {
                format!("No changes. {} is up to date.", dataset.display())
            }
        }
    }
}

/// Merge the report at `report` into the dataset at `dataset`
///
/// # Errors
/// Returns `ParseError::UnrecognizedReport` (wrapped) when the report matches
/// neither view; the dataset is not touched in that case. I/O and dataset
/// failures are returned as-is.
pub fn update(report: &Path, dataset: &Path) -> Result<UpdateOutcome> {
    let html = std::fs::read_to_string(report).map_err(|source| ParseError::ReadFailed {
        path: report.to_path_buf(),
        source,
    })?;

    let extraction = ReportParser::new().parse(&html)?;
    tracing::info!(
        report = %report.display(),
        format = %extraction.format,
        records = extraction.records.len(),
        "Report extracted"
    );

    let store = DatasetStore::new(dataset);
    let current = store.load()?;
    if current.skipped_rows > 0 {
        tracing::warn!(
            dataset = %dataset.display(),
            skipped = current.skipped_rows,
            "Ignored malformed rows in existing dataset"
        );
    }

    let result = reconcile(&current.records, &extraction.records);

    if !result.changed {
        tracing::info!(dataset = %dataset.display(), "Dataset already up to date");
        return Ok(UpdateOutcome::Unchanged {
            dataset: dataset.to_path_buf(),
            format: extraction.format,
        });
    }

    store.save(&result.records)?;
    tracing::info!(
        dataset = %dataset.display(),
        technologies = result.records.len(),
        added = result.added,
        backfilled = result.backfilled,
        "Dataset updated"
    );

    Ok(UpdateOutcome::Updated {
        dataset: dataset.to_path_buf(),
        format: extraction.format,
        technologies: result.records.len(),
    })
}
