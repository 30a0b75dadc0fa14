//! Dataset persistence
//!
//! The merged technology records live in a single CSV file that is read
//! once per run and rewritten only when the merge changed something.

pub mod dataset;

pub use dataset::{DatasetStore, LoadedDataset};
