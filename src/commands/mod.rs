pub mod update;

// Re-export command functions for convenience
pub use update::{update, UpdateOutcome};
