//! Common test utilities

#![allow(dead_code)]

use std::fs;
use techstack::models::TechRecord;

/// HTML fixture directory
pub const FIXTURES_DIR: &str = "tests/fixtures/html";

/// Load an HTML fixture by file name
pub fn load_fixture(filename: &str) -> String {
    let path = fixture_path(filename);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Relative path of an HTML fixture
pub fn fixture_path(filename: &str) -> String {
    format!("{FIXTURES_DIR}/{filename}")
}

/// Fully populated record, as the detailed view would produce it
pub fn detailed_record(category: &str, technology: &str) -> TechRecord {
    TechRecord::new(category, technology)
        .with_description(format!("{technology} description"))
        .with_tags("tag-a, tag-b")
        .with_detection("Jan 2020", "May 2024", "🏆")
}
