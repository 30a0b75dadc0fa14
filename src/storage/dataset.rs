//! CSV dataset store
//!
//! The dataset is a best-effort cache of every technology seen so far, one
//! row per record under a fixed header. Loading tolerates damaged rows;
//! saving replaces the whole file atomically.
//!
//! # Example
//!
//! ```no_run
//! use techstack::storage::DatasetStore;
//! use techstack::models::TechRecord;
//!
//! # fn example() -> Result<(), techstack::error::StoreError> {
//! let store = DatasetStore::new("technologies.csv");
//! let loaded = store.load()?;
//! println!("{} records, {} skipped", loaded.records.len(), loaded.skipped_rows);
//!
//! store.save(&[TechRecord::new("CMS", "WordPress")])?;
//! # Ok(())
//! # }
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::models::{TechRecord, DATASET_HEADER};
use crate::utils::error::StoreError;

/// Records read from the dataset file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDataset {
    /// Rows that decoded into complete records, in file order
    pub records: Vec<TechRecord>,

    /// Rows dropped for having the wrong field count or invalid text
    pub skipped_rows: usize,
}

/// Reads and writes the persisted record collection
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    /// Create a store backed by the CSV file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Dataset file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed record
    ///
    /// A missing file is an empty dataset. The header row is skipped when
    /// present; rows without exactly seven fields are skipped and counted.
    ///
    /// # Errors
    /// Returns `StoreError::Open` if an existing file cannot be opened and
    /// `StoreError::Read` on I/O failures while reading.
    pub fn load(&self) -> Result<LoadedDataset, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Dataset not found, starting empty");
            return Ok(LoadedDataset::default());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut loaded = LoadedDataset::default();

        for (index, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(source) if source.is_io_error() => {
                    return Err(StoreError::Read {
                        path: self.path.clone(),
                        source,
                    });
                }
                Err(e) => {
                    tracing::debug!(row = index + 1, error = %e, "Skipping unreadable dataset row");
                    loaded.skipped_rows += 1;
                    continue;
                }
            };

            if index == 0 && is_header(&row) {
                continue;
            }

            match TechRecord::from_fields(row.iter()) {
                Some(record) => loaded.records.push(record),
                None => {
                    tracing::debug!(
                        row = index + 1,
                        fields = row.len(),
                        "Skipping malformed dataset row"
                    );
                    loaded.skipped_rows += 1;
                }
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            records = loaded.records.len(),
            skipped = loaded.skipped_rows,
            "Dataset loaded"
        );

        Ok(loaded)
    }

    /// Replace the dataset with `records`, sorted by identity key
    ///
    /// Rows are written to a sibling temporary file that is then renamed
    /// over the dataset, so readers never observe a half-written file.
    ///
    /// # Errors
    /// Returns a `StoreError` if the directory, temporary file, rows or the
    /// final rename fail.
    pub fn save(&self, records: &[TechRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Prepare {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut sorted = records.to_vec();
        crate::merge::sort_records(&mut sorted);

        let temp_path = self.temp_path();
        if let Err(e) = self.write_rows(&temp_path, &sorted) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Replace {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %self.path.display(), records = sorted.len(), "Dataset saved");
        Ok(())
    }

    fn write_rows(&self, temp_path: &Path, records: &[TechRecord]) -> Result<(), StoreError> {
        let write_error = |source: csv::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_path(temp_path)
            .map_err(write_error)?;

        writer.write_record(DATASET_HEADER).map_err(write_error)?;
        for record in records {
            writer.serialize(record).map_err(write_error)?;
        }
        writer
            .flush()
            .map_err(|e| write_error(csv::Error::from(e)))?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn is_header(row: &csv::StringRecord) -> bool {
    row.len() == DATASET_HEADER.len()
        && row
            .iter()
            .zip(DATASET_HEADER)
            .enumerate()
            .all(|(i, (field, expected))| {
                let field = if i == 0 {
                    field.trim_start_matches('\u{feff}')
                } else {
                    field
                };
                field == expected
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<TechRecord> {
        vec![
            TechRecord::new("CMS", "WordPress")
                .with_description("A blog engine, with \"quotes\"")
                .with_tags("cms, php")
                .with_detection("2020-01-01", "2024-05-01", "🏆"),
            TechRecord::new("Analytics", "Google Analytics"),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = DatasetStore::new(temp_dir.path().join("none.csv"));
        let loaded = store.load().unwrap();
        assert!(loaded.records.is_empty());
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn test_save_writes_header_and_sorted_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.csv");
        let store = DatasetStore::new(&path);

        store.save(&sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.split("\r\n");
        assert_eq!(
            lines.next(),
            Some("Category,Technology,Description,Tags,First Detected,Last Detected,Emojis")
        );
        assert_eq!(lines.next(), Some("Analytics,Google Analytics,,,,,"));
        assert_eq!(
            lines.next(),
            Some(r#"CMS,WordPress,"A blog engine, with ""quotes""","cms, php",2020-01-01,2024-05-01,🏆"#)
        );
        assert!(!temp_dir.path().join("stack.csv.tmp").exists());
    }

    #[test]
    fn test_empty_save_still_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        DatasetStore::new(&path).save(&[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Category,Technology"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = DatasetStore::new(temp_dir.path().join("stack.csv"));
        let mut records = sample();
        store.save(&records).unwrap();

        crate::merge::sort_records(&mut records);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, records);
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/stack.csv");
        DatasetStore::new(&path).save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.csv");
        fs::write(
            &path,
            "Category,Technology,Description,Tags,First Detected,Last Detected,Emojis\n\
             CMS,WordPress,,,,,\n\
             CMS,Broken,only,four\n\
             CDN,Fastly,,,,,,extra\n\
             CDN,Cloudflare,,,,,\n",
        )
        .unwrap();

        let loaded = DatasetStore::new(&path).load().unwrap();
        assert_eq!(loaded.skipped_rows, 2);
        let names: Vec<_> = loaded.records.iter().map(|r| r.technology.as_str()).collect();
        assert_eq!(names, ["WordPress", "Cloudflare"]);
    }

    #[test]
    fn test_headerless_file_keeps_first_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.csv");
        fs::write(&path, "CMS,WordPress,,,,,\n").unwrap();

        let loaded = DatasetStore::new(&path).load().unwrap();
        assert_eq!(loaded.records, vec![TechRecord::new("CMS", "WordPress")]);
    }

    #[test]
    fn test_header_with_bom_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.csv");
        fs::write(
            &path,
            "\u{feff}Category,Technology,Description,Tags,First Detected,Last Detected,Emojis\r\n\
             CMS,WordPress,,,,,\r\n",
        )
        .unwrap();

        let loaded = DatasetStore::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.csv");
        let mut bytes = b"CMS,WordPress,,,,,\n".to_vec();
        bytes.extend_from_slice(b"CMS,Bad\xff\xfe,,,,,\n");
        bytes.extend_from_slice(b"CDN,Fastly,,,,,\n");
        fs::write(&path, bytes).unwrap();

        let loaded = DatasetStore::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);
    }
}
