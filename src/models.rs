// Core data structures for techstack

use serde::Serialize;
use std::fmt;

/// Column header of the persisted dataset, in field order
pub const DATASET_HEADER: [&str; FIELD_COUNT] = [
    "Category",
    "Technology",
    "Description",
    "Tags",
    "First Detected",
    "Last Detected",
    "Emojis",
];

/// Number of fields in every technology record
pub const FIELD_COUNT: usize = 7;

/// One detected technology within one category of a report
///
/// Every field is plain text; an empty string means "not captured".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TechRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Technology")]
    pub technology: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "First Detected")]
    pub first_detected: String,
    #[serde(rename = "Last Detected")]
    pub last_detected: String,
    #[serde(rename = "Emojis")]
    pub emojis: String,
}

impl TechRecord {
    /// Create a record with only the identity fields set
    pub fn new(category: impl Into<String>, technology: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            technology: technology.into(),
            ..Default::default()
        }
    }

    /// Identity key: `(category, technology)`
    pub fn key(&self) -> RecordKey {
        RecordKey {
            category: self.category.clone(),
            technology: self.technology.clone(),
        }
    }

    /// Fields in dataset column order
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.category,
            &self.technology,
            &self.description,
            &self.tags,
            &self.first_detected,
            &self.last_detected,
            &self.emojis,
        ]
    }

    /// Build a record from exactly seven positional fields
    ///
    /// Returns `None` for any other field count.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = fields.into_iter().map(<S as Into<String>>::into);
        let record = Self {
            category: it.next()?,
            technology: it.next()?,
            description: it.next()?,
            tags: it.next()?,
            first_detected: it.next()?,
            last_detected: it.next()?,
            emojis: it.next()?,
        };
        if it.next().is_some() {
            return None;
        }
        Some(record)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Set the detailed-view fields
    pub fn with_detection(
        mut self,
        first_detected: impl Into<String>,
        last_detected: impl Into<String>,
        emojis: impl Into<String>,
    ) -> Self {
        self.first_detected = first_detected.into();
        self.last_detected = last_detected.into();
        self.emojis = emojis.into();
        self
    }
}

/// Identity of a record within the dataset
///
/// Ordering is literal string ordering on category, then technology.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub category: String,
    pub technology: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.category, self.technology)
    }
}
