//! Report HTML parser for the free and detailed views
//!
//! This module classifies a saved report by its structural markers and
//! extracts one [`TechRecord`] per technology entry.

use scraper::element_ref::Select;
use scraper::{ElementRef, Html};

use crate::models::TechRecord;
use crate::parser::sanitize::{element_text, has_content};
use crate::parser::selectors::{
    DetailedViewSelectors, FreeViewSelectors, MarkerSelectors, ReportFormat,
    CATEGORY_HEADER_CLASS, DETAILED_MIN_CELLS,
};
use crate::utils::error::ParseError;

/// Records extracted from one report, with the view they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub format: ReportFormat,
    pub records: Vec<TechRecord>,
}

/// Report parser supporting both report views
///
/// Supports:
/// - Free view: one `.card` per category, one `.row` per technology
/// - Detailed view: a `table.table` with category header rows followed by
///   technology rows carrying detection dates and emojis
pub struct ReportParser {
    free: FreeViewSelectors,
    detailed: DetailedViewSelectors,
    markers: MarkerSelectors,
}

impl ReportParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            free: FreeViewSelectors::new(),
            detailed: DetailedViewSelectors::new(),
            markers: MarkerSelectors::new(),
        }
    }

    /// Classify the report and extract its records
    ///
    /// # Errors
    /// Returns `ParseError::UnrecognizedReport` if the HTML matches neither
    /// view. A recognized report without technology entries yields an empty
    /// record list.
    pub fn parse(&self, html: &str) -> Result<Extraction, ParseError> {
        let document = Html::parse_document(html);

        let format = self.classify(&document);
        if format == ReportFormat::Unrecognized {
            tracing::debug!("Report matched neither free nor detailed layout");
            return Err(ParseError::UnrecognizedReport);
        }

        let records = self.extract_document(&document, format);
        tracing::debug!(format = %format, records = records.len(), "Report parsed");

        Ok(Extraction { format, records })
    }

    /// Extract records assuming the given view kind
    ///
    /// `ReportFormat::Unrecognized` always yields no records.
    pub fn extract(&self, html: &str, format: ReportFormat) -> Vec<TechRecord> {
        let document = Html::parse_document(html);
        self.extract_document(&document, format)
    }

    /// Determine the report view from its structural skeleton
    pub fn detect(&self, html: &str) -> ReportFormat {
        self.classify(&Html::parse_document(html))
    }

    fn classify(&self, document: &Html) -> ReportFormat {
        if document.select(self.markers.detailed).next().is_some() {
            ReportFormat::Detailed
        } else if document.select(self.markers.free).next().is_some() {
            ReportFormat::Free
        } else {
            ReportFormat::Unrecognized
        }
    }

    fn extract_document(&self, document: &Html, format: ReportFormat) -> Vec<TechRecord> {
        match format {
            ReportFormat::Free => self.extract_free(document),
            ReportFormat::Detailed => self.extract_detailed(document),
            ReportFormat::Unrecognized => Vec::new(),
        }
    }

    /// Parse the card layout
    fn extract_free(&self, document: &Html) -> Vec<TechRecord> {
        let mut records = Vec::new();

        for card in document.select(self.free.card) {
            let Some(title) = card.select(self.free.card_title).next() else {
                continue;
            };
            let category = element_text(title);

            for row in card.select(self.free.row) {
                let Some(column) = row.select(self.free.column).next() else {
                    continue;
                };
                let Some(name) = column.select(self.free.name).next() else {
                    continue;
                };
                let technology = element_text(name);
                if !has_content(&technology) {
                    continue;
                }

                let tags_paragraph = column.select(self.free.tags).next();
                let description = column
                    .select(self.free.heading)
                    .next()
                    .and_then(|heading| following_paragraph(heading, tags_paragraph))
                    .map(element_text)
                    .unwrap_or_default();
                let tags = tags_paragraph
                    .map(|p| join_tags(p.select(self.free.tag_link)))
                    .unwrap_or_default();

                tracing::trace!(category = %category, technology = %technology, "Free entry");
                records.push(
                    TechRecord::new(category.clone(), technology)
                        .with_description(description)
                        .with_tags(tags),
                );
            }
        }

        records
    }

    /// Parse the table layout
    fn extract_detailed(&self, document: &Html) -> Vec<TechRecord> {
        let mut records = Vec::new();

        let Some(table) = document.select(self.detailed.table).next() else {
            return records;
        };

        let mut category = String::new();

        for row in table.select(self.detailed.row) {
            let cells = row_cells(row);

            if cells.len() >= 2 && is_category_header(cells[1]) {
                category = element_text(cells[1]);
                continue;
            }

            if cells.len() < DETAILED_MIN_CELLS {
                continue;
            }

            let info = cells[1];
            let Some(link) = info.select(self.detailed.link).next() else {
                continue;
            };
            let technology = element_text(link);
            if !has_content(&technology) {
                continue;
            }

            // A description block holding links is a tag list, not prose
            let description_block = info.select(self.detailed.description).next();
            let description = description_block
                .filter(|block| block.select(self.detailed.link).next().is_none())
                .map(element_text)
                .unwrap_or_default();
            let tags = description_block
                .map(|block| join_tags(block.select(self.detailed.tag)))
                .unwrap_or_default();

            tracing::trace!(category = %category, technology = %technology, "Detailed entry");
            records.push(
                TechRecord::new(category.clone(), technology)
                    .with_description(description)
                    .with_tags(tags)
                    .with_detection(
                        element_text(cells[2]),
                        element_text(cells[3]),
                        element_text(cells[4]),
                    ),
            );
        }

        records
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect report view from HTML structure
#[must_use]
pub fn detect_format(html: &str) -> ReportFormat {
    ReportParser::new().detect(html)
}

/// Direct `td` children of a table row
fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .collect()
}

fn is_category_header(cell: ElementRef<'_>) -> bool {
    cell.value().classes().any(|class| class == CATEGORY_HEADER_CLASS)
}

/// First `p` sibling after `heading`, skipping the tag paragraph
fn following_paragraph<'a>(
    heading: ElementRef<'a>,
    tags_paragraph: Option<ElementRef<'a>>,
) -> Option<ElementRef<'a>> {
    let tags_id = tags_paragraph.map(|p| p.id());
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p" && Some(el.id()) != tags_id)
}

fn join_tags(links: Select<'_, '_>) -> String {
    links
        .map(element_text)
        .filter(|tag| has_content(tag))
        .collect::<Vec<_>>()
        .join(", ")
}
