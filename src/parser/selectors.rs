//! CSS selectors for the two report layouts
//!
//! The free view lists technologies as Bootstrap cards, one card per
//! category. The detailed view is a single table where category header rows
//! are interleaved with technology rows.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Free view selectors
    static ref FREE_CARD: Selector = parse_selector!(".card");
    static ref FREE_CARD_TITLE: Selector = parse_selector!(".card-title");
    static ref FREE_ROW: Selector = parse_selector!(".row.mb-1.mt-1");
    static ref FREE_COLUMN: Selector = parse_selector!(".col-12");
    static ref FREE_HEADING: Selector = parse_selector!("h2");
    static ref FREE_NAME: Selector = parse_selector!("h2 a.text-dark");
    static ref FREE_TAGS: Selector = parse_selector!("p.small.text-muted");
    static ref FREE_MARKER: Selector = parse_selector!(".card .card-title");

    // Detailed view selectors
    static ref DETAILED_TABLE: Selector = parse_selector!("table.table");
    static ref DETAILED_ROW: Selector = parse_selector!("tr");
    static ref DETAILED_DESCRIPTION: Selector = parse_selector!("div.small");
    static ref DETAILED_TAG: Selector = parse_selector!("a.text-muted");
    static ref DETAILED_MARKER: Selector = parse_selector!("table.table td.font-weight-bold");

    // Shared
    static ref LINK: Selector = parse_selector!("a");
}

/// Class marking a category header cell in the detailed table
pub const CATEGORY_HEADER_CLASS: &str = "font-weight-bold";

/// Minimum cell count of a technology row in the detailed table
pub const DETAILED_MIN_CELLS: usize = 5;

/// Selectors for the free (card based) report view
pub struct FreeViewSelectors {
    pub card: &'static Selector,
    pub card_title: &'static Selector,
    pub row: &'static Selector,
    pub column: &'static Selector,
    pub heading: &'static Selector,
    pub name: &'static Selector,
    pub tags: &'static Selector,
    pub tag_link: &'static Selector,
}

impl FreeViewSelectors {
    pub fn new() -> Self {
        Self {
            card: &FREE_CARD,
            card_title: &FREE_CARD_TITLE,
            row: &FREE_ROW,
            column: &FREE_COLUMN,
            heading: &FREE_HEADING,
            name: &FREE_NAME,
            tags: &FREE_TAGS,
            tag_link: &LINK,
        }
    }
}

impl Default for FreeViewSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for the detailed (table based) report view
pub struct DetailedViewSelectors {
    pub table: &'static Selector,
    pub row: &'static Selector,
    pub link: &'static Selector,
    pub description: &'static Selector,
    pub tag: &'static Selector,
}

impl DetailedViewSelectors {
    pub fn new() -> Self {
        Self {
            table: &DETAILED_TABLE,
            row: &DETAILED_ROW,
            link: &LINK,
            description: &DETAILED_DESCRIPTION,
            tag: &DETAILED_TAG,
        }
    }
}

impl Default for DetailedViewSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural markers used to classify a report
pub struct MarkerSelectors {
    pub free: &'static Selector,
    pub detailed: &'static Selector,
}

impl MarkerSelectors {
    pub fn new() -> Self {
        Self {
            free: &FREE_MARKER,
            detailed: &DETAILED_MARKER,
        }
    }
}

impl Default for MarkerSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Report view kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// Card layout without detection dates or emojis
    Free,
    /// Table layout with every field populated
    Detailed,
    /// Neither layout was found
    Unrecognized,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Free => "free",
            ReportFormat::Detailed => "detailed",
            ReportFormat::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
