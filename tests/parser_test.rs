//! Parser integration tests using HTML fixture files
//!
//! - Free view (card layout)
//! - Detailed view (table layout)
//! - Unrecognized pages

mod common;

use common::load_fixture;
use techstack::error::ParseError;
use techstack::parser::{detect_format, ReportFormat, ReportParser};

// ============================================================================
// Format Detection Tests
// ============================================================================

#[test]
fn test_detect_format_free_report() {
    let html = load_fixture("free_report.html");
    assert_eq!(detect_format(&html), ReportFormat::Free);
}

#[test]
fn test_detect_format_detailed_report() {
    let html = load_fixture("detailed_report.html");
    assert_eq!(detect_format(&html), ReportFormat::Detailed);
}

#[test]
fn test_detect_format_unrecognized_page() {
    let html = load_fixture("unrecognized.html");
    assert_eq!(detect_format(&html), ReportFormat::Unrecognized);
}

#[test]
fn test_detect_format_empty_input() {
    assert_eq!(detect_format(""), ReportFormat::Unrecognized);
}

// ============================================================================
// Free View Tests
// ============================================================================

#[test]
fn test_free_report_records() {
    let html = load_fixture("free_report.html");
    let extraction = ReportParser::new().parse(&html).unwrap();

    assert_eq!(extraction.format, ReportFormat::Free);
    let names: Vec<_> = extraction
        .records
        .iter()
        .map(|r| (r.category.as_str(), r.technology.as_str()))
        .collect();
    assert_eq!(
        names,
        [
            ("Analytics and Tracking", "Google Analytics"),
            ("Analytics and Tracking", "Hotjar"),
            ("Content Management System", "WordPress"),
        ]
    );
}

#[test]
fn test_free_report_fields() {
    let html = load_fixture("free_report.html");
    let records = ReportParser::new().parse(&html).unwrap().records;

    let ga = &records[0];
    assert_eq!(
        ga.description,
        "Google Analytics offers a host of compelling features and benefits for everyone."
    );
    assert_eq!(ga.tags, "Analytics, Audience Measurement");

    let hotjar = &records[1];
    assert_eq!(hotjar.description, "Heatmaps and session recordings.");
    assert_eq!(hotjar.tags, "");

    let wordpress = &records[2];
    assert_eq!(wordpress.description, "WordPress is a blog engine & CMS.");
    assert_eq!(wordpress.tags, "CMS, PHP");
}

#[test]
fn test_free_report_has_no_detection_fields() {
    let html = load_fixture("free_report.html");
    let records = ReportParser::new().parse(&html).unwrap().records;

    for record in &records {
        assert!(record.first_detected.is_empty(), "{record:?}");
        assert!(record.last_detected.is_empty(), "{record:?}");
        assert!(record.emojis.is_empty(), "{record:?}");
    }
}

// ============================================================================
// Detailed View Tests
// ============================================================================

#[test]
fn test_detailed_report_records() {
    let html = load_fixture("detailed_report.html");
    let extraction = ReportParser::new().parse(&html).unwrap();

    assert_eq!(extraction.format, ReportFormat::Detailed);
    assert_eq!(extraction.records.len(), 4);

    let cloudflare = extraction
        .records
        .iter()
        .find(|r| r.technology == "Cloudflare")
        .unwrap();
    assert_eq!(cloudflare.category, "Content Delivery Network");
    assert_eq!(cloudflare.description, "");
    assert_eq!(cloudflare.first_detected, "Feb 2019");
    assert_eq!(cloudflare.last_detected, "Oct 2026");
    assert_eq!(cloudflare.emojis, "🔥");
}

#[test]
fn test_detailed_report_inherits_category() {
    let html = load_fixture("detailed_report.html");
    let records = ReportParser::new().parse(&html).unwrap().records;

    for record in &records {
        assert!(!record.category.is_empty(), "{record:?}");
    }
    let hotjar = records.iter().find(|r| r.technology == "Hotjar").unwrap();
    assert_eq!(hotjar.category, "Analytics and Tracking");
    let wordpress = records.iter().find(|r| r.technology == "WordPress").unwrap();
    assert_eq!(wordpress.category, "Content Management System");
}

#[test]
fn test_detailed_report_tag_block_is_not_description() {
    let html = load_fixture("detailed_report.html");
    let records = ReportParser::new().parse(&html).unwrap().records;

    let hotjar = records.iter().find(|r| r.technology == "Hotjar").unwrap();
    assert_eq!(hotjar.description, "");
    assert_eq!(hotjar.tags, "Heatmap, UX");

    let wordpress = records.iter().find(|r| r.technology == "WordPress").unwrap();
    assert_eq!(wordpress.description, "WordPress is a blog engine & CMS.");
    assert_eq!(wordpress.emojis, "🏆 ⭐");
}

#[test]
fn test_detailed_rows_before_first_header_have_empty_category() {
    let html = r#"
        <table class="table">
          <tr><td></td><td><a>Orphan</a></td><td>2020</td><td>2021</td><td></td></tr>
          <tr><td></td><td class="font-weight-bold">CDN</td></tr>
          <tr><td></td><td><a>Fastly</a></td><td>2020</td><td>2021</td><td></td></tr>
        </table>
    "#;
    let records = ReportParser::new().parse(html).unwrap().records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, "");
    assert_eq!(records[1].category, "CDN");
}

#[test]
fn test_detailed_table_without_technologies_is_empty() {
    let html = r#"<table class="table"><tr><td></td><td class="font-weight-bold">CDN</td></tr></table>"#;
    let extraction = ReportParser::new().parse(html).unwrap();
    assert_eq!(extraction.format, ReportFormat::Detailed);
    assert!(extraction.records.is_empty());
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unrecognized_report_is_error() {
    let html = load_fixture("unrecognized.html");
    let result = ReportParser::new().parse(&html);
    assert!(matches!(result, Err(ParseError::UnrecognizedReport)));
}
