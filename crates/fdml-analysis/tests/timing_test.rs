//! Timing engine tests: meter alignment per figure, file-level failures.

use std::fs;
use std::path::PathBuf;

use fdml_analysis::timing::{parse_meter, validate_collect, validate_document, validate_one};
use fdml_analysis::IssueCode;
use fdml_core::config::ScanConfig;
use fdml_core::Document;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/fdml")
}

fn doc(meter: &str, steps: &[&str]) -> Document {
    let steps: String = steps
        .iter()
        .map(|b| format!(r#"<step beats="{b}"/>"#))
        .collect();
    Document::parse(&format!(
        r#"<fdml version="1.2"><meta><meter value="{meter}"/></meta><body><figure id="fig">{steps}</figure></body></fdml>"#
    ))
    .unwrap()
}

fn codes(meter: &str, steps: &[&str]) -> Vec<IssueCode> {
    validate_document(&doc(meter, steps))
        .into_iter()
        .map(|i| i.code)
        .collect()
}

#[test]
fn test_additive_boundary_failure() {
    assert_eq!(codes("2+2+2+3/16", &["3", "6"]), vec![IssueCode::OffMeterFigure]);
}

#[test]
fn test_additive_pattern_only_checks_final_step() {
    // Total 8 fills two bars of four groups.
    assert!(codes("2+2+2+3/16", &["3", "5"]).is_empty());
}

#[test]
fn test_nine_sixteen_half_bar() {
    assert!(codes("9/16", &["3", "3"]).is_empty());
    assert_eq!(codes("9/16", &["3", "2"]), vec![IssueCode::OffMeterFigure]);
}

#[test]
fn test_simple_meter() {
    assert!(codes("3/4", &["1", "1", "1"]).is_empty());
    assert_eq!(codes("3/4", &["2", "2"]), vec![IssueCode::OffMeterFigure]);
}

#[test]
fn test_off_meter_message_carries_totals() {
    let issues = validate_document(&doc("3/4", &["2", "2"]));
    assert_eq!(issues[0].figure_id.as_deref(), Some("fig"));
    assert!(issues[0].message.contains("4"));
    assert!(issues[0].message.contains("bar length 3"));
    assert!(issues[0].message.contains("3/4"));
}

#[test]
fn test_bad_beats_skip_the_figure() {
    assert_eq!(
        codes("3/4", &["1.5", "2"]),
        vec![IssueCode::BadStepBeats]
    );
}

#[test]
fn test_meter_whitespace_is_normalised() {
    assert!(codes("  3/4 ", &["3"]).is_empty());
}

#[test]
fn test_bad_meter_stops_file() {
    assert_eq!(codes("3/4/2", &["x"]), vec![IssueCode::BadMeterFormat]);
    assert_eq!(codes("three/4", &["3"]), vec![IssueCode::BadMeterFormat]);
}

#[test]
fn test_timing_applies_to_every_version() {
    let legacy = Document::parse(
        r#"<fdml version="1.0"><meta/><body><figure><step beats="4"/></figure></body></fdml>"#,
    )
    .unwrap();
    let issues = validate_document(&legacy);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::MissingMeter);
    assert_eq!(issues[0].figure_id, None);
}

#[test]
fn test_parse_meter_exposes_groups() {
    let m = parse_meter("3+2+2/8").unwrap();
    assert_eq!(m.groups, vec![3, 2, 2]);
    assert_eq!(m.denominator, 8);
    assert_eq!(m.bar_length_counts, 3);
}

#[test]
fn test_timing_fixtures() {
    let results = validate_collect(&[fixtures().join("timing")], &ScanConfig::default()).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].file.ends_with("additive-off.xml"));
    assert_eq!(results[0].codes(), vec![IssueCode::OffMeterFigure]);
    assert!(results[1].file.ends_with("nine-sixteen.xml"));
    assert!(results[1].ok);
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<fdml><meta></fdml>").unwrap();
    let r = validate_one(&path);
    assert_eq!(r.codes(), vec![IssueCode::BadMeterFormat]);
    assert!(r.issues[0].message.starts_with("XML parse error:"));
}

#[test]
fn test_overflowing_meter_is_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.xml"),
        r#"<fdml version="1.2"><meta><meter value="4294967295+1/4"/></meta><body><figure id="f"><step beats="2"/></figure></body></fdml>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b.xml"),
        r#"<fdml version="1.2"><meta><meter value="2/4"/></meta><body><figure id="f"><step beats="2"/></figure></body></fdml>"#,
    )
    .unwrap();

    let results = validate_collect(&[dir.path().to_path_buf()], &ScanConfig::default()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].codes(), vec![IssueCode::BadMeterFormat]);
    assert!(results[1].ok);
}
