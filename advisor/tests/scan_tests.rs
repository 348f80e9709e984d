use advisor::{report_date, scan_folder, ReportParser};
use chrono::NaiveDate;
use std::fs;

#[test]
fn scan_of_empty_folder_yields_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let results = scan_folder(dir.path());
    assert!(results.is_empty());
}

#[test]
fn scan_of_missing_folder_yields_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let results = scan_folder(&missing);
    assert!(results.is_empty());
}

#[test]
fn scan_skips_non_pdf_and_badly_named_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "Glucose: 95 mg/dL").unwrap();
    fs::write(dir.path().join("report.pdf"), "no date in this name").unwrap();
    fs::write(dir.path().join("Report13152023.pdf"), "month 13").unwrap();

    let results = scan_folder(dir.path());
    assert!(results.is_empty());
}

#[test]
fn scan_survives_a_corrupt_pdf() {
    let dir = tempfile::tempdir().unwrap();
    // Valid filename, garbage content: extraction yields empty text and
    // the file contributes zero results instead of aborting the scan.
    fs::write(dir.path().join("Report08152023.pdf"), b"not a pdf").unwrap();
    fs::write(dir.path().join("Report09152023.pdf"), b"also not a pdf").unwrap();

    let results = scan_folder(dir.path());
    assert!(results.is_empty());
}

#[test]
fn filename_date_round_trip() {
    assert_eq!(
        report_date("Report08152023.pdf"),
        NaiveDate::from_ymd_opt(2023, 8, 15)
    );
    assert_eq!(report_date("Report13152023.pdf"), None);
}

#[test]
fn parser_and_aggregation_end_to_end() {
    let parser = ReportParser::new();
    let mut set = advisor::ResultSet::new();

    let first = parser.parse_results("Glucose: 90 mg/dL\nSodium: 140 mmol/L\n");
    set.record(NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(), first);

    let second = parser.parse_results("Glucose: 110 mg/dL\n");
    set.record(NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(), second);

    let averages = set.averages();
    assert_eq!(averages.get("Glucose"), Some(&100.0));
    assert_eq!(averages.get("Sodium"), Some(&140.0));
}
