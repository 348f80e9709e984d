//! Report filename and text parsing.

use crate::results::{DateResults, LabResult};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// `<label letters><MMDDYYYY>[_<index digits>].pdf`, case-insensitive,
/// searched anywhere in the filename.
const FILENAME_PATTERN: &str = r"(?i)([A-Za-z]+)(\d{8})(_\d+)?\.pdf";

/// `<letters/spaces><optional colon><whitespace><numeric token><optional unit>`,
/// anchored at the start of the line. Label-greedy by contract: any line
/// shaped like letters-then-digits is a candidate result.
const LINE_PATTERN: &str = r"^([A-Za-z ]+):?\s*([\d.]+)\s*([\w/%]+)?";

fn filename_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILENAME_PATTERN).expect("filename pattern compiles"))
}

/// Extract the reporting date from a filename.
///
/// Returns `None` when the filename does not match the pattern or the
/// eight digits do not form a valid `MMDDYYYY` calendar date. The latter
/// case logs a warning naming the file.
pub fn report_date(filename: &str) -> Option<NaiveDate> {
    let caps = filename_re().captures(filename)?;
    let digits = caps.get(2).map(|m| m.as_str())?;
    match NaiveDate::parse_from_str(digits, "%m%d%Y") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Invalid date format in filename: {}", filename);
            None
        }
    }
}

/// One parsed lab observation from a single line of report text.
#[derive(Debug, Clone, PartialEq)]
pub struct TestObservation {
    pub name: String,
    pub result: LabResult,
}

/// Line-oriented matcher for lab-result text.
pub struct ReportParser {
    line_re: Regex,
}

impl ReportParser {
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(LINE_PATTERN).expect("line pattern compiles"),
        }
    }

    /// Try to read one observation out of a single line.
    ///
    /// The numeric token must parse as a float; the bare token `"."` is
    /// treated as no value. Lines failing either are dropped silently.
    pub fn match_line(&self, line: &str) -> Option<TestObservation> {
        let caps = self.line_re.captures(line)?;
        let name = caps.get(1)?.as_str().trim().to_string();

        let token = caps.get(2)?.as_str();
        if token == "." {
            return None;
        }
        let value: f64 = token.parse().ok()?;

        let unit = caps
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(TestObservation {
            name,
            result: LabResult { value, unit },
        })
    }

    /// Parse every line of one file's extracted text.
    ///
    /// A later matching line with the same label overwrites the earlier
    /// entry: last write wins within one file.
    pub fn parse_results(&self, text: &str) -> DateResults {
        let mut results = DateResults::new();
        for line in text.split('\n') {
            if let Some(obs) = self.match_line(line) {
                results.insert(obs.name, obs.result);
            }
        }
        results
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_date_from_valid_filename() {
        let date = report_date("Report08152023.pdf").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 8, 15).unwrap());
    }

    #[test]
    fn test_report_date_with_index_suffix() {
        let date = report_date("bloodwork01022024_2.pdf").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_report_date_case_insensitive() {
        assert!(report_date("REPORT08152023.PDF").is_some());
    }

    #[test]
    fn test_report_date_invalid_month() {
        assert!(report_date("Report13152023.pdf").is_none());
    }

    #[test]
    fn test_report_date_no_match() {
        assert!(report_date("notes.txt").is_none());
        assert!(report_date("report.pdf").is_none());
        assert!(report_date("08152023.pdf").is_none());
    }

    #[test]
    fn test_match_line_with_unit() {
        let parser = ReportParser::new();
        let obs = parser.match_line("Glucose: 95 mg/dL").unwrap();
        assert_eq!(obs.name, "Glucose");
        assert_eq!(obs.result.value, 95.0);
        assert_eq!(obs.result.unit, "mg/dL");
    }

    #[test]
    fn test_match_line_without_colon_or_unit() {
        let parser = ReportParser::new();
        let obs = parser.match_line("Hemoglobin 14.2").unwrap();
        assert_eq!(obs.name, "Hemoglobin");
        assert_eq!(obs.result.value, 14.2);
        assert_eq!(obs.result.unit, "");
    }

    #[test]
    fn test_match_line_bare_dot_is_no_value() {
        let parser = ReportParser::new();
        assert!(parser.match_line("Triglycerides: .").is_none());
    }

    #[test]
    fn test_match_line_bad_number_dropped() {
        let parser = ReportParser::new();
        assert!(parser.match_line("Cholesterol: 1.2.3.4 mg/dL").is_none());
    }

    #[test]
    fn test_match_line_non_result_text() {
        let parser = ReportParser::new();
        assert!(parser.match_line("").is_none());
        assert!(parser.match_line("--- end of report ---").is_none());
    }

    #[test]
    fn test_parse_results_last_line_wins() {
        let parser = ReportParser::new();
        let text = "Glucose: 90 mg/dL\nSodium: 140 mmol/L\nGlucose: 95 mg/dL";
        let results = parser.parse_results(text);

        assert_eq!(results.len(), 2);
        assert_eq!(results.get("Glucose").unwrap().value, 95.0);
        assert_eq!(results.get("Sodium").unwrap().value, 140.0);
    }

    #[test]
    fn test_parse_results_skips_unparseable_lines() {
        let parser = ReportParser::new();
        let text = "Patient Lab Report\nGlucose: 95 mg/dL\nCalcium: .\n";
        let results = parser.parse_results(text);

        assert_eq!(results.len(), 1);
        assert!(results.contains_key("Glucose"));
    }
}
