//! One pass over every PDF report in a folder.

use crate::pdf;
use crate::report::{report_date, ReportParser};
use crate::results::ResultSet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Process every `*.pdf` in `folder` (non-recursive, directory
/// enumeration order) and fold the parsed results into one `ResultSet`.
///
/// Per-file problems are reported on the console and skipped; the scan
/// itself never fails. An unreadable folder yields an empty set.
pub fn scan_folder(folder: &Path) -> ResultSet {
    let parser = ReportParser::new();
    let mut all_results = ResultSet::new();

    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read folder {}: {}", folder.display(), e);
            return all_results;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            continue;
        }

        match report_date(filename) {
            Some(date) => {
                let text = pdf::extract_text(&path);
                let results = parser.parse_results(&text);
                if results.is_empty() {
                    println!("No valid bloodwork data found in {}", filename);
                } else {
                    all_results.record(date, results);
                    println!("Processed: {} (Date: {})", filename, date);
                }
            }
            None => println!("Filename does not match expected format: {}", filename),
        }
    }

    all_results
}
