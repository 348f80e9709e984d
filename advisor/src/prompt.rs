//! Prompt construction for the advisory and Q&A chat requests.
//!
//! Every prompt re-sends the full result table; no conversation memory
//! is carried between questions.

use crate::results::ResultSet;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render the per-date, per-test results as a plain-text table, dates
/// and test names ascending.
pub fn render_results(results: &ResultSet) -> String {
    let mut out = String::new();
    for (date, date_results) in results.iter() {
        let _ = writeln!(out, "{}:", date);
        for (name, result) in date_results {
            if result.unit.is_empty() {
                let _ = writeln!(out, "  {}: {}", name, result.value);
            } else {
                let _ = writeln!(out, "  {}: {} {}", name, result.value, result.unit);
            }
        }
    }
    out
}

pub fn render_averages(averages: &BTreeMap<String, f64>) -> String {
    let mut out = String::new();
    for (name, value) in averages {
        let _ = writeln!(out, "  {}: {:.2}", name, value);
    }
    out
}

/// The one-shot advisory request issued after all files are processed.
pub fn advisory_prompt(results: &ResultSet, averages: &BTreeMap<String, f64>) -> String {
    format!(
        "A patient has undergone multiple blood tests on different dates. \
         Here are the results:\n{}\n\
         Here are the averages for the tests across these dates:\n{}\n\
         Provide a comprehensive medical assessment based on trends across these tests. \
         Highlight any concerning values, trends, and recommendations.",
        render_results(results),
        render_averages(averages)
    )
}

/// A single interactive question over the same result table.
pub fn question_prompt(
    results: &ResultSet,
    averages: &BTreeMap<String, f64>,
    question: &str,
) -> String {
    format!(
        "The patient has the following lab results:\n{}\n\
         Here are the averages for the tests across these dates:\n{}\n\
         Question: {}\n\
         Answer concisely and accurately.",
        render_results(results),
        render_averages(averages),
        question
    )
}
