//! Aggregation of parsed lab results across report dates.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A single measured quantity for one test on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct LabResult {
    pub value: f64,
    pub unit: String,
}

/// Results parsed from the reports for one date, keyed by test name.
///
/// Test names are free-form strings taken verbatim (trimmed) from the
/// report text. Differently formatted labels for the same physiological
/// test stay distinct entries.
pub type DateResults = BTreeMap<String, LabResult>;

/// Accumulator for all results seen during one run, keyed by report date.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    by_date: BTreeMap<NaiveDate, DateResults>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's results under its report date.
    ///
    /// Same-date same-test entries are overwritten by the most recently
    /// processed file. Empty result maps are never recorded, so a date
    /// with no parsed results never appears in the set.
    pub fn record(&mut self, date: NaiveDate, results: DateResults) {
        if results.is_empty() {
            return;
        }
        self.by_date.entry(date).or_default().extend(results);
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Number of distinct report dates recorded.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Dates and their results, ascending by date.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DateResults)> {
        self.by_date.iter()
    }

    /// Arithmetic mean per test name across exactly the dates where it
    /// was observed. A test missing on some date is excluded from that
    /// test's sample, not counted as zero.
    pub fn averages(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for results in self.by_date.values() {
            for (name, result) in results {
                let entry = sums.entry(name.clone()).or_insert((0.0, 0));
                entry.0 += result.value;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect()
    }
}
