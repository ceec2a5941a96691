//! Grouping of citations by publication year

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::citation::Citation;

/// Citations partitioned by year, each year keeping insertion order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YearGroups {
    groups: HashMap<String, Vec<String>>,
    total: usize,
}

impl YearGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a citation to the end of its year's list
    pub fn push(&mut self, citation: Citation) {
        self.groups
            .entry(citation.year)
            .or_default()
            .push(citation.html);
        self.total += 1;
    }

    /// Years newest first; the undated group (empty key) always comes last
    pub fn sorted_years(&self) -> Vec<&str> {
        let mut years: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        years.sort_by(|a, b| compare_years(a, b));
        years
    }

    /// Citations for one year, in the order they were added
    pub fn citations(&self, year: &str) -> &[String] {
        self.groups.get(year).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of citations across all years
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct years, the undated group included
    pub fn year_count(&self) -> usize {
        self.groups.len()
    }
}

impl FromIterator<Citation> for YearGroups {
    fn from_iter<I: IntoIterator<Item = Citation>>(iter: I) -> Self {
        let mut groups = Self::new();
        for citation in iter {
            groups.push(citation);
        }
        groups
    }
}

/// Descending year order with the empty year placed after every dated one
pub fn compare_years(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.cmp(a),
    }
}
