//! Shared data models: the Firehose value model and conversion summaries.

pub mod firehose;

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
/// Aggregated conversion summary used by printers.
pub struct ConvertSummary {
    pub files: usize,
    pub messages: usize,
    pub infos: usize,
    pub failures: usize,
    /// Category id -> reported element count, in stable id order.
    pub categories: BTreeMap<String, usize>,
    /// Path of the written report, when the document was opened.
    pub report: Option<String>,
}

impl ConvertSummary {
    pub fn new() -> Self {
        ConvertSummary {
            files: 0,
            messages: 0,
            infos: 0,
            failures: 0,
            categories: BTreeMap::new(),
            report: None,
        }
    }

    pub fn count_category(&mut self, id: &str) {
        *self.categories.entry(id.to_string()).or_insert(0) += 1;
    }
}

impl Default for ConvertSummary {
    fn default() -> Self {
        Self::new()
    }
}
