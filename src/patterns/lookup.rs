// Lookup table - lower-cased training input -> label
//
// Keys keep the position of their first occurrence; a repeated key takes the
// label of its last occurrence. Scanning in that order makes the "first best
// match wins" tie-break reproducible.

use std::collections::HashMap;

use super::fuzzy::{full_process, wratio_processed};
use crate::dataset::TrainingRecord;

#[derive(Debug, Clone)]
struct LookupEntry {
    key: String,
    /// `full_process(key)`, computed once at build time
    processed: String,
    label: String,
}

/// Best-scoring key for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub score: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<LookupEntry>,
    index: HashMap<String, usize>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[TrainingRecord]) -> Self {
        let mut table = Self::new();
        for record in records {
            table.insert(&record.input, &record.label);
        }
        table
    }

    /// Insert or overwrite the label for `input` (lower-cased)
    pub fn insert(&mut self, input: &str, label: &str) {
        let key = input.to_lowercase();
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].label = label.to_string();
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(LookupEntry {
            processed: full_process(&key),
            key,
            label: label.to_string(),
        });
    }

    /// Exact lookup by lower-cased key
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in scan order
    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Highest scoring key for `query`. `None` only when the table is empty.
    /// Ties keep the earliest key.
    pub fn best_match(&self, query: &str) -> Option<FuzzyMatch<'_>> {
        let processed_query = full_process(query);
        let mut best: Option<FuzzyMatch<'_>> = None;

        for entry in &self.entries {
            let score = wratio_processed(&processed_query, &entry.processed);
            if best.map_or(true, |b| score > b.score) {
                best = Some(FuzzyMatch {
                    key: &entry.key,
                    label: &entry.label,
                    score,
                });
                if score == 100 {
                    break;
                }
            }
        }

        best
    }
}
