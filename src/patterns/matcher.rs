// Lookup-or-classify matcher
//
// A near-exact textual hit in the lookup table short-circuits the classifier;
// anything else gets the classifier's prediction.

use serde::{Deserialize, Serialize};

use super::lookup::LookupTable;
use crate::models::Classifier;

/// Where a resolved label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Lookup,
    Classifier,
}

impl MatchSource {
    pub fn as_str(&self) -> &str {
        match self {
            MatchSource::Lookup => "lookup",
            MatchSource::Classifier => "classifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Fuzzy score cleared the threshold
    Lookup {
        label: String,
        key: String,
        score: u32,
    },
    /// Classifier fallback; `best_score` is the sub-threshold lookup score,
    /// if the table had any keys
    Classifier {
        label: String,
        best_score: Option<u32>,
    },
}

impl Resolution {
    pub fn label(&self) -> &str {
        match self {
            Resolution::Lookup { label, .. } | Resolution::Classifier { label, .. } => label,
        }
    }

    pub fn into_label(self) -> String {
        match self {
            Resolution::Lookup { label, .. } | Resolution::Classifier { label, .. } => label,
        }
    }

    pub fn source(&self) -> MatchSource {
        match self {
            Resolution::Lookup { .. } => MatchSource::Lookup,
            Resolution::Classifier { .. } => MatchSource::Classifier,
        }
    }

    /// Best fuzzy score seen, if any key was compared
    pub fn score(&self) -> Option<u32> {
        match self {
            Resolution::Lookup { score, .. } => Some(*score),
            Resolution::Classifier { best_score, .. } => *best_score,
        }
    }
}

/// Resolve `input` to a label and report how it was chosen
pub fn resolve_detailed(
    input: &str,
    lookup: &LookupTable,
    classifier: &dyn Classifier,
    threshold: u32,
) -> Resolution {
    let lowered = input.to_lowercase();

    // Always computed so there is a fallback whatever the lookup says
    let predicted = classifier.predict(&lowered);

    match lookup.best_match(&lowered) {
        Some(m) if m.score >= threshold => {
            tracing::debug!(
                "Lookup hit: {:?} -> {:?} (score {} >= {})",
                m.key,
                m.label,
                m.score,
                threshold
            );
            Resolution::Lookup {
                label: m.label.to_string(),
                key: m.key.to_string(),
                score: m.score,
            }
        }
        best => {
            tracing::debug!(
                "Falling back to {} prediction {:?} (best lookup score {:?})",
                classifier.name(),
                predicted,
                best.map(|m| m.score)
            );
            Resolution::Classifier {
                label: predicted,
                best_score: best.map(|m| m.score),
            }
        }
    }
}

/// Resolve `input` to a label
pub fn resolve(
    input: &str,
    lookup: &LookupTable,
    classifier: &dyn Classifier,
    threshold: u32,
) -> String {
    resolve_detailed(input, lookup, classifier, threshold).into_label()
}
