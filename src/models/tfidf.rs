// TF-IDF vectorizer
//
// Vocabulary is learned from the training documents only. Terms are runs of
// two or more word characters after lower-casing; unknown terms are ignored
// at transform time.

use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use crate::errors::TrainError;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

/// Split text into lower-cased terms
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse row: (feature index, value), sorted by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// term -> feature index (alphabetical order)
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Learn vocabulary and idf weights from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, TrainError> {
        if documents.is_empty() {
            return Err(TrainError::NoDocuments);
        }

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(TrainError::EmptyVocabulary);
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Number of features
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Feature index of `term`, if it was seen during fitting
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// L2-normalized tf-idf row for one document
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut entries {
                *v /= norm;
            }
        }

        SparseVector { entries }
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_chars_and_punctuation() {
        assert_eq!(tokenize("I'm SO happy, a b!"), vec!["so", "happy"]);
        assert!(tokenize("? ! a").is_empty());
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let v = TfIdfVectorizer::fit(&["zebra apple", "mango"]).unwrap();
        assert_eq!(v.vocabulary_size(), 3);
        assert_eq!(v.term_index("apple"), Some(0));
        assert_eq!(v.term_index("mango"), Some(1));
        assert_eq!(v.term_index("zebra"), Some(2));
    }

    #[test]
    fn test_rows_are_unit_length() {
        let v = TfIdfVectorizer::fit(&["hello world", "hello there friend"]).unwrap();
        let row = v.transform("hello friend friend");
        assert!((row.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let v = TfIdfVectorizer::fit(&["hello world", "hello there"]).unwrap();
        let row = v.transform("hello world");
        let hello = v.term_index("hello").unwrap();
        let world = v.term_index("world").unwrap();
        let weight = |i| row.entries.iter().find(|(j, _)| *j == i).unwrap().1;
        assert!(weight(world) > weight(hello));
    }

    #[test]
    fn test_unknown_terms_are_ignored() {
        let v = TfIdfVectorizer::fit(&["hello world"]).unwrap();
        assert!(v.transform("completely unseen words").is_empty());
    }

    #[test]
    fn test_fit_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(TfIdfVectorizer::fit(&empty).unwrap_err(), TrainError::NoDocuments);
        assert_eq!(
            TfIdfVectorizer::fit(&["a", "? !"]).unwrap_err(),
            TrainError::EmptyVocabulary
        );
    }
}
