// Text classification models
//
// A `TextClassifier` is a TF-IDF vectorizer plus a logistic regression
// fitted on the same documents. The `Classifier` trait is the seam the
// matcher falls back to.

mod logistic;
mod tfidf;

pub use logistic::LogisticRegression;
pub use tfidf::{tokenize, SparseVector, TfIdfVectorizer};

use crate::config::TrainingParams;
use crate::errors::TrainError;

/// Anything that can label free text. Always answers.
pub trait Classifier: Send + Sync {
    /// Predict a label for `text`
    fn predict(&self, text: &str) -> String;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// TF-IDF + multinomial logistic regression
#[derive(Debug, Clone)]
pub struct TextClassifier {
    vectorizer: TfIdfVectorizer,
    model: LogisticRegression,
}

impl TextClassifier {
    /// Fit both stages on `(documents, labels)`
    pub fn fit<D: AsRef<str>, L: AsRef<str>>(
        documents: &[D],
        labels: &[L],
        params: &TrainingParams,
    ) -> Result<Self, TrainError> {
        let vectorizer = TfIdfVectorizer::fit(documents)?;
        let rows = vectorizer.transform_all(documents);
        let model = LogisticRegression::fit(&rows, labels, vectorizer.vocabulary_size(), params)?;

        tracing::debug!(
            "Fitted classifier: {} documents, {} features, {} classes, {} iterations",
            documents.len(),
            vectorizer.vocabulary_size(),
            model.classes().len(),
            model.iterations()
        );

        Ok(Self { vectorizer, model })
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn iterations(&self) -> usize {
        self.model.iterations()
    }
}

impl Classifier for TextClassifier {
    fn predict(&self, text: &str) -> String {
        self.model
            .predict(&self.vectorizer.transform(text))
            .to_string()
    }

    fn name(&self) -> &str {
        "tfidf_logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_classifier_end_to_end() {
        let docs = [
            "what is your name",
            "tell me your name",
            "how old are you",
            "what is your age",
        ];
        let labels = ["I'm Moodbot!", "I'm Moodbot!", "Timeless.", "Timeless."];
        let classifier = TextClassifier::fit(&docs, &labels, &TrainingParams::default()).unwrap();

        assert_eq!(classifier.classes().len(), 2);
        assert_eq!(classifier.predict("your name please"), "I'm Moodbot!");
        assert_eq!(classifier.predict("how OLD are you?"), "Timeless.");
        assert_eq!(classifier.name(), "tfidf_logistic");
    }

    #[test]
    fn test_fit_propagates_vocabulary_error() {
        let err = TextClassifier::fit(&["!", "?"], &["a", "b"], &TrainingParams::default())
            .unwrap_err();
        assert_eq!(err, TrainError::EmptyVocabulary);
    }
}
