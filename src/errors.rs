// Startup error types
//
// Everything that can go wrong before the server accepts its first message.
// The inference path has no error states: the classifier always answers.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while fitting a classifier
#[derive(Debug, Error, PartialEq)]
pub enum TrainError {
    #[error("no training documents")]
    NoDocuments,

    #[error("{documents} documents but {labels} labels")]
    LengthMismatch { documents: usize, labels: usize },

    #[error("empty vocabulary; perhaps the documents only contain stop characters")]
    EmptyVocabulary,

    #[error("needs samples of at least 2 classes, got {0}")]
    TooFewClasses(usize),
}

/// Fatal error while loading a dataset and building its pipeline
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("'{}' file not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Error loading '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Error loading '{}': missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Error loading '{}': no usable rows", path.display())]
    Empty { path: PathBuf },

    #[error("Error training '{pipeline}' model: {source}")]
    Training {
        pipeline: String,
        #[source]
        source: TrainError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_file() {
        let err = LoadError::NotFound {
            path: PathBuf::from("English_Chatbot.csv"),
        };
        assert_eq!(err.to_string(), "'English_Chatbot.csv' file not found.");
    }

    #[test]
    fn test_training_message_wraps_cause() {
        let err = LoadError::Training {
            pipeline: "emotion".to_string(),
            source: TrainError::TooFewClasses(1),
        };
        assert!(err.to_string().contains("'emotion'"));
        assert!(err.to_string().contains("at least 2 classes"));
    }
}
