// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::*;
use super::palette::Palette;

/// Where a dataset lives and which columns to read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file path (relative paths resolve against the working directory)
    pub path: PathBuf,
    /// Header name of the user text column
    pub input_column: String,
    /// Header name of the label column
    pub label_column: String,
}

impl DatasetConfig {
    pub fn new(
        path: impl Into<PathBuf>,
        input_column: impl Into<String>,
        label_column: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            input_column: input_column.into(),
            label_column: label_column.into(),
        }
    }

    pub fn default_chat() -> Self {
        Self::new(DEFAULT_CHAT_DATA, INPUT_COLUMN, CHAT_LABEL_COLUMN)
    }

    pub fn default_emotion() -> Self {
        Self::new(DEFAULT_EMOTION_DATA, INPUT_COLUMN, EMOTION_LABEL_COLUMN)
    }
}

/// Both datasets
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub chat: DatasetConfig,
    pub emotion: DatasetConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            chat: DatasetConfig::default_chat(),
            emotion: DatasetConfig::default_emotion(),
        }
    }
}

/// Logistic regression fitting parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Inverse L2 regularization strength (larger = weaker penalty)
    pub c: f64,
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Maximum full-batch iterations
    pub max_iter: usize,
    /// Stop once the gradient norm falls below this
    pub tol: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 1.0,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8501")
    pub bind_address: String,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    /// Longest accepted message, in characters
    pub max_message_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Web server settings
    pub server: ServerConfig,

    /// Chat and emotion datasets
    pub data: DataConfig,

    /// Classifier fitting parameters (shared by both pipelines)
    pub training: TrainingParams,

    /// Emotion colors and media
    pub palette: Palette,
}
