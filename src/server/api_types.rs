// JSON API types
//
// Request and response bodies for the /api routes. The HTML form routes use
// `MessageForm` with the same field name.

use serde::{Deserialize, Serialize};

use crate::patterns::MatchSource;
use crate::session::{HistoryEntry, SessionHistory};

/// Body of POST /api/message and the form posted to /message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
}

/// Response for POST /api/message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Chat pipeline label
    pub reply: String,
    /// Emotion pipeline label
    pub emotion: String,
    /// Background color for the emotion
    pub color: String,
    /// Embeddable media URL for the emotion, when mapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// "lookup" or "classifier"
    pub reply_source: MatchSource,
    /// "lookup" or "classifier"
    pub emotion_source: MatchSource,
}

/// Response for GET /api/history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryEntry>,
    pub questions: Vec<String>,
}

impl From<&SessionHistory> for HistoryResponse {
    fn from(history: &SessionHistory) -> Self {
        Self {
            messages: history.messages().to_vec(),
            questions: history.questions().to_vec(),
        }
    }
}

/// Error body for rejected API requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
