// Session history for the interactive UI
//
// Two parallel sequences: the (speaker, text) transcript and the questions
// the user asked. Both live in memory only and are emptied together.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Speaker {
    You,
    Bot,
}

impl Speaker {
    pub fn as_str(&self) -> &str {
        match self {
            Speaker::You => "You",
            Speaker::Bot => "Bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    messages: Vec<HistoryEntry>,
    questions: Vec<String>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one user message and the bot's reply
    pub fn record(&mut self, question: &str, reply: &str) {
        let now = Utc::now();
        self.messages.push(HistoryEntry {
            speaker: Speaker::You,
            text: question.to_string(),
            at: now,
        });
        self.messages.push(HistoryEntry {
            speaker: Speaker::Bot,
            text: reply.to_string(),
            at: now,
        });
        self.questions.push(question.to_string());
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.messages.clear();
        self.questions.clear();
    }

    pub fn messages(&self) -> &[HistoryEntry] {
        &self.messages
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.questions.is_empty()
    }

    /// Number of user messages recorded
    pub fn turn_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_is_empty() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.turn_count(), 0);
    }

    #[test]
    fn test_record_appends_pair_and_question() {
        let mut history = SessionHistory::new();
        history.record("hi", "hello!");
        history.record("bye", "see you");

        let speakers: Vec<_> = history.messages().iter().map(|m| m.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::You, Speaker::Bot, Speaker::You, Speaker::Bot]
        );
        assert_eq!(history.messages()[1].text, "hello!");
        assert_eq!(history.questions(), &["hi".to_string(), "bye".to_string()]);
        assert_eq!(history.turn_count(), 2);
    }

    #[test]
    fn test_clear_empties_both_sequences() {
        let mut history = SessionHistory::new();
        history.record("hi", "hello!");
        history.clear();

        assert!(history.messages().is_empty());
        assert!(history.questions().is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(Speaker::You.as_str(), "You");
        assert_eq!(Speaker::Bot.as_str(), "Bot");
    }
}
