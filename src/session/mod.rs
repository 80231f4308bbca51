// Session module
// In-memory conversation state for the single interactive session

mod history;

pub use history::{HistoryEntry, SessionHistory, Speaker};
