// Project-wide constants
//
// Centralised here so file names, addresses and magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Fuzzy match score (0-100) at or above which a lookup hit overrides the
/// classifier. Shared by both pipelines and not tunable at runtime.
pub const MATCH_THRESHOLD: u32 = 75;

/// Default bind address for the web UI (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8501";

/// Default request body limit. Messages are short free text.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Default cap on a single message, in characters. Longer messages are
/// rejected before any scoring happens.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 1000;

/// Default chat dataset, relative to the working directory.
pub const DEFAULT_CHAT_DATA: &str = "English_Chatbot.csv";

/// Default emotion dataset, relative to the working directory.
pub const DEFAULT_EMOTION_DATA: &str = "friendly_emotion_chatbot.csv";

/// Column holding the user text in both datasets.
pub const INPUT_COLUMN: &str = "input";

/// Label column of the chat dataset.
pub const CHAT_LABEL_COLUMN: &str = "chatbot";

/// Label column of the emotion dataset.
pub const EMOTION_LABEL_COLUMN: &str = "emotion";

/// Color used for any emotion without an entry in the palette.
pub const DEFAULT_EMOTION_COLOR: &str = "#616161";

/// Config directory name under the user's home.
pub const CONFIG_DIR_NAME: &str = ".moodbot";
