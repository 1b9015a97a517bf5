use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "Message")]
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Converts newline-delimited log text into entries, one per line.
    pub fn from_text(text: &str) -> Vec<LogEntry> {
        text.lines().map(LogEntry::new).collect()
    }
}
