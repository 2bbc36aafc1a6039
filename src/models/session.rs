use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SlotOption;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Chatting,
    AwaitingSlotSelection,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Chatting => "chatting",
            SessionMode::AwaitingSlotSelection => "awaiting_slot_selection",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// One user's conversation: transcript, mode, slot cache, selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub transcript: Vec<ChatMessage>,
    pub mode: SessionMode,
    /// Fetched once per session, then reused; replaced wholesale on fetch.
    pub slots: Option<Vec<SlotOption>>,
    pub selected_slot: Option<String>,
    /// The message that tipped the session into slot selection.
    pub triggering_message: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_activity: NaiveDateTime,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: id.into(),
            transcript: vec![],
            mode: SessionMode::Chatting,
            slots: None,
            selected_slot: None,
            triggering_message: None,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn slot_displays(&self) -> Vec<String> {
        self.slots
            .as_ref()
            .map(|slots| slots.iter().map(|s| s.display.clone()).collect())
            .unwrap_or_default()
    }
}
