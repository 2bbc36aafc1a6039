use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::models::Session;
use crate::services::ai::LlmProvider;
use crate::services::calendar::CalendarProvider;

/// Persona prompt selector for chat replies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptVariant {
    General,
    Scheduling,
}

/// System prompt texts, loaded from files once at startup.
#[derive(Clone, Debug)]
pub struct Prompts {
    pub general: String,
    pub scheduling: String,
}

impl Prompts {
    pub fn get(&self, variant: PromptVariant) -> &str {
        match variant {
            PromptVariant::General => &self.general,
            PromptVariant::Scheduling => &self.scheduling,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub prompts: Prompts,
    pub llm: Box<dyn LlmProvider>,
    pub calendar: Box<dyn CalendarProvider>,
    /// One state-machine instance per session id. Never held across an await.
    pub sessions: Mutex<HashMap<String, Session>>,
}
