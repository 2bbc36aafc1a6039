use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_model: String,
    pub neeto_api_key: String,
    pub neeto_workspace: String,
    pub meeting_slug: String,
    pub time_zone: String,
    pub system_prompt_path: String,
    pub scheduling_prompt_path: String,
    pub default_booking_name: String,
    pub default_booking_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4-turbo".to_string()),
            neeto_api_key: env::var("NEETO_CAL_API_KEY").unwrap_or_default(),
            neeto_workspace: env::var("NEETO_WORKSPACE").unwrap_or_default(),
            meeting_slug: env::var("MEETING_SLUG")
                .unwrap_or_else(|_| "personal-training-session".to_string()),
            time_zone: env::var("TIME_ZONE")
                .unwrap_or_else(|_| "America/New_York".to_string()),
            system_prompt_path: env::var("SYSTEM_PROMPT_PATH")
                .unwrap_or_else(|_| "prompts/fitness_persona.txt".to_string()),
            scheduling_prompt_path: env::var("SCHEDULING_PROMPT_PATH")
                .unwrap_or_else(|_| "prompts/scheduling.txt".to_string()),
            default_booking_name: env::var("DEFAULT_BOOKING_NAME")
                .unwrap_or_else(|_| "Placeholder Name".to_string()),
            default_booking_email: env::var("DEFAULT_BOOKING_EMAIL")
                .unwrap_or_else(|_| "placeholder@example.com".to_string()),
        }
    }
}
