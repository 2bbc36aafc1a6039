use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fitdesk::config::AppConfig;
use fitdesk::handlers;
use fitdesk::services::ai::openai::OpenAiProvider;
use fitdesk::services::ai::LlmProvider;
use fitdesk::services::calendar::neeto::NeetoCalClient;
use fitdesk::services::calendar::CalendarProvider;
use fitdesk::state::{AppState, Prompts};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    anyhow::ensure!(!config.openai_api_key.is_empty(), "OPENAI_API_KEY must be set");
    anyhow::ensure!(!config.neeto_api_key.is_empty(), "NEETO_CAL_API_KEY must be set");
    anyhow::ensure!(!config.neeto_workspace.is_empty(), "NEETO_WORKSPACE must be set");

    let prompts = Prompts {
        general: std::fs::read_to_string(&config.system_prompt_path)?.trim().to_string(),
        scheduling: std::fs::read_to_string(&config.scheduling_prompt_path)?.trim().to_string(),
    };

    tracing::info!(model = %config.openai_model, "using OpenAI chat provider");
    let llm: Box<dyn LlmProvider> = Box::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    tracing::info!(
        workspace = %config.neeto_workspace,
        meeting = %config.meeting_slug,
        "using NeetoCal calendar provider"
    );
    let calendar: Box<dyn CalendarProvider> = Box::new(NeetoCalClient::new(
        config.neeto_api_key.clone(),
        config.neeto_workspace.clone(),
        config.meeting_slug.clone(),
        config.time_zone.clone(),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        prompts,
        llm,
        calendar,
        sessions: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/", get(handlers::chat::chat_page))
        .route("/health", get(handlers::health::health))
        .route("/api/sessions", post(handlers::chat::create_session))
        .route("/api/sessions/:id", get(handlers::chat::get_session))
        .route(
            "/api/sessions/:id/transcript",
            get(handlers::chat::get_transcript),
        )
        .route(
            "/api/sessions/:id/messages",
            post(handlers::chat::post_message),
        )
        .route("/api/sessions/:id/slots", get(handlers::chat::get_slots))
        .route("/api/sessions/:id/select", post(handlers::chat::select_slot))
        .route("/api/sessions/:id/book", post(handlers::chat::book))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
