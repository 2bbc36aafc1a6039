use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ChatMessage, Session};
use crate::services::conversation::{self, BookingIdentity};
use crate::state::AppState;

pub async fn chat_page() -> Html<&'static str> {
    Html(include_str!("../web/chat.html"))
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: String,
}

pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionCreated> {
    let id = uuid::Uuid::new_v4().to_string();
    state
        .sessions
        .lock()
        .unwrap()
        .insert(id.clone(), Session::new(&id));
    tracing::info!(session = %id, "session created");
    Json(SessionCreated { session_id: id })
}

#[derive(Serialize)]
pub struct SessionView {
    pub mode: String,
    pub selected_slot: Option<String>,
    pub slot_options: Vec<String>,
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let sessions = state.sessions.lock().unwrap();
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    Ok(Json(SessionView {
        mode: session.mode.as_str().to_string(),
        selected_slot: session.selected_slot.clone(),
        slot_options: session.slot_displays(),
    }))
}

pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let sessions = state.sessions.lock().unwrap();
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    Ok(Json(session.transcript.clone()))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slot_options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_triggered_by: Option<String>,
}

pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let turn = conversation::process_message(&state, &id, payload.message.trim()).await?;
    Ok(Json(ChatResponse {
        reply: turn.reply,
        mode: turn.mode.as_str().to_string(),
        slot_options: turn.slot_options,
        scheduling_triggered_by: turn.scheduling_triggered_by,
    }))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let options = conversation::ensure_slots(&state, &id).await?;
    Ok(Json(options))
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub slot: String,
}

#[derive(Serialize)]
pub struct SelectResponse {
    pub selected_slot: String,
}

pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    let selected = conversation::select_slot(&state, &id, payload.slot.trim())?;
    Ok(Json(SelectResponse {
        selected_slot: selected,
    }))
}

#[derive(Deserialize, Default)]
pub struct BookRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub async fn book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<BookRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let identity = BookingIdentity {
        name: payload.name,
        email: payload.email,
    };

    match conversation::book_appointment(&state, &id, identity).await? {
        Some(confirmation) => Ok(Json(serde_json::json!({
            "status": "confirmed",
            "confirmation": confirmation,
        }))),
        None => Ok(Json(serde_json::json!({ "status": "no_slot_selected" }))),
    }
}
