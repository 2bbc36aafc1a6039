use std::sync::Arc;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{ChatMessage, Session, SessionMode};
use crate::services::ai::{intent, time};
use crate::services::calendar::BookingRequest;
use crate::services::scheduling;
use crate::state::{AppState, PromptVariant};

const SLOT_SELECTION_PROMPT: &str =
    "Please pick one of the available time slots to book your session.";

/// Identity attached to a booking. Absent fields fall back to the configured
/// placeholder values.
#[derive(Debug, Clone, Default)]
pub struct BookingIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// The outcome of one conversation turn, as surfaced to the caller.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub reply: String,
    pub mode: SessionMode,
    pub slot_options: Vec<String>,
    pub scheduling_triggered_by: Option<String>,
}

/// Drive one turn of the conversation state machine.
///
/// In `Chatting`: append the user message, generate a reply over the full
/// transcript, append it, then run two ordered intent checks — the user's
/// message first, the reply only if the first was negative. A positive check
/// switches the session into slot selection (the reply is still generated and
/// recorded first).
///
/// In `AwaitingSlotSelection`: the model is not called and the transcript is
/// left untouched; the cached slot choices are re-presented.
pub async fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    text: &str,
) -> Result<ChatTurn, AppError> {
    let (mode, transcript) = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        (session.mode.clone(), session.transcript.clone())
    };

    if mode == SessionMode::AwaitingSlotSelection {
        let slot_options = ensure_slots(state, session_id).await?;
        return Ok(ChatTurn {
            reply: SLOT_SELECTION_PROMPT.to_string(),
            mode,
            slot_options,
            scheduling_triggered_by: None,
        });
    }

    let mut messages = transcript;
    messages.push(ChatMessage::user(text));

    let reply = state
        .llm
        .chat(state.prompts.get(PromptVariant::General), &messages)
        .await?
        .trim()
        .to_string();

    // Two ordered, independently short-circuiting checks: the user's own
    // message first, then the assistant reply.
    let triggering_message = if intent::detect_scheduling_intent(state.llm.as_ref(), text).await? {
        Some(text.to_string())
    } else if intent::detect_scheduling_intent(state.llm.as_ref(), &reply).await? {
        Some(reply.clone())
    } else {
        None
    };

    let slot_options = if triggering_message.is_some() {
        ensure_slots(state, session_id).await?
    } else {
        vec![]
    };

    let mode = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;

        session.transcript.push(ChatMessage::user(text));
        session.transcript.push(ChatMessage::assistant(&reply));
        if let Some(trigger) = &triggering_message {
            session.mode = SessionMode::AwaitingSlotSelection;
            session.triggering_message = Some(trigger.clone());
        }
        session.last_activity = Utc::now().naive_utc();
        session.mode.clone()
    };

    tracing::info!(
        session = session_id,
        mode = mode.as_str(),
        triggered = triggering_message.is_some(),
        "processed turn"
    );

    Ok(ChatTurn {
        reply,
        mode,
        slot_options,
        scheduling_triggered_by: triggering_message,
    })
}

/// Return the session's slot choices, fetching the next-7-days window on
/// first use. Fetched once per session; staleness is accepted.
pub async fn ensure_slots(
    state: &Arc<AppState>,
    session_id: &str,
) -> Result<Vec<String>, AppError> {
    let cached = {
        let sessions = state.sessions.lock().unwrap();
        let session = sessions
            .get(session_id)
            .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
        session.slots.is_some().then(|| session.slot_displays())
    };
    if let Some(displays) = cached {
        return Ok(displays);
    }

    let today = Utc::now().date_naive();
    let options = scheduling::list_slots_for_next_days(state.calendar.as_ref(), today, 7).await;

    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions
        .get_mut(session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
    session.slots = Some(options);
    Ok(session.slot_displays())
}

/// Record the user's slot choice. The choice must resolve against the cached
/// options: an exact display-label match, or failing that a clock time pulled
/// out of the free text and matched against an option's start time.
pub fn select_slot(
    state: &Arc<AppState>,
    session_id: &str,
    choice: &str,
) -> Result<String, AppError> {
    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions
        .get_mut(session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;

    if session.mode != SessionMode::AwaitingSlotSelection {
        return Err(AppError::InvalidSlot(
            "no slot selection in progress".to_string(),
        ));
    }

    let options = session.slots.clone().unwrap_or_default();
    let resolved = options
        .iter()
        .find(|o| o.display == choice)
        .or_else(|| {
            time::extract_time(choice)
                .and_then(|t| options.iter().find(|o| o.time_range.starts_with(&t)))
        })
        .map(|o| o.display.clone())
        .ok_or_else(|| AppError::InvalidSlot(format!("unknown slot: {choice}")))?;

    session.selected_slot = Some(resolved.clone());
    session.last_activity = Utc::now().naive_utc();
    Ok(resolved)
}

/// Book the selected slot, if any.
///
/// With no selection this is a no-op making zero network calls. The selection
/// is cleared before the booking call, so it is gone whether the call succeeds
/// or fails; a failed booking leaves the session in slot-selection mode so the
/// user can pick again.
pub async fn book_appointment(
    state: &Arc<AppState>,
    session_id: &str,
    identity: BookingIdentity,
) -> Result<Option<serde_json::Value>, AppError> {
    let label = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
        session.selected_slot.take()
    };

    let Some(label) = label else {
        return Ok(None);
    };

    let (slot_date, slot_start_time) = scheduling::parse_slot_label(&label)?;

    let request = BookingRequest {
        name: identity
            .name
            .unwrap_or_else(|| state.config.default_booking_name.clone()),
        email: identity
            .email
            .unwrap_or_else(|| state.config.default_booking_email.clone()),
        slot_date,
        slot_start_time,
        form_responses: None,
    };

    let confirmation = state.calendar.create_booking(&request).await?;

    tracing::info!(session = session_id, slot = %label, "booking confirmed");
    Ok(Some(confirmation))
}
