use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::autoreply;
use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::notify::WebhookEvent;
use crate::routes::{excerpt, require};
use crate::state::AppState;
use crate::store::models::{
    Message, NewMessage, NewNotification, NewTicket, NotificationKind, Sender, Ticket, TicketPatch,
    TicketStatus,
};

/// Posted into every new ticket on behalf of staff.
pub const SUPPORTER_GREETING: &str = "A supporter is coming to you in a short amount of time!";

// --- Requests ---

#[derive(Deserialize)]
pub struct CreateMessageRequest {
    pub content: String,
    pub sender: Sender,
}

#[derive(Deserialize, Serialize)]
pub struct AiSettings {
    pub enabled: bool,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/{id}",
            get(get_ticket).patch(update_ticket).delete(delete_ticket),
        )
        .route(
            "/tickets/{id}/messages",
            get(list_messages).post(create_message),
        )
        .route("/tickets/{id}/ai-response", post(ai_response))
        .route("/ai-settings", get(get_ai_settings).put(set_ai_settings))
}

// --- Handlers ---

async fn list_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    let tickets = state.store.lock().await.list_tickets();
    Json(tickets)
}

async fn get_ticket(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Ticket>> {
    let ticket = state
        .store
        .lock()
        .await
        .get_ticket(&id)
        .ok_or(AppError::NotFound("Ticket"))?;
    Ok(Json(ticket))
}

async fn create_ticket(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewTicket>,
) -> AppResult<Response> {
    require(&[
        ("subject", new.subject.as_str()),
        ("message", new.message.as_str()),
        ("userId", new.user_id.as_str()),
    ])?;

    let ticket = {
        let mut store = state.store.lock().await;
        let ticket = store.create_ticket(new);
        store.create_message(NewMessage {
            ticket_id: ticket.id.clone(),
            content: SUPPORTER_GREETING.to_string(),
            sender: Sender::Staff,
        });
        store.create_notification(NewNotification {
            kind: NotificationKind::TicketNew,
            title: format!("New Ticket: {}", ticket.subject),
            description: excerpt(&ticket.message, 100),
        });
        ticket
    };

    tracing::info!(
        ticket_id = %ticket.id,
        ticket_number = %ticket.ticket_number,
        "Ticket created"
    );
    state.notifier.notify(WebhookEvent::TicketCreated {
        ticket_number: ticket.ticket_number.clone(),
        subject: ticket.subject.clone(),
        message: ticket.message.clone(),
        user_id: ticket.user_id.clone(),
    });

    Ok((StatusCode::CREATED, Json(ticket)).into_response())
}

async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<TicketPatch>,
) -> AppResult<Json<Ticket>> {
    let mut store = state.store.lock().await;
    let current = store.get_ticket(&id).ok_or(AppError::NotFound("Ticket"))?;

    if let Some(next) = patch.status {
        if !current.status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "Cannot change ticket status from {} to {}",
                current.status.as_str(),
                next.as_str()
            )));
        }
    }

    let ticket = store
        .update_ticket(&id, patch)
        .ok_or(AppError::NotFound("Ticket"))?;
    Ok(Json(ticket))
}

async fn delete_ticket(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_ticket(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Ticket"))
    }
}

async fn list_messages(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Message>> {
    let messages = state.store.lock().await.list_messages(&id);
    Json(messages)
}

async fn create_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CreateMessageRequest>,
) -> AppResult<Response> {
    let mut store = state.store.lock().await;
    let ticket = store.get_ticket(&id).ok_or(AppError::NotFound("Ticket"))?;

    require(&[("content", req.content.as_str())])?;
    if req.sender == Sender::User && ticket.status == TicketStatus::Closed {
        return Err(AppError::BadRequest("Ticket is closed".into()));
    }

    let message = store.create_message(NewMessage {
        ticket_id: id,
        content: req.content,
        sender: req.sender,
    });
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

/// Answer the latest user message (or the ticket's opening text) with a
/// canned staff reply.
async fn ai_response(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Message>> {
    let mut store = state.store.lock().await;
    let ticket = store.get_ticket(&id).ok_or(AppError::NotFound("Ticket"))?;

    if !store.ai_enabled() {
        return Err(AppError::BadRequest("Auto-replies are disabled".into()));
    }

    let prompt = store
        .list_messages(&id)
        .into_iter()
        .rev()
        .find(|m| m.sender == Sender::User)
        .map(|m| m.content)
        .unwrap_or(ticket.message);

    let message = store.create_message(NewMessage {
        ticket_id: id,
        content: autoreply::reply_to(&prompt).to_string(),
        sender: Sender::Staff,
    });
    Ok(Json(message))
}

async fn get_ai_settings(State(state): State<AppState>) -> Json<AiSettings> {
    let enabled = state.store.lock().await.ai_enabled();
    Json(AiSettings { enabled })
}

async fn set_ai_settings(
    State(state): State<AppState>,
    ApiJson(settings): ApiJson<AiSettings>,
) -> Json<AiSettings> {
    state.store.lock().await.set_ai_enabled(settings.enabled);
    tracing::info!(enabled = settings.enabled, "Auto-reply setting changed");
    Json(settings)
}
