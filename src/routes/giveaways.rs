use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::routes::require;
use crate::state::AppState;
use crate::store::models::{Giveaway, GiveawayStatus, NewGiveaway, NewNotification, NotificationKind};
use crate::store::Store;

// --- Requests ---

#[derive(Deserialize)]
pub struct ParticipantRequest {
    pub username: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/giveaways", get(list_giveaways).post(create_giveaway))
        .route("/giveaways/{id}", get(get_giveaway).delete(delete_giveaway))
        .route("/giveaways/{id}/end", post(end_giveaway))
        .route("/giveaways/{id}/join", post(join_giveaway))
        .route("/giveaways/{id}/leave", post(leave_giveaway))
}

/// Participation changes are only accepted while the giveaway runs.
fn ensure_active(store: &Store, id: &str) -> AppResult<()> {
    let giveaway = store.get_giveaway(id).ok_or(AppError::NotFound("Giveaway"))?;
    if giveaway.status == GiveawayStatus::Ended {
        return Err(AppError::BadRequest("Giveaway has ended".into()));
    }
    Ok(())
}

// --- Handlers ---

async fn list_giveaways(State(state): State<AppState>) -> Json<Vec<Giveaway>> {
    let giveaways = {
        let mut store = state.store.lock().await;
        let ended = store.expire_due();
        if !ended.is_empty() {
            tracing::info!(count = ended.len(), "Expired giveaways ended");
        }
        store.list_giveaways()
    };
    Json(giveaways)
}

async fn get_giveaway(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Giveaway>> {
    let giveaway = state
        .store
        .lock()
        .await
        .get_giveaway(&id)
        .ok_or(AppError::NotFound("Giveaway"))?;
    Ok(Json(giveaway))
}

async fn create_giveaway(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewGiveaway>,
) -> AppResult<Response> {
    require(&[("duration", new.duration.as_str())])?;
    if !new.price.is_finite() {
        return Err(AppError::BadRequest("price must be a number".into()));
    }

    let giveaway = {
        let mut store = state.store.lock().await;
        let giveaway = store.create_giveaway(new);
        let description = if giveaway.description.is_empty() {
            "A new giveaway has been created!".to_string()
        } else {
            giveaway.description.clone()
        };
        store.create_notification(NewNotification {
            kind: NotificationKind::GiveawayNew,
            title: format!("New Giveaway: {}", giveaway.price),
            description,
        });
        giveaway
    };
    tracing::info!(giveaway_id = %giveaway.id, ends_at = giveaway.ends_at, "Giveaway created");

    Ok((StatusCode::CREATED, Json(giveaway)).into_response())
}

async fn end_giveaway(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Giveaway>> {
    let giveaway = state
        .store
        .lock()
        .await
        .end_giveaway(&id)
        .ok_or(AppError::NotFound("Giveaway"))?;
    Ok(Json(giveaway))
}

async fn join_giveaway(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ParticipantRequest>,
) -> AppResult<Json<Giveaway>> {
    require(&[("username", req.username.as_str())])?;

    let mut store = state.store.lock().await;
    ensure_active(&store, &id)?;
    let giveaway = store
        .join_giveaway(&id, &req.username)
        .ok_or(AppError::NotFound("Giveaway"))?;
    Ok(Json(giveaway))
}

async fn leave_giveaway(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ParticipantRequest>,
) -> AppResult<Json<Giveaway>> {
    require(&[("username", req.username.as_str())])?;

    let mut store = state.store.lock().await;
    ensure_active(&store, &id)?;
    let giveaway = store
        .leave_giveaway(&id, &req.username)
        .ok_or(AppError::NotFound("Giveaway"))?;
    Ok(Json(giveaway))
}

async fn delete_giveaway(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_giveaway(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Giveaway"))
    }
}
