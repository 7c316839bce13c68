use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::notify::WebhookEvent;
use crate::routes::require;
use crate::state::AppState;
use crate::store::models::{User, UserPatch};

// --- Requests ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
}

// --- Router ---

// GET looks up by external id; PATCH and DELETE address the record id.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route(
            "/users/{id}",
            get(get_by_user_id).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/block", post(block_user))
        .route("/users/{id}/unblock", post(unblock_user))
}

// --- Handlers ---

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.store.lock().await.list_users();
    Json(users)
}

async fn get_by_user_id(State(state): State<AppState>, Path(user_id): Path<String>) -> AppResult<Json<User>> {
    let user = state
        .store
        .lock()
        .await
        .get_user_by_user_id(&user_id)
        .ok_or(AppError::NotFound("User"))?;
    Ok(Json(user))
}

/// Idempotent registration: an existing record comes back as 200.
async fn register_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AppResult<Response> {
    require(&[("userId", req.user_id.as_str())])?;

    let mut store = state.store.lock().await;
    if let Some(existing) = store.get_user_by_user_id(&req.user_id) {
        return Ok(Json(existing).into_response());
    }
    let user = store.create_user(&req.user_id);
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .lock()
        .await
        .update_user(&id, patch)
        .ok_or(AppError::NotFound("User"))?;
    Ok(Json(user))
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_user(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("User"))
    }
}

async fn block_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<User>> {
    let user = state
        .store
        .lock()
        .await
        .block_user(&id)
        .ok_or(AppError::NotFound("User"))?;

    tracing::info!(user_id = %user.user_id, "User blocked");
    state.notifier.notify(WebhookEvent::UserBlocked {
        user_id: user.user_id.clone(),
        blocked_by: "Staff".to_string(),
    });

    Ok(Json(user))
}

async fn unblock_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<User>> {
    let user = state
        .store
        .lock()
        .await
        .unblock_user(&id)
        .ok_or(AppError::NotFound("User"))?;
    tracing::info!(user_id = %user.user_id, "User unblocked");
    Ok(Json(user))
}
