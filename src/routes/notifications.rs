use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::models::Notification;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
}

async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    let notifications = state.store.lock().await.list_notifications();
    Json(notifications)
}

async fn mark_read(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Notification>> {
    let notification = state
        .store
        .lock()
        .await
        .mark_notification_read(&id)
        .ok_or(AppError::NotFound("Notification"))?;
    Ok(Json(notification))
}
