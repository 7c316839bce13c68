use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/reset", post(reset))
}

/// Wipe every collection. Settings such as the auto-reply toggle stay.
async fn reset(State(state): State<AppState>) -> Json<Value> {
    state.store.lock().await.clear();
    tracing::warn!("All data cleared by reset");
    Json(json!({ "success": true, "message": "All data cleared" }))
}
