use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::notify::WebhookEvent;
use crate::routes::require;
use crate::state::AppState;
use crate::store::models::{Gang, GangMember, GangPatch, NewGang, NewNotification, NotificationKind};
use crate::store::{new_id, Store};

/// Rank given to everyone who joins with the password.
pub const JOIN_RANK: &str = "Member";

// --- Requests ---

#[derive(Deserialize)]
pub struct JoinRequest {
    pub username: String,
    pub password: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gangs", get(list_gangs).post(create_gang))
        .route(
            "/gangs/{id}",
            get(get_gang).patch(update_gang).delete(delete_gang),
        )
        .route("/gangs/{id}/join", post(join))
        .route("/gangs/{id}/members/{member_id}", delete(remove_member))
}

/// Join `gang_id`, leaving whatever gang `username` was in before.
///
/// Runs against a single locked store so no other request can observe the
/// user in two gangs. A rejected join leaves every roster untouched.
pub fn join_gang(store: &mut Store, gang_id: &str, username: &str, password: &str) -> AppResult<Gang> {
    let target = store.get_gang(gang_id).ok_or(AppError::NotFound("Gang"))?;
    if target.password != password {
        return Err(AppError::Unauthorized("Invalid password".into()));
    }
    if target.member_named(username).is_some() {
        return Err(AppError::BadRequest("Already a member of this gang".into()));
    }

    for gang in store.list_gangs() {
        if gang.id == gang_id {
            continue;
        }
        if let Some(previous) = gang.member_named(username) {
            tracing::info!(username, from = %gang.id, "Leaving previous gang");
            store.remove_gang_member(&gang.id, &previous.id);
        }
    }

    let member = GangMember {
        id: new_id(),
        username: username.to_string(),
        gang_id: gang_id.to_string(),
        rank: JOIN_RANK.to_string(),
        joined_at: store.now(),
        is_online: true,
    };
    store
        .add_gang_member(gang_id, member)
        .ok_or(AppError::NotFound("Gang"))
}

// --- Handlers ---

async fn list_gangs(State(state): State<AppState>) -> Json<Vec<Gang>> {
    let gangs = state.store.lock().await.list_gangs();
    Json(gangs)
}

async fn get_gang(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Gang>> {
    let gang = state
        .store
        .lock()
        .await
        .get_gang(&id)
        .ok_or(AppError::NotFound("Gang"))?;
    Ok(Json(gang))
}

async fn create_gang(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewGang>,
) -> AppResult<Response> {
    require(&[
        ("name", new.name.as_str()),
        ("owner", new.owner.as_str()),
        ("ownerName", new.owner_name.as_str()),
        ("password", new.password.as_str()),
        ("color", new.color.as_str()),
    ])?;

    let gang = {
        let mut store = state.store.lock().await;
        let gang = store.create_gang(new);
        store.create_notification(NewNotification {
            kind: NotificationKind::GangNew,
            title: format!("New Gang Created: {}", gang.name),
            description: format!("Gang created by {}. Owner: {}", gang.owner_name, gang.owner),
        });
        gang
    };

    tracing::info!(gang_id = %gang.id, name = %gang.name, "Gang created");
    state.notifier.notify(WebhookEvent::GangCreated {
        name: gang.name.clone(),
        owner: gang.owner.clone(),
        owner_name: gang.owner_name.clone(),
        color: gang.color.clone(),
    });

    Ok((StatusCode::CREATED, Json(gang)).into_response())
}

async fn update_gang(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<GangPatch>,
) -> AppResult<Json<Gang>> {
    let gang = state
        .store
        .lock()
        .await
        .update_gang(&id, patch)
        .ok_or(AppError::NotFound("Gang"))?;
    Ok(Json(gang))
}

async fn delete_gang(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_gang(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Gang"))
    }
}

async fn join(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<JoinRequest>,
) -> AppResult<Response> {
    require(&[("username", req.username.as_str())])?;

    let gang = {
        let mut store = state.store.lock().await;
        join_gang(&mut store, &id, &req.username, &req.password)?
    };
    tracing::info!(gang_id = %gang.id, username = %req.username, "Joined gang");

    Ok((StatusCode::CREATED, Json(gang)).into_response())
}

async fn remove_member(
    State(state): State<AppState>,
    Path((gang_id, member_id)): Path<(String, String)>,
) -> AppResult<Json<Gang>> {
    let gang = state
        .store
        .lock()
        .await
        .remove_gang_member(&gang_id, &member_id)
        .ok_or(AppError::NotFound("Gang"))?;
    Ok(Json(gang))
}
