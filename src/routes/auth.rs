use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{is_staff, verify_admin_password};
use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::notify::WebhookEvent;
use crate::state::AppState;

const NOT_IN_GUILD: &str =
    "You must be a member of the community Discord server to access this site.";

// --- Requests ---

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStaffRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLoginRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub redirect_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLoginResponse {
    pub username: String,
    pub token: String,
    pub is_staff: bool,
    pub user_id: String,
    pub discord_id: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/admin", post(admin_login))
        .route("/verify-staff", post(verify_staff))
        .route("/discord/auth", post(discord_login))
}

// --- Handlers ---

async fn admin_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AdminLoginRequest>,
) -> AppResult<Json<Value>> {
    if verify_admin_password(&state.config.auth, &req.password) {
        tracing::info!("Staff panel login");
        Ok(Json(json!({ "success": true })))
    } else {
        tracing::warn!("Rejected staff panel login");
        Err(AppError::Unauthorized("Invalid password".into()))
    }
}

async fn verify_staff(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VerifyStaffRequest>,
) -> AppResult<Json<Value>> {
    if req.user_id.is_empty() {
        return Err(AppError::BadRequest("User ID is required".into()));
    }
    let staff = is_staff(&state.config.auth, &req.user_id);
    Ok(Json(json!({ "isStaff": staff })))
}

/// OAuth code login. The guild check gates access; staff status only
/// decides what the UI offers.
async fn discord_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DiscordLoginRequest>,
) -> AppResult<Json<DiscordLoginResponse>> {
    if req.code.is_empty() {
        return Err(AppError::BadRequest("Authorization code is required".into()));
    }

    let token = state
        .identity
        .exchange_code(&req.code, &req.redirect_uri)
        .await?;

    let profile = state.identity.fetch_profile(&token).await?;
    let Some(discord_id) = profile.id.clone().filter(|id| !id.is_empty()) else {
        return Err(AppError::BadRequest(
            "Failed to get Discord user information".into(),
        ));
    };
    let username = profile.display_name();

    if !state.identity.is_guild_member(&token).await? {
        tracing::info!(discord_id = %discord_id, "Login refused, not a guild member");
        return Err(AppError::Forbidden(NOT_IN_GUILD.into()));
    }

    let staff = is_staff(&state.config.auth, &discord_id);
    tracing::info!(discord_id = %discord_id, staff, "Discord login");
    state.notifier.notify(WebhookEvent::UserLogin {
        username: username.clone(),
        user_id: discord_id.clone(),
        is_staff: staff,
    });

    Ok(Json(DiscordLoginResponse {
        username,
        token,
        is_staff: staff,
        user_id: discord_id.clone(),
        discord_id,
    }))
}
