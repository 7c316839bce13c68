//! Discord OAuth2 login: code exchange, profile lookup and guild check.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::DiscordConfig;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider answered but refused the request.
    #[error("{0}")]
    Rejected(String),

    #[error("Identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected(msg) => AppError::BadRequest(msg),
            IdentityError::Transport(e) => AppError::Upstream(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordProfile {
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    pub discriminator: Option<String>,
    pub global_name: Option<String>,
}

impl DiscordProfile {
    /// `name#1234` for legacy accounts, otherwise the global display name,
    /// otherwise the bare username.
    pub fn display_name(&self) -> String {
        match self.discriminator.as_deref() {
            Some(disc) if !disc.is_empty() && disc != "0" => format!("{}#{}", self.username, disc),
            _ => self
                .global_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.username.clone()),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Trade an authorization code for an access token.
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, IdentityError>;

    async fn fetch_profile(&self, access_token: &str) -> Result<DiscordProfile, IdentityError>;

    async fn is_guild_member(&self, access_token: &str) -> Result<bool, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Clone)]
pub struct DiscordProvider {
    client: reqwest::Client,
    config: DiscordConfig,
}

impl DiscordProvider {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl IdentityProvider for DiscordProvider {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, IdentityError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let token: TokenResponse = self
            .client
            .post(self.url("/oauth2/token"))
            .form(&params)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = token.error {
            let detail = token.error_description.unwrap_or(error);
            return Err(IdentityError::Rejected(format!(
                "Discord OAuth error: {}",
                detail
            )));
        }

        token.access_token.ok_or_else(|| {
            IdentityError::Rejected("Discord OAuth error: no access token returned".to_string())
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<DiscordProfile, IdentityError> {
        let profile = self
            .client
            .get(self.url("/users/@me"))
            .bearer_auth(access_token)
            .send()
            .await?
            .json()
            .await?;
        Ok(profile)
    }

    async fn is_guild_member(&self, access_token: &str) -> Result<bool, IdentityError> {
        let path = format!("/users/@me/guilds/{}/member", self.config.guild_id);
        let response = self
            .client
            .get(self.url(&path))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Guild membership lookup refused");
        }
        Ok(response.status().is_success())
    }
}
