pub mod discord;

pub use discord::{DiscordProfile, DiscordProvider, IdentityError, IdentityProvider};

use crate::config::AuthConfig;

/// Staff access is a static allow-list of external (Discord) ids.
pub fn is_staff(config: &AuthConfig, user_id: &str) -> bool {
    config.staff_user_ids.iter().any(|id| id == user_id)
}

/// Exact-match check for the shared staff panel password.
pub fn verify_admin_password(config: &AuthConfig, password: &str) -> bool {
    !config.admin_password.is_empty() && config.admin_password == password
}
