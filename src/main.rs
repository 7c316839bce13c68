use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use community_hub::auth::DiscordProvider;
use community_hub::config::{Cli, Config};
use community_hub::notify::WebhookNotifier;
use community_hub::routes;
use community_hub::state::AppState;
use community_hub::store::clock::SystemClock;
use community_hub::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    tracing::info!("Data directory: {}", Config::data_dir(&cli).display());
    let config = Config::load(&cli)?;

    if config.discord.client_id.is_empty() || config.discord.guild_id.is_empty() {
        tracing::warn!("Discord OAuth is not configured; logins will fail");
    }

    // Build app state
    let state = AppState {
        store: Store::shared(Arc::new(SystemClock)),
        config: config.clone(),
        notifier: Arc::new(WebhookNotifier::new(config.webhooks.clone())),
        identity: Arc::new(DiscordProvider::new(config.discord.clone())),
    };

    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
