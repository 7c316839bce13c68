use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "community-hub", about = "Community server for tickets, gangs and giveaways")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding config.toml
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub discord: DiscordConfig,
    pub webhooks: WebhookConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared password for the staff panel login
    pub admin_password: String,
    /// External (Discord) ids granted staff access
    pub staff_user_ids: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub guild_id: String,
    pub api_base: String,
}

/// Outbound webhook targets. A missing URL disables that event kind.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WebhookConfig {
    pub gang_created: Option<String>,
    pub ticket_created: Option<String>,
    pub user_login: Option<String>,
    pub user_blocked: Option<String>,
    pub staff_mention: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

const DEFAULT_ADMIN_PASSWORD: &str = "abdzgoat0";

const DEFAULT_STAFF_USER_IDS: &[&str] = &[
    "1243269414900596787",
    "1418678840838062144",
    "970654818521722881",
    "944316456173199441",
    "1378750490707230802",
    "1383396153101652079",
    "1202626388646174723",
    "1338399359481679937",
];

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            staff_user_ids: DEFAULT_STAFF_USER_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            guild_id: String::new(),
            api_base: "https://discord.com/api".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| Self::data_dir(cli).join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".community-hub")
        })
    }
}
