use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::config::WebhookConfig;
use crate::notify::{Notifier, WebhookEvent};

const TICKET_COLOR: u32 = 0xFF6B6B;
const LOGIN_COLOR: u32 = 0x5865F2;
const BLOCKED_COLOR: u32 = 0xFF0000;
const MAX_MESSAGE_CHARS: usize = 1000;

/// Posts Discord-style embeds to the configured webhook URLs.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url_for(&self, event: &WebhookEvent) -> Option<&str> {
        let url = match event {
            WebhookEvent::GangCreated { .. } => &self.config.gang_created,
            WebhookEvent::TicketCreated { .. } => &self.config.ticket_created,
            WebhookEvent::UserLogin { .. } => &self.config.user_login,
            WebhookEvent::UserBlocked { .. } => &self.config.user_blocked,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, event: WebhookEvent) {
        let kind = event.kind();
        let Some(url) = self.url_for(&event).map(str::to_string) else {
            tracing::debug!(kind, "No webhook configured, skipping");
            return;
        };

        let body = payload(&event, self.config.staff_mention.as_deref(), Utc::now());
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(kind, status = %response.status(), "Webhook rejected");
                }
                Ok(_) => tracing::debug!(kind, "Webhook delivered"),
                Err(e) => tracing::warn!(kind, "Failed to send webhook: {}", e),
            }
        });
    }
}

/// `#RRGGBB` to an embed color; anything unparseable is 0.
fn parse_color(color: &str) -> u32 {
    u32::from_str_radix(color.trim_start_matches('#'), 16).unwrap_or(0)
}

fn field(name: &str, value: &str, inline: bool) -> Value {
    json!({ "name": name, "value": value, "inline": inline })
}

/// Build the JSON body posted for `event`.
pub fn payload(event: &WebhookEvent, staff_mention: Option<&str>, at: DateTime<Utc>) -> Value {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let (title, color, fields, mention_staff) = match event {
        WebhookEvent::GangCreated {
            name,
            owner,
            owner_name,
            color,
        } => (
            "🏴 New Gang Created",
            parse_color(color),
            vec![
                field("Gang Name", name, true),
                field("Owner", owner_name, true),
                field("Owner ID", owner, true),
                field("Color", color, true),
            ],
            false,
        ),
        WebhookEvent::TicketCreated {
            ticket_number,
            subject,
            message,
            user_id,
        } => {
            let excerpt: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
            (
                "🎫 New Support Ticket",
                TICKET_COLOR,
                vec![
                    field("Ticket Number", &format!("#{}", ticket_number), true),
                    field("Created By", user_id, true),
                    field("Subject", subject, false),
                    field("Message", &excerpt, false),
                ],
                true,
            )
        }
        WebhookEvent::UserLogin {
            username,
            user_id,
            is_staff,
        } => (
            "✅ User Logged In",
            LOGIN_COLOR,
            vec![
                field("Username", username, true),
                field("User ID", user_id, true),
                field("Staff Access", if *is_staff { "Yes" } else { "No" }, true),
            ],
            false,
        ),
        WebhookEvent::UserBlocked {
            user_id,
            blocked_by,
        } => (
            "🔒 User Blocked",
            BLOCKED_COLOR,
            vec![
                field("User ID", user_id, true),
                field("Blocked By", blocked_by, true),
            ],
            true,
        ),
    };

    let mut body = json!({
        "embeds": [{
            "title": title,
            "color": color,
            "fields": fields,
            "timestamp": timestamp,
        }]
    });
    if mention_staff {
        if let Some(mention) = staff_mention {
            body["content"] = json!(mention);
        }
    }
    body
}
