//! Outbound notifications for events staff should hear about.
//!
//! Handlers call [`Notifier::notify`] after the store lock is released and
//! never wait on delivery.

pub mod webhook;

use std::sync::Mutex;

pub use webhook::WebhookNotifier;

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    GangCreated {
        name: String,
        owner: String,
        owner_name: String,
        color: String,
    },
    TicketCreated {
        ticket_number: String,
        subject: String,
        message: String,
        user_id: String,
    },
    UserLogin {
        username: String,
        user_id: String,
        is_staff: bool,
    },
    UserBlocked {
        user_id: String,
        blocked_by: String,
    },
}

impl WebhookEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookEvent::GangCreated { .. } => "gang_created",
            WebhookEvent::TicketCreated { .. } => "ticket_created",
            WebhookEvent::UserLogin { .. } => "user_login",
            WebhookEvent::UserBlocked { .. } => "user_blocked",
        }
    }
}

/// Fire-and-forget sink for [`WebhookEvent`]s.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: WebhookEvent);
}

/// Keeps every event in memory. Used to assert on side effects.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<WebhookEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WebhookEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: WebhookEvent) {
        tracing::debug!(kind = event.kind(), "Recorded webhook event");
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(WebhookEvent::UserBlocked {
            user_id: "1".into(),
            blocked_by: "Staff".into(),
        });
        notifier.notify(WebhookEvent::UserLogin {
            username: "bob".into(),
            user_id: "2".into(),
            is_staff: false,
        });

        let kinds: Vec<&str> = notifier.events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["user_blocked", "user_login"]);
    }
}
