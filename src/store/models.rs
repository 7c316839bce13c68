use serde::{Deserialize, Serialize};

// -- Tickets --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Claimed,
    Closed,
}

impl TicketStatus {
    /// `open -> claimed -> closed`, with `open -> closed` as a shortcut.
    /// Re-asserting the current status is always allowed.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        use TicketStatus::*;
        self == next || matches!((self, next), (Open, Claimed) | (Open, Closed) | (Claimed, Closed))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Claimed => "claimed",
            TicketStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub ticket_number: String,
    pub subject: String,
    pub message: String,
    pub user_id: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<TicketStatus>,
    pub claimed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub ticket_id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub ticket_id: String,
    pub content: String,
    pub sender: Sender,
}

// -- Gangs --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GangRank {
    pub id: String,
    pub name: String,
    pub gang_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GangMember {
    pub id: String,
    pub username: String,
    pub gang_id: String,
    pub rank: String,
    pub joined_at: i64,
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gang {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub owner_name: String,
    pub password: String,
    pub color: String,
    pub members: Vec<GangMember>,
    pub ranks: Vec<GangRank>,
    pub created_at: i64,
}

impl Gang {
    pub fn member_named(&self, username: &str) -> Option<&GangMember> {
        self.members.iter().find(|m| m.username == username)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGang {
    pub name: String,
    pub owner: String,
    pub owner_name: String,
    pub password: String,
    pub color: String,
}

/// Roster fields are deliberately absent: members only change through
/// the membership operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GangPatch {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub owner_name: Option<String>,
    pub password: Option<String>,
    pub color: Option<String>,
}

// -- Giveaways --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiveawayStatus {
    Active,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giveaway {
    pub id: String,
    pub price: f64,
    pub duration: String,
    pub description: String,
    pub created_at: i64,
    pub ends_at: i64,
    pub winners_count: u32,
    pub winners: Vec<String>,
    pub participants: Vec<String>,
    pub status: GiveawayStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGiveaway {
    pub price: f64,
    pub duration: String,
    #[serde(default)]
    pub description: String,
    pub winners_count: u32,
}

// -- Announcements --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub user: String,
    pub description: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub user: String,
    pub description: String,
}

// -- Shop --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopCategory {
    Turfs,
    Spawners,
    Cosmetics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProduct {
    pub id: String,
    pub name: String,
    pub link: String,
    pub price: f64,
    pub category: ShopCategory,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShopProduct {
    pub name: String,
    pub link: String,
    pub price: f64,
    pub category: ShopCategory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopProductPatch {
    pub name: Option<String>,
    pub link: Option<String>,
    pub price: Option<f64>,
    pub category: Option<ShopCategory>,
}

// -- Notifications --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TicketNew,
    GangNew,
    GiveawayNew,
    AnnouncementNew,
    ShopProductNew,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub read: bool,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

// -- Users --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// External identity (Discord id)
    pub user_id: String,
    pub is_blocked: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub user_id: Option<String>,
}

// -- Notes --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub created_by: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticket_status_transitions() {
        use TicketStatus::*;
        assert!(Open.can_transition_to(Claimed));
        assert!(Open.can_transition_to(Closed));
        assert!(Claimed.can_transition_to(Closed));
        assert!(Closed.can_transition_to(Closed));

        assert!(!Claimed.can_transition_to(Open));
        assert!(!Closed.can_transition_to(Open));
        assert!(!Closed.can_transition_to(Claimed));
    }

    #[test]
    fn ticket_serializes_camel_case_without_absent_claimer() {
        let ticket = Ticket {
            id: "t1".into(),
            ticket_number: "12345".into(),
            subject: "Help".into(),
            message: "Stuck".into(),
            user_id: "123".into(),
            status: TicketStatus::Open,
            claimed_by: None,
            created_at: 1,
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["ticketNumber"], "12345");
        assert_eq!(value["userId"], "123");
        assert_eq!(value["status"], "open");
        assert!(value.get("claimedBy").is_none());
    }

    #[test]
    fn notification_kind_serializes_under_type() {
        let notification = Notification {
            id: "n1".into(),
            kind: NotificationKind::TicketNew,
            title: "t".into(),
            description: "d".into(),
            created_at: 0,
            read: false,
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "ticket_new");
    }

    #[test]
    fn shop_category_rejects_unknown_values() {
        let ok: Result<NewShopProduct, _> = serde_json::from_value(json!({
            "name": "Turf A", "link": "https://x", "price": 10, "category": "Turfs"
        }));
        assert!(ok.is_ok());

        let bad: Result<NewShopProduct, _> = serde_json::from_value(json!({
            "name": "Turf A", "link": "https://x", "price": 10, "category": "Cars"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn gang_patch_ignores_roster_fields() {
        let patch: GangPatch = serde_json::from_value(json!({
            "name": "Blues",
            "members": [{"id": "m"}]
        }))
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Blues"));
        assert!(patch.color.is_none());
    }
}
