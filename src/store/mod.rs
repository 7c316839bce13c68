//! In-memory entity store.
//!
//! The store is the single owner of all domain state. Every operation is a
//! synchronous method on `&self`/`&mut self`; callers reach it through
//! [`SharedStore`] and must not hold the lock across an `.await`.
//! Lookups for unknown ids return `None`/`false` rather than errors.

pub mod clock;
pub mod content;
pub mod gangs;
pub mod giveaways;
pub mod models;
pub mod notifications;
pub mod tickets;
pub mod users;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::clock::Clock;
use crate::store::models::*;

pub type SharedStore = Arc<Mutex<Store>>;

/// Anything kept in a [`Collection`].
pub trait Entity: Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> i64;
}

struct Slot<T> {
    seq: u64,
    value: T,
}

/// Id-keyed map that remembers insertion order, so equal timestamps still
/// list deterministically.
pub struct Collection<T> {
    items: HashMap<String, Slot<T>>,
    next_seq: u64,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> T {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.insert(
            value.id().to_string(),
            Slot {
                seq,
                value: value.clone(),
            },
        );
        value
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id).map(|slot| &mut slot.value)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.items.remove(id).is_some()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|_, slot| keep(&slot.value));
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values().map(|slot| &slot.value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recent first; ties go to the later insertion.
    pub fn newest_first(&self) -> Vec<T> {
        let mut slots: Vec<&Slot<T>> = self.items.values().collect();
        slots.sort_by(|a, b| {
            b.value
                .created_at()
                .cmp(&a.value.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        slots.into_iter().map(|slot| slot.value.clone()).collect()
    }

    /// Chronological order over the entries matching `filter`.
    pub fn oldest_first_where(&self, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let mut slots: Vec<&Slot<T>> = self
            .items
            .values()
            .filter(|slot| filter(&slot.value))
            .collect();
        slots.sort_by(|a, b| {
            a.value
                .created_at()
                .cmp(&b.value.created_at())
                .then(a.seq.cmp(&b.seq))
        });
        slots.into_iter().map(|slot| slot.value.clone()).collect()
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! entity {
    ($ty:ty, $created:ident) => {
        impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> i64 {
                self.$created
            }
        }
    };
}

entity!(Ticket, created_at);
entity!(Message, timestamp);
entity!(Gang, created_at);
entity!(Giveaway, created_at);
entity!(Announcement, created_at);
entity!(ShopProduct, created_at);
entity!(Notification, created_at);
entity!(User, created_at);
entity!(Note, created_at);

pub struct Store {
    clock: Arc<dyn Clock>,
    tickets: Collection<Ticket>,
    messages: Collection<Message>,
    gangs: Collection<Gang>,
    giveaways: Collection<Giveaway>,
    announcements: Collection<Announcement>,
    shop_products: Collection<ShopProduct>,
    notifications: Collection<Notification>,
    users: Collection<User>,
    notes: Collection<Note>,
    ai_enabled: bool,
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tickets: Collection::new(),
            messages: Collection::new(),
            gangs: Collection::new(),
            giveaways: Collection::new(),
            announcements: Collection::new(),
            shop_products: Collection::new(),
            notifications: Collection::new(),
            users: Collection::new(),
            notes: Collection::new(),
            ai_enabled: true,
        }
    }

    pub fn shared(clock: Arc<dyn Clock>) -> SharedStore {
        Arc::new(Mutex::new(Self::new(clock)))
    }

    /// Current time in epoch milliseconds.
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.ai_enabled = enabled;
    }

    /// Empty every collection. The auto-reply toggle is a setting, not data,
    /// and survives.
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.messages.clear();
        self.gangs.clear();
        self.giveaways.clear();
        self.announcements.clear();
        self.shop_products.clear();
        self.notifications.clear();
        self.users.clear();
        self.notes.clear();
        tracing::info!("Store cleared");
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::store::clock::ManualClock;

    /// A store on a manual clock starting at `start` ms.
    pub fn store_at(start: i64) -> (Store, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_millis(start));
        (Store::new(clock.clone()), clock)
    }

    pub fn store() -> (Store, Arc<ManualClock>) {
        store_at(1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::store;
    use super::*;
    use chrono::Duration;

    fn note(id: &str, created_at: i64) -> Note {
        Note {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            created_at,
            created_by: String::new(),
        }
    }

    #[test]
    fn newest_first_orders_by_created_at_then_insertion() {
        let mut notes = Collection::new();
        notes.insert(note("a", 10));
        notes.insert(note("b", 30));
        notes.insert(note("c", 20));
        notes.insert(note("d", 30));

        let ids: Vec<String> = notes.newest_first().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn oldest_first_where_filters_and_orders() {
        let mut notes = Collection::new();
        notes.insert(note("a", 30));
        notes.insert(note("b", 10));
        notes.insert(note("skip", 5));
        notes.insert(note("c", 10));

        let ids: Vec<String> = notes
            .oldest_first_where(|n| n.id != "skip")
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn remove_reports_existence() {
        let mut notes = Collection::new();
        notes.insert(note("a", 1));
        assert!(notes.remove("a"));
        assert!(!notes.remove("a"));
        assert!(notes.is_empty());
    }

    #[test]
    fn clear_empties_every_collection_but_keeps_ai_setting() {
        let (mut store, clock) = store();
        store.set_ai_enabled(false);
        let ticket = store.create_ticket(NewTicket {
            subject: "s".into(),
            message: "m".into(),
            user_id: "u".into(),
        });
        store.create_message(NewMessage {
            ticket_id: ticket.id.clone(),
            content: "hi".into(),
            sender: Sender::User,
        });
        clock.advance(Duration::seconds(1));
        store.create_gang(NewGang {
            name: "Reds".into(),
            owner: "u1".into(),
            owner_name: "Bob".into(),
            password: "pw".into(),
            color: "#FF0000".into(),
        });
        store.create_user("123");

        store.clear();

        assert!(store.list_tickets().is_empty());
        assert!(store.list_messages(&ticket.id).is_empty());
        assert!(store.list_gangs().is_empty());
        assert!(store.list_users().is_empty());
        assert!(!store.ai_enabled());
    }

    #[test]
    fn ids_are_unique_uuids() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
