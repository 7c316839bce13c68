use rand::Rng;

use crate::store::models::{Message, NewMessage, NewTicket, Ticket, TicketPatch, TicketStatus};
use crate::store::{new_id, Store};

impl Store {
    pub fn list_tickets(&self) -> Vec<Ticket> {
        self.tickets.newest_first()
    }

    pub fn get_ticket(&self, id: &str) -> Option<Ticket> {
        self.tickets.get(id).cloned()
    }

    /// New tickets always start `open` with a fresh 5-digit number.
    pub fn create_ticket(&mut self, new: NewTicket) -> Ticket {
        let ticket = Ticket {
            id: new_id(),
            ticket_number: generate_ticket_number(),
            subject: new.subject,
            message: new.message,
            user_id: new.user_id,
            status: TicketStatus::Open,
            claimed_by: None,
            created_at: self.now(),
        };
        self.tickets.insert(ticket)
    }

    pub fn update_ticket(&mut self, id: &str, patch: TicketPatch) -> Option<Ticket> {
        let ticket = self.tickets.get_mut(id)?;

        if let Some(subject) = patch.subject {
            ticket.subject = subject;
        }
        if let Some(message) = patch.message {
            ticket.message = message;
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(claimed_by) = patch.claimed_by {
            ticket.claimed_by = Some(claimed_by);
        }

        Some(ticket.clone())
    }

    /// Removes the ticket together with its conversation.
    pub fn delete_ticket(&mut self, id: &str) -> bool {
        let existed = self.tickets.remove(id);
        if existed {
            self.messages.retain(|m| m.ticket_id != id);
        }
        existed
    }

    /// Chat order: ascending by timestamp.
    pub fn list_messages(&self, ticket_id: &str) -> Vec<Message> {
        self.messages
            .oldest_first_where(|m| m.ticket_id == ticket_id)
    }

    /// Appends without checking the ticket; callers verify it exists.
    pub fn create_message(&mut self, new: NewMessage) -> Message {
        let message = Message {
            id: new_id(),
            ticket_id: new.ticket_id,
            content: new.content,
            sender: new.sender,
            timestamp: self.now(),
        };
        self.messages.insert(message)
    }
}

fn generate_ticket_number() -> String {
    rand::thread_rng().gen_range(10_000..=99_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::Clock;
    use crate::store::models::Sender;
    use crate::store::test_support::store;
    use chrono::{DateTime, Duration};

    fn new_ticket(subject: &str) -> NewTicket {
        NewTicket {
            subject: subject.to_string(),
            message: "Stuck".to_string(),
            user_id: "123".to_string(),
        }
    }

    fn message(ticket_id: &str, content: &str, sender: Sender) -> NewMessage {
        NewMessage {
            ticket_id: ticket_id.to_string(),
            content: content.to_string(),
            sender,
        }
    }

    #[test]
    fn create_ticket_starts_open_with_five_digit_number() {
        let (mut store, clock) = store();
        let ticket = store.create_ticket(new_ticket("Help"));

        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.ticket_number.len(), 5);
        assert!(ticket.ticket_number.chars().all(|c| c.is_ascii_digit()));
        assert!(ticket.claimed_by.is_none());
        assert_eq!(ticket.created_at, clock.now_millis());
        assert_eq!(store.get_ticket(&ticket.id), Some(ticket));
    }

    #[test]
    fn ticket_numbers_stay_in_range() {
        for _ in 0..500 {
            let n: u32 = generate_ticket_number().parse().unwrap();
            assert!((10_000..=99_999).contains(&n));
        }
    }

    #[test]
    fn get_unknown_ticket_is_none() {
        let (store, _) = store();
        assert!(store.get_ticket("missing").is_none());
    }

    #[test]
    fn list_tickets_is_newest_first() {
        let (mut store, clock) = store();
        let first = store.create_ticket(new_ticket("first"));
        clock.advance(Duration::seconds(1));
        let second = store.create_ticket(new_ticket("second"));
        clock.advance(Duration::seconds(1));
        let third = store.create_ticket(new_ticket("third"));

        let ids: Vec<String> = store.list_tickets().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn update_merges_only_present_fields() {
        let (mut store, _) = store();
        let ticket = store.create_ticket(new_ticket("Help"));

        let updated = store
            .update_ticket(
                &ticket.id,
                TicketPatch {
                    status: Some(TicketStatus::Claimed),
                    claimed_by: Some("staff-1".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, TicketStatus::Claimed);
        assert_eq!(updated.claimed_by.as_deref(), Some("staff-1"));
        assert_eq!(updated.subject, "Help");
        assert_eq!(updated.ticket_number, ticket.ticket_number);
        assert_eq!(updated.created_at, ticket.created_at);
    }

    #[test]
    fn update_unknown_ticket_is_none() {
        let (mut store, _) = store();
        assert!(store
            .update_ticket("missing", TicketPatch::default())
            .is_none());
    }

    #[test]
    fn delete_ticket_drops_its_messages() {
        let (mut store, _) = store();
        let keep = store.create_ticket(new_ticket("keep"));
        let gone = store.create_ticket(new_ticket("gone"));
        store.create_message(message(&keep.id, "a", Sender::User));
        store.create_message(message(&gone.id, "b", Sender::User));

        assert!(store.delete_ticket(&gone.id));
        assert!(!store.delete_ticket(&gone.id));
        assert!(store.list_messages(&gone.id).is_empty());
        assert_eq!(store.list_messages(&keep.id).len(), 1);
    }

    #[test]
    fn messages_list_in_timestamp_order_regardless_of_insertion() {
        let (mut store, clock) = store();
        let ticket = store.create_ticket(new_ticket("Help"));

        clock.set(DateTime::from_timestamp_millis(3_000_000).unwrap());
        store.create_message(message(&ticket.id, "late", Sender::Staff));
        clock.set(DateTime::from_timestamp_millis(2_000_000).unwrap());
        store.create_message(message(&ticket.id, "early", Sender::User));

        let contents: Vec<String> = store
            .list_messages(&ticket.id)
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["early", "late"]);
    }

    #[test]
    fn messages_are_scoped_to_their_ticket() {
        let (mut store, _) = store();
        let a = store.create_ticket(new_ticket("a"));
        let b = store.create_ticket(new_ticket("b"));
        store.create_message(message(&a.id, "for a", Sender::User));

        assert_eq!(store.list_messages(&a.id).len(), 1);
        assert!(store.list_messages(&b.id).is_empty());
    }
}
