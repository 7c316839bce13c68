use crate::store::models::{NewNotification, Notification};
use crate::store::{new_id, Store};

impl Store {
    pub fn list_notifications(&self) -> Vec<Notification> {
        self.notifications.newest_first()
    }

    pub fn create_notification(&mut self, new: NewNotification) -> Notification {
        let notification = Notification {
            id: new_id(),
            kind: new.kind,
            title: new.title,
            description: new.description,
            created_at: self.now(),
            read: false,
        };
        self.notifications.insert(notification)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Option<Notification> {
        let notification = self.notifications.get_mut(id)?;
        notification.read = true;
        Some(notification.clone())
    }
}
