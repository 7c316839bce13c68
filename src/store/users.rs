use crate::store::models::{User, UserPatch};
use crate::store::{new_id, Store};

impl Store {
    pub fn list_users(&self) -> Vec<User> {
        self.users.newest_first()
    }

    /// Lookup by external identity rather than record id.
    pub fn get_user_by_user_id(&self, user_id: &str) -> Option<User> {
        self.users.values().find(|u| u.user_id == user_id).cloned()
    }

    pub fn create_user(&mut self, user_id: &str) -> User {
        let user = User {
            id: new_id(),
            user_id: user_id.to_string(),
            is_blocked: false,
            created_at: self.now(),
        };
        self.users.insert(user)
    }

    pub fn update_user(&mut self, id: &str, patch: UserPatch) -> Option<User> {
        let user = self.users.get_mut(id)?;
        if let Some(user_id) = patch.user_id {
            user.user_id = user_id;
        }
        Some(user.clone())
    }

    pub fn block_user(&mut self, id: &str) -> Option<User> {
        self.set_blocked(id, true)
    }

    pub fn unblock_user(&mut self, id: &str) -> Option<User> {
        self.set_blocked(id, false)
    }

    pub fn delete_user(&mut self, id: &str) -> bool {
        self.users.remove(id)
    }

    fn set_blocked(&mut self, id: &str, blocked: bool) -> Option<User> {
        let user = self.users.get_mut(id)?;
        user.is_blocked = blocked;
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::store;

    #[test]
    fn create_user_starts_unblocked() {
        let (mut store, _) = store();
        let user = store.create_user("123");

        assert_eq!(user.user_id, "123");
        assert!(!user.is_blocked);
        assert_eq!(user.created_at, 1_000_000);
    }

    #[test]
    fn block_then_unblock_restores_other_fields() {
        let (mut store, _) = store();
        let user = store.create_user("123");

        let blocked = store.block_user(&user.id).unwrap();
        assert!(blocked.is_blocked);

        let unblocked = store.unblock_user(&user.id).unwrap();
        assert_eq!(unblocked, user);
    }

    #[test]
    fn lookup_by_external_id() {
        let (mut store, _) = store();
        let user = store.create_user("discord-9");
        store.create_user("discord-10");

        assert_eq!(store.get_user_by_user_id("discord-9"), Some(user));
        assert!(store.get_user_by_user_id("nobody").is_none());
    }

    #[test]
    fn update_and_delete() {
        let (mut store, _) = store();
        let user = store.create_user("old");

        let updated = store
            .update_user(
                &user.id,
                UserPatch {
                    user_id: Some("new".into()),
                },
            )
            .unwrap();
        assert_eq!(updated.user_id, "new");
        assert!(!updated.is_blocked);

        assert!(store.delete_user(&user.id));
        assert!(store.get_user_by_user_id("new").is_none());
        assert!(store.block_user(&user.id).is_none());
    }
}
