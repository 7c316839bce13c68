use crate::store::models::{Gang, GangMember, GangPatch, GangRank, NewGang};
use crate::store::{new_id, Store};

/// Ranks seeded into every new gang.
pub const DEFAULT_RANKS: [&str; 2] = ["Member", "Officer"];

impl Store {
    pub fn list_gangs(&self) -> Vec<Gang> {
        self.gangs.newest_first()
    }

    pub fn get_gang(&self, id: &str) -> Option<Gang> {
        self.gangs.get(id).cloned()
    }

    pub fn create_gang(&mut self, new: NewGang) -> Gang {
        let id = new_id();
        let ranks = DEFAULT_RANKS
            .iter()
            .map(|name| GangRank {
                id: new_id(),
                name: name.to_string(),
                gang_id: id.clone(),
            })
            .collect();

        let gang = Gang {
            id,
            name: new.name,
            owner: new.owner,
            owner_name: new.owner_name,
            password: new.password,
            color: new.color,
            members: Vec::new(),
            ranks,
            created_at: self.now(),
        };
        self.gangs.insert(gang)
    }

    pub fn update_gang(&mut self, id: &str, patch: GangPatch) -> Option<Gang> {
        let gang = self.gangs.get_mut(id)?;

        if let Some(name) = patch.name {
            gang.name = name;
        }
        if let Some(owner) = patch.owner {
            gang.owner = owner;
        }
        if let Some(owner_name) = patch.owner_name {
            gang.owner_name = owner_name;
        }
        if let Some(password) = patch.password {
            gang.password = password;
        }
        if let Some(color) = patch.color {
            gang.color = color;
        }

        Some(gang.clone())
    }

    pub fn delete_gang(&mut self, id: &str) -> bool {
        self.gangs.remove(id)
    }

    /// Appends `member` to the roster. Does not check for membership
    /// elsewhere; see the join handler for the one-gang rule.
    pub fn add_gang_member(&mut self, gang_id: &str, member: GangMember) -> Option<Gang> {
        let gang = self.gangs.get_mut(gang_id)?;
        gang.members.push(member);
        Some(gang.clone())
    }

    /// Unknown member ids are a no-op; only an unknown gang is `None`.
    pub fn remove_gang_member(&mut self, gang_id: &str, member_id: &str) -> Option<Gang> {
        let gang = self.gangs.get_mut(gang_id)?;
        gang.members.retain(|m| m.id != member_id);
        Some(gang.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::store;
    use chrono::Duration;

    fn reds() -> NewGang {
        NewGang {
            name: "Reds".into(),
            owner: "u1".into(),
            owner_name: "Bob".into(),
            password: "pw".into(),
            color: "#FF0000".into(),
        }
    }

    fn member(gang_id: &str, username: &str) -> GangMember {
        GangMember {
            id: new_id(),
            username: username.into(),
            gang_id: gang_id.into(),
            rank: "Member".into(),
            joined_at: 0,
            is_online: true,
        }
    }

    #[test]
    fn create_gang_seeds_default_ranks_and_empty_roster() {
        let (mut store, _) = store();
        let gang = store.create_gang(reds());

        assert!(gang.members.is_empty());
        let names: Vec<&str> = gang.ranks.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Member", "Officer"]);
        assert!(gang.ranks.iter().all(|r| r.gang_id == gang.id));
        assert_ne!(gang.ranks[0].id, gang.ranks[1].id);
    }

    #[test]
    fn list_gangs_is_newest_first() {
        let (mut store, clock) = store();
        let older = store.create_gang(reds());
        clock.advance(Duration::minutes(1));
        let newer = store.create_gang(reds());

        let ids: Vec<String> = store.list_gangs().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[test]
    fn update_gang_keeps_roster() {
        let (mut store, _) = store();
        let gang = store.create_gang(reds());
        store.add_gang_member(&gang.id, member(&gang.id, "alice"));

        let updated = store
            .update_gang(
                &gang.id,
                GangPatch {
                    color: Some("#00FF00".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.color, "#00FF00");
        assert_eq!(updated.name, "Reds");
        assert_eq!(updated.members.len(), 1);
        assert_eq!(updated.ranks.len(), 2);
    }

    #[test]
    fn add_and_remove_members() {
        let (mut store, _) = store();
        let gang = store.create_gang(reds());
        let alice = member(&gang.id, "alice");
        let alice_id = alice.id.clone();

        let after_add = store.add_gang_member(&gang.id, alice).unwrap();
        assert_eq!(after_add.members.len(), 1);

        let after_remove = store.remove_gang_member(&gang.id, &alice_id).unwrap();
        assert!(after_remove.members.is_empty());
    }

    #[test]
    fn removing_unknown_member_is_noop() {
        let (mut store, _) = store();
        let gang = store.create_gang(reds());
        store.add_gang_member(&gang.id, member(&gang.id, "alice"));

        let unchanged = store.remove_gang_member(&gang.id, "nobody").unwrap();
        assert_eq!(unchanged.members.len(), 1);
    }

    #[test]
    fn membership_ops_on_unknown_gang_are_none() {
        let (mut store, _) = store();
        assert!(store.add_gang_member("missing", member("missing", "a")).is_none());
        assert!(store.remove_gang_member("missing", "m").is_none());
        assert!(store.update_gang("missing", GangPatch::default()).is_none());
        assert!(!store.delete_gang("missing"));
    }
}
