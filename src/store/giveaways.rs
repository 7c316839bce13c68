use rand::Rng;

use crate::store::models::{Giveaway, GiveawayStatus, NewGiveaway};
use crate::store::{new_id, Store};

/// Fallback for duration tokens that do not parse.
pub const DEFAULT_DURATION_MS: i64 = 60_000;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Parse `<digits><m|h|d|w>` (e.g. `"1h"`, `"3d"`) into milliseconds.
/// Anything else yields [`DEFAULT_DURATION_MS`]. Well-formed values too
/// large for an `i64` saturate to `i64::MAX`.
pub fn parse_duration(token: &str) -> i64 {
    let Some(unit) = token.chars().last() else {
        return DEFAULT_DURATION_MS;
    };
    let digits = &token[..token.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_DURATION_MS;
    }

    let unit_ms = match unit {
        'm' => MINUTE_MS,
        'h' => HOUR_MS,
        'd' => DAY_MS,
        'w' => WEEK_MS,
        _ => return DEFAULT_DURATION_MS,
    };

    digits
        .parse::<i64>()
        .map(|value| value.saturating_mul(unit_ms))
        .unwrap_or(i64::MAX)
}

/// Draw `min(count, participants.len())` winners. Each slot is an
/// independent uniform pick over the full pool, so a participant can win
/// more than one slot.
pub fn draw_winners<R: Rng + ?Sized>(participants: &[String], count: u32, rng: &mut R) -> Vec<String> {
    let slots = (count as usize).min(participants.len());
    (0..slots)
        .map(|_| participants[rng.gen_range(0..participants.len())].clone())
        .collect()
}

impl Store {
    pub fn list_giveaways(&self) -> Vec<Giveaway> {
        self.giveaways.newest_first()
    }

    pub fn get_giveaway(&self, id: &str) -> Option<Giveaway> {
        self.giveaways.get(id).cloned()
    }

    pub fn create_giveaway(&mut self, new: NewGiveaway) -> Giveaway {
        let now = self.now();
        let ends_at = now.saturating_add(parse_duration(&new.duration));
        let giveaway = Giveaway {
            id: new_id(),
            price: new.price,
            duration: new.duration,
            description: new.description,
            created_at: now,
            ends_at,
            winners_count: new.winners_count,
            winners: Vec::new(),
            participants: Vec::new(),
            status: GiveawayStatus::Active,
        };
        self.giveaways.insert(giveaway)
    }

    pub fn delete_giveaway(&mut self, id: &str) -> bool {
        self.giveaways.remove(id)
    }

    /// Idempotent: a username already in the pool is not added twice.
    pub fn join_giveaway(&mut self, id: &str, username: &str) -> Option<Giveaway> {
        let giveaway = self.giveaways.get_mut(id)?;
        if !giveaway.participants.iter().any(|p| p == username) {
            giveaway.participants.push(username.to_string());
        }
        Some(giveaway.clone())
    }

    pub fn leave_giveaway(&mut self, id: &str, username: &str) -> Option<Giveaway> {
        let giveaway = self.giveaways.get_mut(id)?;
        giveaway.participants.retain(|p| p != username);
        Some(giveaway.clone())
    }

    /// Close the giveaway and fix its winners. Ending an already ended
    /// giveaway returns it untouched.
    pub fn end_giveaway(&mut self, id: &str) -> Option<Giveaway> {
        let giveaway = self.giveaways.get_mut(id)?;
        if giveaway.status == GiveawayStatus::Ended {
            return Some(giveaway.clone());
        }

        giveaway.status = GiveawayStatus::Ended;
        giveaway.winners = draw_winners(
            &giveaway.participants,
            giveaway.winners_count,
            &mut rand::thread_rng(),
        );
        tracing::info!(
            giveaway_id = %giveaway.id,
            winners = giveaway.winners.len(),
            "Giveaway ended"
        );
        Some(giveaway.clone())
    }

    /// End every active giveaway whose deadline has passed. Returns the ids
    /// that were ended.
    pub fn expire_due(&mut self) -> Vec<String> {
        let now = self.now();
        let due: Vec<String> = self
            .giveaways
            .values()
            .filter(|g| g.status == GiveawayStatus::Active && now > g.ends_at)
            .map(|g| g.id.clone())
            .collect();

        for id in &due {
            self.end_giveaway(id);
        }
        due
    }
}
