//! world state available to condition predicates

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::world::{Faction, Player, WorldSnapshot};

/// context for evaluating conditions
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    /// evaluation clock for age-based conditions
    pub now: DateTime<Utc>,
    pub players: &'a HashMap<i64, Player>,
    pub factions: &'a HashMap<i64, Faction>,
}

impl<'a> ScanContext<'a> {
    pub fn new(
        now: DateTime<Utc>,
        players: &'a HashMap<i64, Player>,
        factions: &'a HashMap<i64, Faction>,
    ) -> Self {
        Self {
            now,
            players,
            factions,
        }
    }

    /// context over a snapshot, clocked at its capture time
    pub fn from_world(world: &'a WorldSnapshot) -> Self {
        Self::new(world.clock(), &world.players, &world.factions)
    }

    /// set the evaluation clock
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn player(&self, identity_id: i64) -> Option<&'a Player> {
        self.players.get(&identity_id)
    }

    /// resolve a player by identity id or case-insensitive name
    ///
    /// when several players share a name the lowest identity id wins
    pub fn find_player(&self, query: &str) -> Option<(i64, &'a Player)> {
        if let Ok(id) = query.parse::<i64>() {
            if let Some(player) = self.players.get(&id) {
                return Some((id, player));
            }
        }

        self.players
            .iter()
            .filter(|(_, p)| p.name.eq_ignore_ascii_case(query))
            .min_by_key(|(id, _)| **id)
            .map(|(id, p)| (*id, p))
    }

    /// faction of a player, by the player's record or by faction membership
    pub fn faction_of(&self, identity_id: i64) -> Option<&'a Faction> {
        let by_record = self
            .player(identity_id)
            .and_then(|p| p.faction_id)
            .and_then(|fid| self.factions.get(&fid));

        by_record.or_else(|| {
            self.factions
                .values()
                .find(|f| f.members.contains(&identity_id))
        })
    }

    /// positions of every online player whose character position is known
    pub fn online_player_positions(&self) -> impl Iterator<Item = [f64; 3]> + 'a {
        self.players
            .values()
            .filter(|p| p.online)
            .filter_map(|p| p.position)
    }
}
