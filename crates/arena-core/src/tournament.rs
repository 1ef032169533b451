use arena_types::{MatchRecord, Pairing, Player, Round, Standing};
use tracing::{debug, info, warn};

use crate::sanitize;
use crate::store::TournamentStore;
use crate::swiss;
use crate::{ArenaError, Result};

/// Swiss-system tournament access: players, match results, standings and
/// next-round pairings.
pub struct Tournament<S> {
    store: S,
}

impl<S: TournamentStore> Tournament<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Remove every match and zero all players' records.
    pub fn reset_matches(&self) -> Result<()> {
        self.store.reset_matches()?;
        info!("matches reset");
        Ok(())
    }

    /// Remove every match and every player. Player ids restart at 1.
    pub fn reset_players(&self) -> Result<()> {
        self.store.reset_players()?;
        info!("players reset");
        Ok(())
    }

    pub fn count_players(&self) -> Result<i64> {
        self.store.count_players()
    }

    /// Register a player under a sanitized `name` (need not be unique).
    /// Returns the id the store assigned.
    pub fn register_player(&self, name: &str) -> Result<i64> {
        let name = sanitize::clean_required("player name", name)?;
        let id = self.store.insert_player(&name)?;
        debug!(id, name = %name, "player registered");
        Ok(id)
    }

    pub fn player(&self, id: i64) -> Result<Option<Player>> {
        self.store.player(id)
    }

    /// Players ranked by wins, first place first. Players on equal wins keep
    /// registration order.
    pub fn standings(&self) -> Result<Vec<Standing>> {
        self.store.standings()
    }

    /// Record that `winner_id` beat `loser_id`. Returns the match id.
    /// Both players must exist when the store records the match.
    pub fn report_match(&self, winner_id: i64, loser_id: i64) -> Result<i64> {
        if winner_id == loser_id {
            warn!(player_id = winner_id, "rejected self-match");
            return Err(ArenaError::SelfMatch {
                player_id: winner_id,
            });
        }

        let id = self
            .store
            .record_match(winner_id, loser_id)
            .inspect_err(|e| {
                if let ArenaError::PlayerNotFound { player_id } = e {
                    warn!(player_id, "rejected match with unknown player");
                }
            })?;
        debug!(id, winner_id, loser_id, "match reported");
        Ok(id)
    }

    pub fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        self.store.list_matches()
    }

    /// Pair the current standings for the next round without rejecting an
    /// odd field; the leftover player is reported in [`Round::unpaired`].
    pub fn next_round(&self) -> Result<Round> {
        let standings = self.standings()?;
        Ok(swiss::pair_adjacent(&standings))
    }

    /// Pairings for the next round. Every registered player appears exactly
    /// once, so the field must be even.
    pub fn pairings(&self) -> Result<Vec<Pairing>> {
        let standings = self.standings()?;
        if standings.len() % 2 != 0 {
            return Err(ArenaError::OddPlayerCount {
                count: standings.len(),
            });
        }
        Ok(swiss::pair_adjacent(&standings).pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn tournament() -> Tournament<MemoryStore> {
        Tournament::new(MemoryStore::default())
    }

    fn register_all(t: &Tournament<MemoryStore>, names: &[&str]) -> Vec<i64> {
        names.iter().map(|n| t.register_player(n).unwrap()).collect()
    }

    #[test]
    fn register_increments_count() {
        let t = tournament();
        assert_eq!(t.count_players().unwrap(), 0);
        t.register_player("Alice").unwrap();
        assert_eq!(t.count_players().unwrap(), 1);
    }

    #[test]
    fn register_sanitizes_name() {
        let t = tournament();
        let id = t.register_player("<i>Bob</i><img src=x>").unwrap();
        let player = t.player(id).unwrap().unwrap();
        assert_eq!(player.name, "<i>Bob</i>&lt;img src=x&gt;");
        assert_eq!((player.wins, player.matches), (0, 0));
    }

    #[test]
    fn blank_name_is_rejected() {
        let t = tournament();
        assert!(matches!(
            t.register_player(""),
            Err(ArenaError::Validation { .. })
        ));
        assert_eq!(t.count_players().unwrap(), 0);
    }

    #[test]
    fn reset_players_restarts_ids() {
        let t = tournament();
        register_all(&t, &["A", "B", "C"]);
        t.report_match(1, 2).unwrap();

        t.reset_players().unwrap();
        assert_eq!(t.count_players().unwrap(), 0);
        assert!(t.list_matches().unwrap().is_empty());
        assert_eq!(t.register_player("D").unwrap(), 1);
    }

    #[test]
    fn reset_matches_zeroes_records() {
        let t = tournament();
        let ids = register_all(&t, &["A", "B"]);
        t.report_match(ids[0], ids[1]).unwrap();

        t.reset_matches().unwrap();
        assert!(t.list_matches().unwrap().is_empty());
        assert_eq!(t.count_players().unwrap(), 2);
        for s in t.standings().unwrap() {
            assert_eq!((s.wins, s.matches), (0, 0));
        }
    }

    #[test]
    fn report_match_updates_both_players() {
        let t = tournament();
        let ids = register_all(&t, &["A", "B"]);

        t.report_match(ids[1], ids[0]).unwrap();

        let winner = t.player(ids[1]).unwrap().unwrap();
        let loser = t.player(ids[0]).unwrap().unwrap();
        assert_eq!((winner.wins, winner.matches), (1, 1));
        assert_eq!((loser.wins, loser.matches), (0, 1));
    }

    #[test]
    fn self_match_is_rejected() {
        let t = tournament();
        let ids = register_all(&t, &["A"]);

        let err = t.report_match(ids[0], ids[0]).unwrap_err();
        assert!(matches!(err, ArenaError::SelfMatch { player_id } if player_id == ids[0]));
        assert!(t.list_matches().unwrap().is_empty());
        assert_eq!(t.player(ids[0]).unwrap().unwrap().matches, 0);
    }

    #[test]
    fn unknown_player_is_rejected() {
        let t = tournament();
        let ids = register_all(&t, &["A"]);

        let err = t.report_match(ids[0], 42).unwrap_err();
        assert!(matches!(err, ArenaError::PlayerNotFound { player_id: 42 }));
        assert_eq!(t.player(ids[0]).unwrap().unwrap().wins, 0);
    }

    #[test]
    fn standings_and_pairings_follow_wins() {
        let t = tournament();
        let ids = register_all(&t, &["A", "B", "C", "D", "E", "F"]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        let (e, f) = (ids[4], ids[5]);

        // A and B on 3 wins, C on 1, D/E/F on 0.
        for (w, l) in [(a, e), (a, f), (a, c), (b, e), (b, f), (b, d), (c, d)] {
            t.report_match(w, l).unwrap();
        }

        let order: Vec<i64> = t.standings().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![a, b, c, d, e, f]);

        let pairs = t.pairings().unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].id1, pairs[0].id2), (a, b));
        assert_eq!((pairs[1].id1, pairs[1].id2), (c, d));
        assert_eq!((pairs[2].id1, pairs[2].id2), (e, f));
        assert_eq!(pairs[0].name1, "A");
    }

    #[test]
    fn odd_field_cannot_be_paired() {
        let t = tournament();
        register_all(&t, &["A", "B", "C"]);

        let err = t.pairings().unwrap_err();
        assert!(matches!(err, ArenaError::OddPlayerCount { count: 3 }));

        let round = t.next_round().unwrap();
        assert_eq!(round.pairs.len(), 1);
        assert_eq!(round.unpaired.map(|s| s.name), Some("C".to_string()));
    }
}
