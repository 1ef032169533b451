//! In-memory store used by the service tests.

use std::sync::Mutex;

use arena_types::{MatchRecord, Player, Post, Standing};
use chrono::{Duration, TimeZone, Utc};

use crate::store::{ForumStore, TournamentStore};
use crate::{ArenaError, Result};

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    next_player_id: i64,
    next_match_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| anyhow::anyhow!("store lock poisoned: {}", e).into())
    }
}

impl ForumStore for MemoryStore {
    fn list_posts(&self) -> Result<Vec<Post>> {
        let state = self.lock()?;
        let mut posts = state.posts.clone();
        posts.reverse();
        Ok(posts)
    }

    fn insert_post(&self, content: &str) -> Result<()> {
        let mut state = self.lock()?;
        // Fixed clock, one second per post.
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let time = base + Duration::seconds(state.posts.len() as i64);
        state.posts.push(Post {
            content: content.to_string(),
            time,
        });
        Ok(())
    }
}

impl TournamentStore for MemoryStore {
    fn reset_matches(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.matches.clear();
        state.next_match_id = 0;
        for p in &mut state.players {
            p.wins = 0;
            p.matches = 0;
        }
        Ok(())
    }

    fn reset_players(&self) -> Result<()> {
        self.reset_matches()?;
        let mut state = self.lock()?;
        state.players.clear();
        state.next_player_id = 0;
        Ok(())
    }

    fn count_players(&self) -> Result<i64> {
        Ok(self.lock()?.players.len() as i64)
    }

    fn insert_player(&self, name: &str) -> Result<i64> {
        let mut state = self.lock()?;
        state.next_player_id += 1;
        let id = state.next_player_id;
        state.players.push(Player {
            id,
            name: name.to_string(),
            wins: 0,
            matches: 0,
        });
        Ok(id)
    }

    fn player(&self, id: i64) -> Result<Option<Player>> {
        Ok(self.lock()?.players.iter().find(|p| p.id == id).cloned())
    }

    fn standings(&self) -> Result<Vec<Standing>> {
        let mut players = self.lock()?.players.clone();
        players.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
        Ok(players.into_iter().map(Standing::from).collect())
    }

    fn record_match(&self, winner_id: i64, loser_id: i64) -> Result<i64> {
        let mut state = self.lock()?;
        for id in [winner_id, loser_id] {
            if !state.players.iter().any(|p| p.id == id) {
                return Err(ArenaError::PlayerNotFound { player_id: id });
            }
        }
        state.next_match_id += 1;
        let id = state.next_match_id;
        state.matches.push(MatchRecord {
            id,
            winner_id,
            loser_id,
        });
        for p in &mut state.players {
            if p.id == winner_id {
                p.wins += 1;
            }
            if p.id == winner_id || p.id == loser_id {
                p.matches += 1;
            }
        }
        Ok(id)
    }

    fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.lock()?.matches.clone())
    }
}
