//! Storage capabilities injected into the services.
//!
//! Implementations are synchronous and may block. Every mutating method must
//! be atomic: either all of its writes land or none do.

use arena_types::{MatchRecord, Player, Post, Standing};

use crate::Result;

pub trait ForumStore: Send + Sync {
    /// All posts, newest first.
    fn list_posts(&self) -> Result<Vec<Post>>;

    /// Append a post stamped with the store's current time. `content` is
    /// stored verbatim; sanitizing is the caller's job.
    fn insert_post(&self, content: &str) -> Result<()>;
}

pub trait TournamentStore: Send + Sync {
    /// Delete every match, restart match numbering at 1 and zero every
    /// player's counters.
    fn reset_matches(&self) -> Result<()>;

    /// Everything `reset_matches` does, then delete every player and restart
    /// player numbering at 1.
    fn reset_players(&self) -> Result<()>;

    fn count_players(&self) -> Result<i64>;

    /// Insert a player with zero wins and matches, returning the assigned id.
    fn insert_player(&self, name: &str) -> Result<i64>;

    fn player(&self, id: i64) -> Result<Option<Player>>;

    /// All players by wins descending, ties by ascending id.
    fn standings(&self) -> Result<Vec<Standing>>;

    /// Insert the match row, bump the winner's wins and both players'
    /// matches. Returns the new match id, or `ArenaError::PlayerNotFound`
    /// if either player is missing at the time of the write.
    fn record_match(&self, winner_id: i64, loser_id: i64) -> Result<i64>;

    fn list_matches(&self) -> Result<Vec<MatchRecord>>;
}
