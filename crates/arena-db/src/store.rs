use arena_core::{ArenaError, ForumStore, Result, TournamentStore};
use arena_types::{MatchRecord, Player, Post, Standing};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::Database;
use crate::models::{MatchRow, PlayerRow, PostRow};

impl ForumStore for Database {
    fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = self.get_posts()?;
        Ok(rows.into_iter().map(post_from_row).collect())
    }

    fn insert_post(&self, content: &str) -> Result<()> {
        Ok(Database::insert_post(self, content)?)
    }
}

impl TournamentStore for Database {
    fn reset_matches(&self) -> Result<()> {
        Ok(self.delete_matches()?)
    }

    fn reset_players(&self) -> Result<()> {
        Ok(self.delete_players()?)
    }

    fn count_players(&self) -> Result<i64> {
        Ok(Database::count_players(self)?)
    }

    fn insert_player(&self, name: &str) -> Result<i64> {
        Ok(Database::insert_player(self, name)?)
    }

    fn player(&self, id: i64) -> Result<Option<Player>> {
        Ok(self.get_player(id)?.map(player_from_row))
    }

    fn standings(&self) -> Result<Vec<Standing>> {
        let rows = self.get_standings()?;
        Ok(rows
            .into_iter()
            .map(|row| Standing::from(player_from_row(row)))
            .collect())
    }

    fn record_match(&self, winner_id: i64, loser_id: i64) -> Result<i64> {
        self.insert_match(winner_id, loser_id)
            .map_err(|e| e.downcast::<ArenaError>().unwrap_or_else(ArenaError::Storage))
    }

    fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        let rows = self.get_matches()?;
        Ok(rows.into_iter().map(match_from_row).collect())
    }
}

fn post_from_row(row: PostRow) -> Post {
    let time = parse_time(&row.time).unwrap_or_else(|e| {
        warn!("Corrupt post time '{}': {}", row.time, e);
        DateTime::default()
    });
    Post {
        content: row.content,
        time,
    }
}

/// SQLite stores "YYYY-MM-DD HH:MM:SS.SSS" without a zone; it is UTC.
fn parse_time(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    raw.parse::<DateTime<Utc>>().or_else(|_| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|ndt| ndt.and_utc())
    })
}

fn player_from_row(row: PlayerRow) -> Player {
    Player {
        id: row.id,
        name: row.name,
        wins: row.wins,
        matches: row.matches,
    }
}

fn match_from_row(row: MatchRow) -> MatchRecord {
    MatchRecord {
        id: row.id,
        winner_id: row.winner_id,
        loser_id: row.loser_id,
    }
}
