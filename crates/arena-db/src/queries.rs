use crate::Database;
use crate::models::{MatchRow, PlayerRow, PostRow};
use anyhow::Result;
use arena_core::ArenaError;
use rusqlite::{Connection, OptionalExtension, Transaction};
use tracing::debug;

impl Database {
    // -- Posts --

    pub fn get_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(query_posts)
    }

    pub fn insert_post(&self, content: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute("INSERT INTO posts (content) VALUES (?1)", [content])?;
            Ok(())
        })
    }

    // -- Players --

    pub fn insert_player(&self, name: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute("INSERT INTO players (name) VALUES (?1)", [name])?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn count_players(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    pub fn get_player(&self, id: i64) -> Result<Option<PlayerRow>> {
        self.with_conn(|conn| query_player(conn, id))
    }

    pub fn get_standings(&self) -> Result<Vec<PlayerRow>> {
        self.with_conn(query_standings)
    }

    /// Delete every player along with every match, restarting both id
    /// sequences at 1.
    pub fn delete_players(&self) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            clear_matches(&tx)?;
            tx.execute("DELETE FROM players", [])?;
            tx.execute("DELETE FROM sqlite_sequence WHERE name = 'players'", [])?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Matches --

    /// Delete every match, restart the match id sequence and zero every
    /// player's record.
    pub fn delete_matches(&self) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            clear_matches(&tx)?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Insert a match and update both players' records in one transaction.
    /// A missing player fails with `ArenaError::PlayerNotFound` and writes
    /// nothing.
    pub fn insert_match(&self, winner_id: i64, loser_id: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            for player_id in [winner_id, loser_id] {
                let exists = tx
                    .query_row("SELECT 1 FROM players WHERE id = ?1", [player_id], |_| Ok(()))
                    .optional()?
                    .is_some();
                if !exists {
                    return Err(ArenaError::PlayerNotFound { player_id }.into());
                }
            }

            tx.execute(
                "INSERT INTO matches (winner_id, loser_id) VALUES (?1, ?2)",
                [winner_id, loser_id],
            )?;
            let id = tx.last_insert_rowid();

            // matches before wins, so wins <= matches holds after each statement
            tx.execute(
                "UPDATE players SET matches = matches + 1 WHERE id IN (?1, ?2)",
                [winner_id, loser_id],
            )?;
            tx.execute("UPDATE players SET wins = wins + 1 WHERE id = ?1", [winner_id])?;

            tx.commit()?;
            debug!(id, winner_id, loser_id, "match stored");
            Ok(id)
        })
    }

    pub fn get_matches(&self) -> Result<Vec<MatchRow>> {
        self.with_conn(query_matches)
    }
}

fn clear_matches(tx: &Transaction<'_>) -> Result<()> {
    tx.execute("DELETE FROM matches", [])?;
    tx.execute("DELETE FROM sqlite_sequence WHERE name = 'matches'", [])?;
    tx.execute("UPDATE players SET wins = 0, matches = 0", [])?;
    Ok(())
}

fn query_posts(conn: &Connection) -> Result<Vec<PostRow>> {
    let mut stmt = conn.prepare("SELECT content, time FROM posts ORDER BY time DESC, id DESC")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(PostRow {
                content: row.get(0)?,
                time: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_player(conn: &Connection, id: i64) -> Result<Option<PlayerRow>> {
    let mut stmt = conn.prepare("SELECT id, name, wins, matches FROM players WHERE id = ?1")?;

    let row = stmt.query_row([id], map_player).optional()?;

    Ok(row)
}

fn query_standings(conn: &Connection) -> Result<Vec<PlayerRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, wins, matches FROM players ORDER BY wins DESC, id ASC")?;

    let rows = stmt
        .query_map([], map_player)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_matches(conn: &Connection) -> Result<Vec<MatchRow>> {
    let mut stmt = conn.prepare("SELECT id, winner_id, loser_id FROM matches ORDER BY id")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MatchRow {
                id: row.get(0)?,
                winner_id: row.get(1)?,
                loser_id: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_player(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlayerRow> {
    Ok(PlayerRow {
        id: row.get(0)?,
        name: row.get(1)?,
        wins: row.get(2)?,
        matches: row.get(3)?,
    })
}
