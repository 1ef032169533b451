use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (posts, players, matches)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE posts (
                id          INTEGER PRIMARY KEY,
                content     TEXT NOT NULL,
                time        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            );

            CREATE INDEX idx_posts_time ON posts(time);

            CREATE TABLE players (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                wins        INTEGER NOT NULL DEFAULT 0,
                matches     INTEGER NOT NULL DEFAULT 0,
                CHECK (wins >= 0 AND matches >= 0 AND wins <= matches)
            );

            CREATE TABLE matches (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                winner_id   INTEGER NOT NULL REFERENCES players(id),
                loser_id    INTEGER NOT NULL REFERENCES players(id),
                CHECK (winner_id <> loser_id)
            );

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
