//! Database row types, mapped straight from SQLite rows.
//! Converted into arena-types models at the store boundary.

pub struct PostRow {
    pub content: String,
    pub time: String,
}

pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub wins: i64,
    pub matches: i64,
}

pub struct MatchRow {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
}
