use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum post. Posts carry no identity of their own; they are ordered by
/// `time`, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub wins: i64,
    pub matches: i64,
}

/// One row of the standings table. Same shape as [`Player`], kept as its own
/// type because standings are an ordered view rather than a lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: i64,
    pub name: String,
    pub wins: i64,
    pub matches: i64,
}

impl From<Player> for Standing {
    fn from(p: Player) -> Self {
        Self {
            id: p.id,
            name: p.name,
            wins: p.wins,
            matches: p.matches,
        }
    }
}

/// Two players drawn from adjacent ranks for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: i64,
    pub name1: String,
    pub id2: i64,
    pub name2: String,
}

/// The pairings for one round, plus the player left over when the field is
/// odd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub pairs: Vec<Pairing>,
    pub unpaired: Option<Standing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
}
