use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArenaError>;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("player {player_id} cannot play against themselves")]
    SelfMatch { player_id: i64 },

    #[error("player not found: {player_id}")]
    PlayerNotFound { player_id: i64 },

    #[error("cannot pair an odd number of players ({count})")]
    OddPlayerCount { count: usize },

    /// Anything the storage backend raised. Not retried or translated.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ArenaError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
