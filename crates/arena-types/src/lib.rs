pub mod api;
pub mod models;

pub use models::{MatchRecord, Pairing, Player, Post, Round, Standing};
