//! Forum and Swiss-tournament services over an injected storage capability.
//!
//! The services in [`forum`] and [`tournament`] own validation and
//! sanitization; persistence sits behind the traits in [`store`] so the same
//! call contracts work against SQLite or an in-memory double.

pub mod error;
pub mod forum;
pub mod sanitize;
pub mod store;
pub mod swiss;
pub mod tournament;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{ArenaError, Result};
pub use forum::Forum;
pub use store::{ForumStore, TournamentStore};
pub use swiss::pair_adjacent;
pub use tournament::Tournament;
