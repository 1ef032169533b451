use std::sync::Arc;

use arena_core::{Forum, Tournament};
use arena_db::Database;
use tracing::error;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub forum: Forum<Database>,
    pub tournament: Tournament<Database>,
}

impl AppStateInner {
    pub fn new(forum_db: Database, tournament_db: Database) -> AppState {
        Arc::new(Self {
            forum: Forum::new(forum_db),
            tournament: Tournament::new(tournament_db),
        })
    }
}

/// Run a blocking data-layer call off the async runtime.
pub(crate) async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> arena_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Join
        })?;
    Ok(result?)
}
