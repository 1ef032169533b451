use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::{forum, tournament};

pub fn router(state: AppState) -> Router {
    let forum_routes = Router::new().route("/posts", get(forum::list_posts).post(forum::add_post));

    let tournament_routes = Router::new()
        .route(
            "/players",
            post(tournament::register_player).delete(tournament::reset_players),
        )
        .route("/players/count", get(tournament::count_players))
        .route("/players/{player_id}", get(tournament::get_player))
        .route("/standings", get(tournament::standings))
        .route(
            "/matches",
            get(tournament::list_matches)
                .post(tournament::report_match)
                .delete(tournament::reset_matches),
        )
        .route("/pairings", get(tournament::pairings))
        .route("/pairings/next", get(tournament::next_round));

    Router::new()
        .route("/health", get(health))
        .merge(forum_routes)
        .merge(tournament_routes)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
