use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use arena_core::ArenaError;
use arena_types::api::{
    PlayerCountResponse, RegisterPlayerRequest, RegisterPlayerResponse, ReportMatchRequest,
    ReportMatchResponse,
};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

// -- Players --

pub async fn register_player(
    State(state): State<AppState>,
    Json(req): Json<RegisterPlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = run_blocking(&state, move |s| s.tournament.register_player(&req.name)).await?;
    Ok((StatusCode::CREATED, Json(RegisterPlayerResponse { id })))
}

pub async fn count_players(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = run_blocking(&state, |s| s.tournament.count_players()).await?;
    Ok(Json(PlayerCountResponse { count }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let player = run_blocking(&state, move |s| {
        s.tournament
            .player(player_id)?
            .ok_or(ArenaError::PlayerNotFound { player_id })
    })
    .await?;
    Ok(Json(player))
}

pub async fn reset_players(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    run_blocking(&state, |s| s.tournament.reset_players()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn standings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let standings = run_blocking(&state, |s| s.tournament.standings()).await?;
    Ok(Json(standings))
}

// -- Matches --

pub async fn report_match(
    State(state): State<AppState>,
    Json(req): Json<ReportMatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = run_blocking(&state, move |s| {
        s.tournament.report_match(req.winner_id, req.loser_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(ReportMatchResponse { id })))
}

pub async fn list_matches(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let matches = run_blocking(&state, |s| s.tournament.list_matches()).await?;
    Ok(Json(matches))
}

pub async fn reset_matches(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    run_blocking(&state, |s| s.tournament.reset_matches()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pairings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let pairings = run_blocking(&state, |s| s.tournament.pairings()).await?;
    Ok(Json(pairings))
}

/// Like `pairings`, but an odd field is paired anyway and the leftover
/// player comes back as `unpaired`.
pub async fn next_round(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let round = run_blocking(&state, |s| s.tournament.next_round()).await?;
    Ok(Json(round))
}
