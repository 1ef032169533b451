use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use arena_types::api::AddPostRequest;

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = run_blocking(&state, |s| s.forum.list_posts()).await?;
    Ok(Json(posts))
}

pub async fn add_post(
    State(state): State<AppState>,
    Json(req): Json<AddPostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    run_blocking(&state, move |s| s.forum.add_post(&req.content)).await?;
    Ok(StatusCode::CREATED)
}
