use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use arena_core::ArenaError;
use arena_types::api::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Arena(#[from] ArenaError),

    #[error("background task failed")]
    Join,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Arena(ArenaError::Validation { .. } | ArenaError::SelfMatch { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Arena(ArenaError::PlayerNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Arena(ArenaError::OddPlayerCount { .. }) => StatusCode::CONFLICT,
            Self::Arena(ArenaError::Storage(_)) | Self::Join => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            // Storage details stay in the log.
            error!("request failed: {:#}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
