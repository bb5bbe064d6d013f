// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown interval: {0}")]
    UnknownInterval(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Engine(#[from] engine::Error),

    #[error("Failed to bind server: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::UnknownInterval(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Engine(engine::Error::Provider(_)) => StatusCode::BAD_GATEWAY,
            Error::Engine(_) | Error::ServerBindError(_) | Error::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
