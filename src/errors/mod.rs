use std::io;

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use log::error;
use thiserror::Error;

/// Custom error types for the encyclopedia application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("not found")]
    NotFound,

    #[error("invalid path")]
    InvalidPath,

    #[error("invalid title '{0}'")]
    InvalidTitle(String),

    #[error("template error: {0}")]
    Template(String),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = match &self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::InvalidPath | WikiError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            WikiError::Io(_) | WikiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
