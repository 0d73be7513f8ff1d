use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kurz_core::MappingError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, RedirectError>;

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("short code not found")]
    NotFound,
    #[error("stored url for {0} is not a valid Location header")]
    InvalidLocation(String),
    #[error("mapping operation failed: {0}")]
    Mapping(#[from] MappingError),
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        match self {
            RedirectError::NotFound => {
                (StatusCode::NOT_FOUND, "short code not found").into_response()
            }
            RedirectError::InvalidLocation(code) => {
                error!(code = %code, "stored url is not a valid Location header");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            RedirectError::Mapping(source) => {
                error!(error = %source, "redirect lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
