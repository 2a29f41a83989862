//! Custom error types for the API service

use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Sign-in or sign-up form error, shown inline
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Auth(AuthError::DuplicateEmail) => StatusCode::CONFLICT,
            ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Catalog(CatalogError::Http(StatusCode::NOT_FOUND)) => StatusCode::NOT_FOUND,
            ApiError::Catalog(CatalogError::MissingApiKey) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
