//! Catalog error types

use thiserror::Error;

/// Failure talking to the external movie catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No API key is stored or configured
    #[error("Catalog API key is not configured")]
    MissingApiKey,

    /// The catalog answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Http(reqwest::StatusCode),

    /// The body did not have the expected shape
    #[error("Malformed catalog payload: {0}")]
    MalformedPayload(String),

    /// The request never produced a response
    #[error("Catalog transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Transport(e.to_string())
    }
}

/// Type alias for Result with CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
