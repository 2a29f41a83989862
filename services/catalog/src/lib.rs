//! Movie catalog access for the movie explorer
//!
//! This crate talks to the external movie database, keeps the user's
//! favorites, and drives the paginated browse screen.

pub mod api_key;
pub mod browse;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod favorites;
pub mod models;

pub use api_key::ApiKeyStore;
pub use browse::{BrowseFlow, BrowseSnapshot, CancelToken, FetchOutcome};
pub use client::{CatalogClient, CatalogSource};
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use favorites::FavoritesStore;
pub use models::{Movie, MovieCard, MovieDetailView, MoviePage};
