//! API models for request and response payloads

use auth::Session;
use catalog::{BrowseSnapshot, CatalogConfig, FavoritesStore, Movie, MovieCard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query string of the browse screen
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub q: Option<String>,
}

/// Request for a new search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Request to store a catalog API key
#[derive(Debug, Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// Response for sign-in and sign-up
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub email: String,
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            email: session.email,
            signed_in_at: session.signed_in_at,
        }
    }
}

/// Description of a public form screen
#[derive(Debug, Serialize)]
pub struct FormView {
    pub page: &'static str,
    pub action: &'static str,
    pub fields: [&'static str; 2],
}

/// Browse screen
#[derive(Debug, Serialize)]
pub struct BrowseView {
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub showing_demo: bool,
    pub search_disabled: bool,
    pub can_load_more: bool,
    pub movies: Vec<MovieCard>,
}

impl BrowseView {
    pub fn new(snapshot: BrowseSnapshot, config: &CatalogConfig, favorites: &FavoritesStore) -> Self {
        let movies = cards(&snapshot.movies, config, |m| favorites.has(m.id));
        Self {
            query: snapshot.query,
            page: snapshot.page,
            total_pages: snapshot.total_pages,
            loading: snapshot.loading,
            showing_demo: snapshot.showing_demo,
            search_disabled: snapshot.search_disabled,
            can_load_more: snapshot.can_load_more,
            movies,
        }
    }
}

/// Favorites screen
#[derive(Debug, Serialize)]
pub struct FavoritesView {
    pub movies: Vec<MovieCard>,
}

impl FavoritesView {
    pub fn new(movies: &[Movie], config: &CatalogConfig) -> Self {
        Self {
            movies: cards(movies, config, |_| true),
        }
    }
}

fn cards(movies: &[Movie], config: &CatalogConfig, is_favorite: impl Fn(&Movie) -> bool) -> Vec<MovieCard> {
    movies
        .iter()
        .map(|m| MovieCard::new(m, config, is_favorite(m)))
        .collect()
}
