//! Catalog endpoint configuration

use serde::Deserialize;

/// Shown in place of a poster when the catalog has none
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=750&width=500&text=No+Image";

/// Poster size used on the detail screen
pub const DETAIL_POSTER_SIZE: &str = "w500";
/// Poster size used on cards
pub const CARD_POSTER_SIZE: &str = "w342";

/// Configuration for the external movie catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// API root, e.g. "https://api.themoviedb.org/3"
    pub base_url: String,
    /// Image root without size segment
    pub image_base_url: String,
    /// Language tag sent with every request
    pub language: String,
    /// API key used when no override is stored
    pub api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            api_key: None,
        }
    }
}

impl CatalogConfig {
    /// Build the URL of a poster at the given size
    pub fn poster_url(&self, path: Option<&str>, size: &str) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => format!(
                "{}/{}{}",
                self.image_base_url.trim_end_matches('/'),
                size,
                path
            ),
            None => PLACEHOLDER_IMAGE.to_string(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
