//! Movie models and the views built from them

use serde::{Deserialize, Serialize};

use crate::config::{CARD_POSTER_SIZE, CatalogConfig, DETAIL_POSTER_SIZE};

/// Movie as returned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    /// `None` means the catalog has no image
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average rating between 0.0 and 10.0
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// One page of a search or popular listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePage {
    pub results: Vec<Movie>,
    pub total_pages: u32,
}

impl MoviePage {
    /// Page used when the catalog answered with something unusable
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_pages: 1,
        }
    }
}

/// Card shown in result and favorites grids
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub has_poster: bool,
    /// Rating with one decimal, e.g. "7.3"
    pub rating: String,
    pub is_favorite: bool,
}

impl MovieCard {
    pub fn new(movie: &Movie, config: &CatalogConfig, is_favorite: bool) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: config.poster_url(movie.poster_path.as_deref(), CARD_POSTER_SIZE),
            has_poster: movie.poster_path.as_deref().is_some_and(|p| !p.is_empty()),
            rating: format_rating(movie.vote_average),
            is_favorite,
        }
    }
}

/// Full detail screen for one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailView {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub is_favorite: bool,
}

impl MovieDetailView {
    pub fn new(movie: &Movie, config: &CatalogConfig, is_favorite: bool) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: config.poster_url(movie.poster_path.as_deref(), DETAIL_POSTER_SIZE),
            rating: format_rating(movie.vote_average),
            release_date: movie.release_date.clone(),
            overview: movie.overview.clone(),
            is_favorite,
        }
    }
}

fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_path: Option<&str>) -> Movie {
        Movie {
            id: 550,
            title: "Fight Club".to_string(),
            poster_path: poster_path.map(str::to_string),
            vote_average: 8.433,
            overview: Some("An insomniac office worker...".to_string()),
            release_date: Some("1999-10-15".to_string()),
        }
    }

    #[test]
    fn test_movie_decodes_sparse_catalog_item() {
        let json = r#"{"id": 550, "title": "Fight Club", "poster_path": null, "adult": false}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.overview, None);
    }

    #[test]
    fn test_card_formats_rating_and_poster() {
        let config = CatalogConfig::default();
        let card = MovieCard::new(&movie(Some("/p.jpg")), &config, true);
        assert_eq!(card.rating, "8.4");
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w342/p.jpg");
        assert!(card.has_poster);
        assert!(card.is_favorite);
    }

    #[test]
    fn test_card_without_poster() {
        let card = MovieCard::new(&movie(None), &CatalogConfig::default(), false);
        assert!(!card.has_poster);
        assert_eq!(card.poster_url, crate::config::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_detail_view_uses_large_poster() {
        let view = MovieDetailView::new(&movie(Some("/p.jpg")), &CatalogConfig::default(), false);
        assert_eq!(view.poster_url, "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(view.release_date.as_deref(), Some("1999-10-15"));
    }
}
