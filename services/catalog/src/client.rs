//! HTTP client for the external movie catalog

use std::future::Future;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::api_key::ApiKeyStore;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Movie, MoviePage};

/// Source of paginated movie listings
///
/// An empty query lists popular movies; anything else is a search.
pub trait CatalogSource: Send + Sync {
    /// Fetch one page. A body without a `results` array is
    /// [`CatalogError::MalformedPayload`].
    fn fetch_page(
        &self,
        query: &str,
        page: u32,
    ) -> impl Future<Output = CatalogResult<MoviePage>> + Send;
}

/// Catalog client over reqwest
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
    api_keys: ApiKeyStore,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: CatalogConfig, api_keys: ApiKeyStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_keys,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Search movies by title
    ///
    /// A malformed body yields an empty page rather than an error.
    pub async fn search(&self, query: &str, page: u32) -> CatalogResult<MoviePage> {
        lenient(self.fetch_listing("/search/movie", query, page).await)
    }

    /// List popular movies
    ///
    /// A malformed body yields an empty page rather than an error.
    pub async fn popular(&self, page: u32) -> CatalogResult<MoviePage> {
        lenient(self.fetch_listing("/movie/popular", "", page).await)
    }

    /// Fetch a single movie
    pub async fn detail(&self, id: u64) -> CatalogResult<Movie> {
        let api_key = self.api_key()?;
        info!("Fetching movie detail: {}", id);

        let response = self
            .http
            .get(self.config.endpoint(&format!("/movie/{id}")))
            .query(&[
                ("api_key", api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await
            .inspect_err(|e| error!("Error fetching movie {}: {}", id, e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Error fetching movie {}: status {}", id, status);
            return Err(CatalogError::Http(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Unreadable detail payload for movie {}: {}", id, e);
            CatalogError::MalformedPayload(e.to_string())
        })
    }

    async fn fetch_listing(&self, path: &str, query: &str, page: u32) -> CatalogResult<MoviePage> {
        let api_key = self.api_key()?;
        info!("Fetching {} page {} (query: {:?})", path, page, query);

        let page = page.to_string();
        let body = self
            .http
            .get(self.config.endpoint(path))
            .query(&[
                ("api_key", api_key.as_str()),
                ("language", self.config.language.as_str()),
                ("page", page.as_str()),
                ("query", query),
            ])
            .send()
            .await
            .inspect_err(|e| error!("Fetch error: {}", e))?
            .text()
            .await?;

        parse_listing(&body)
    }

    fn api_key(&self) -> CatalogResult<String> {
        self.api_keys
            .resolve(self.config.api_key.as_deref())
            .ok_or_else(|| {
                error!("Catalog API key not configured");
                CatalogError::MissingApiKey
            })
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_page(&self, query: &str, page: u32) -> CatalogResult<MoviePage> {
        if query.is_empty() {
            self.fetch_listing("/movie/popular", query, page).await
        } else {
            self.fetch_listing("/search/movie", query, page).await
        }
    }
}

/// Parse a listing body
///
/// Error bodies such as an invalid-key answer carry no `results` array and
/// are reported as malformed. Items that fail to decode are skipped.
pub fn parse_listing(body: &str) -> CatalogResult<MoviePage> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        error!("API Error: unreadable body: {}", e);
        CatalogError::MalformedPayload(e.to_string())
    })?;

    let Some(items) = value.get("results").and_then(Value::as_array) else {
        error!("API Error: {}", value);
        return Err(CatalogError::MalformedPayload(
            "missing results array".to_string(),
        ));
    };

    let results = items
        .iter()
        .filter_map(|item| {
            serde_json::from_value::<Movie>(item.clone())
                .inspect_err(|e| warn!("Skipping unreadable movie entry: {}", e))
                .ok()
        })
        .collect();

    let total_pages = value
        .get("total_pages")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(1);

    Ok(MoviePage {
        results,
        total_pages,
    })
}

fn lenient(result: CatalogResult<MoviePage>) -> CatalogResult<MoviePage> {
    match result {
        Err(CatalogError::MalformedPayload(_)) => Ok(MoviePage::empty()),
        other => other,
    }
}
