//! Paginated browsing with cooperative cancellation
//!
//! [`BrowseFlow`] owns the result list for the current query. Each fetch runs
//! with its own [`CancelToken`]; starting a new fetch cancels the previous
//! token, and a response whose token was cancelled is dropped without
//! touching the list. The request itself still runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::client::CatalogSource;
use crate::demo::demo_movies;
use crate::error::CatalogError;
use crate::models::Movie;

/// Cancellation flag shared between a fetch and the flow that started it
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn same(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What happened to a requested fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the list
    Applied,
    /// A newer fetch superseded this one; its response was dropped
    Discarded,
    /// No request was made
    Skipped,
}

/// Read-only view of the flow for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseSnapshot {
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub showing_demo: bool,
    pub search_disabled: bool,
    pub can_load_more: bool,
}

#[derive(Debug)]
struct BrowseState {
    query: String,
    page: u32,
    total_pages: u32,
    movies: Vec<Movie>,
    loading: bool,
    showing_demo: bool,
    search_disabled: bool,
    started: bool,
    in_flight: Option<CancelToken>,
}

impl BrowseState {
    fn can_load_more(&self) -> bool {
        self.page < self.total_pages && !self.showing_demo
    }

    /// Go back to page one of the current query with an empty list
    fn reset(&mut self) {
        self.page = 1;
        self.total_pages = 1;
        self.movies.clear();
    }
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_pages: 1,
            movies: Vec::new(),
            loading: false,
            showing_demo: false,
            search_disabled: false,
            started: false,
            in_flight: None,
        }
    }
}

/// Search and popular listing state machine
#[derive(Debug)]
pub struct BrowseFlow<S> {
    source: S,
    state: Mutex<BrowseState>,
}

/// Marks a fetch as in flight until its response is handled
///
/// Dropped unsettled (the caller went away mid-request), it clears the
/// loading flag and steps back to the last page actually applied, provided
/// no newer fetch has taken over.
struct InFlight<'a> {
    state: &'a Mutex<BrowseState>,
    token: CancelToken,
    page: u32,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state
            .in_flight
            .as_ref()
            .is_some_and(|current| current.same(&self.token))
        {
            return;
        }
        warn!("Fetch of page {} abandoned before completion", self.page);
        state.in_flight = None;
        state.loading = false;
        if self.page > 1 {
            state.page = self.page - 1;
        } else {
            state.started = false;
        }
    }
}

impl<S: CatalogSource> BrowseFlow<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(BrowseState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot(&self) -> BrowseSnapshot {
        let state = self.lock();
        BrowseSnapshot {
            query: state.query.clone(),
            page: state.page,
            total_pages: state.total_pages,
            movies: state.movies.clone(),
            loading: state.loading,
            showing_demo: state.showing_demo,
            search_disabled: state.search_disabled,
            can_load_more: state.can_load_more(),
        }
    }

    /// Fetch the first page of the current query if nothing was fetched yet
    pub async fn ensure_loaded(&self) -> FetchOutcome {
        {
            let mut state = self.lock();
            if state.started {
                return FetchOutcome::Skipped;
            }
            state.reset();
        }
        self.fetch().await
    }

    /// Switch to a new query, starting again from page one
    ///
    /// An empty query lists popular movies. Setting the current query again
    /// does nothing once it has been fetched, and so does any query while
    /// search is disabled.
    pub async fn set_query(&self, query: impl Into<String>) -> FetchOutcome {
        let query = query.into();
        {
            let mut state = self.lock();
            if state.search_disabled {
                debug!("Search disabled, ignoring query {:?}", query);
                return FetchOutcome::Skipped;
            }
            if state.started && state.query == query {
                return FetchOutcome::Skipped;
            }
            info!("Query changed to {:?}", query);
            state.query = query;
            state.reset();
        }
        self.fetch().await
    }

    /// Fetch the next page and append it
    pub async fn load_more(&self) -> FetchOutcome {
        {
            let mut state = self.lock();
            if state.loading || !state.can_load_more() {
                return FetchOutcome::Skipped;
            }
            state.page += 1;
        }
        self.fetch().await
    }

    /// Fetch the first page of the current query again
    ///
    /// This is the only way out of demo content.
    pub async fn refresh(&self) -> FetchOutcome {
        {
            let mut state = self.lock();
            state.showing_demo = false;
            state.search_disabled = false;
            state.reset();
        }
        self.fetch().await
    }

    async fn fetch(&self) -> FetchOutcome {
        let token = CancelToken::new();
        let (query, page) = {
            let mut state = self.lock();
            if let Some(previous) = state.in_flight.replace(token.clone()) {
                previous.cancel();
            }
            state.started = true;
            state.loading = true;
            (state.query.clone(), state.page)
        };

        let mut in_flight = InFlight {
            state: &self.state,
            token: token.clone(),
            page,
            settled: false,
        };
        let result = self.source.fetch_page(&query, page).await;
        in_flight.settled = true;

        let mut state = self.lock();
        if token.is_cancelled() {
            debug!("Discarding stale response for {:?} page {}", query, page);
            return FetchOutcome::Discarded;
        }
        state.in_flight = None;
        state.loading = false;

        match result {
            Ok(listing) => {
                state.total_pages = listing.total_pages.max(1);
                if page == 1 {
                    state.movies = listing.results;
                } else {
                    state.movies.extend(listing.results);
                }
            }
            Err(CatalogError::MissingApiKey) => {
                error!("TMDB API key not configured");
            }
            Err(CatalogError::Transport(e)) if page == 1 => {
                warn!("Catalog unreachable, showing demo content: {}", e);
                state.movies = demo_movies();
                state.total_pages = 1;
                state.showing_demo = true;
                state.search_disabled = true;
            }
            Err(e) => {
                error!("Failed to load {:?} page {}: {}", query, page, e);
                if page == 1 {
                    state.movies.clear();
                }
            }
        }

        FetchOutcome::Applied
    }

    fn lock(&self) -> MutexGuard<'_, BrowseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
