//! Navigation surface of the movie explorer
//!
//! `/login` and `/register` are public. Browse, favorites, detail and
//! settings routes sit behind [`access_gate`]. Anything else is a 404.

use auth::{Credentials, Session};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use catalog::{Movie, MovieDetailView};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::access_gate,
    models::{
        ApiKeyRequest, BrowseParams, BrowseView, FavoritesView, FormView, SearchRequest,
        SessionResponse,
    },
    state::AppState,
};

/// Create the router for the explorer
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/", get(browse))
        .route("/search", post(search))
        .route("/load-more", post(load_more))
        .route("/refresh", post(refresh))
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/:id", delete(remove_favorite))
        .route("/favorites/:id/toggle", post(toggle_favorite))
        .route("/movie/:id", get(movie_detail))
        .route("/settings/api-key", put(save_api_key))
        .route_layer(middleware::from_fn_with_state(state.clone(), access_gate));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", post(logout))
        .merge(protected_routes)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "movie-explorer"
    }))
}

/// Sign-in screen; signed-in users go home
pub async fn login_form(State(state): State<AppState>) -> Response {
    if state.sessions.current_user().is_some() {
        return Redirect::to("/").into_response();
    }
    Json(FormView {
        page: "login",
        action: "/login",
        fields: ["email", "password"],
    })
    .into_response()
}

/// Sign-up screen; signed-in users go home
pub async fn register_form(State(state): State<AppState>) -> Response {
    if state.sessions.current_user().is_some() {
        return Redirect::to("/").into_response();
    }
    Json(FormView {
        page: "register",
        action: "/register",
        fields: ["email", "password"],
    })
    .into_response()
}

/// Sign in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.sessions.sign_in(payload)?;
    Ok(Json(session.into()))
}

/// Register and sign in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> ApiResult<impl IntoResponse> {
    let session = state.sessions.sign_up(payload)?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// Sign out; always succeeds
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.sessions.sign_out();
    Json(json!({"message": "Signed out"}))
}

/// Browse screen, optionally switching to the query in `?q=`
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Json<BrowseView> {
    match params.q {
        Some(query) => state.browse.set_query(query).await,
        None => state.browse.ensure_loaded().await,
    };
    Json(browse_view(&state))
}

/// Start a new search
pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Json<BrowseView> {
    state.browse.set_query(payload.query).await;
    Json(browse_view(&state))
}

/// Append the next page of results
pub async fn load_more(State(state): State<AppState>) -> Json<BrowseView> {
    state.browse.load_more().await;
    Json(browse_view(&state))
}

/// Fetch the first page of the current query again
pub async fn refresh(State(state): State<AppState>) -> Json<BrowseView> {
    state.browse.refresh().await;
    Json(browse_view(&state))
}

/// The signed-in user's favorites, newest first
pub async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesView> {
    Json(FavoritesView::new(
        &state.favorites.list(),
        state.catalog_config(),
    ))
}

/// Add a movie to favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> impl IntoResponse {
    let added = state.favorites.add(movie);
    Json(json!({ "added": added }))
}

/// Remove a movie from favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let removed = state.favorites.remove(id);
    Json(json!({ "removed": removed }))
}

/// Flip a movie's favorite status
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(movie): Json<Movie>,
) -> ApiResult<impl IntoResponse> {
    if movie.id != id {
        return Err(ApiError::BadRequest(format!(
            "Movie id {} does not match path id {}",
            movie.id, id
        )));
    }
    let is_favorite = state.favorites.toggle(movie);
    Ok(Json(json!({ "is_favorite": is_favorite })))
}

/// Movie detail screen
pub async fn movie_detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MovieDetailView>> {
    info!("{} opened movie {}", session.email, id);
    let movie = state.catalog().detail(id).await?;
    Ok(Json(MovieDetailView::new(
        &movie,
        state.catalog_config(),
        state.favorites.has(movie.id),
    )))
}

/// Store the catalog API key entered by the user
pub async fn save_api_key(
    State(state): State<AppState>,
    Json(payload): Json<ApiKeyRequest>,
) -> impl IntoResponse {
    state.api_keys.save(&payload.api_key);
    Json(json!({ "configured": state.api_keys.get().is_some() }))
}

/// Catch-all for unknown paths
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    warn!("404: no route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
        })),
    )
}

fn browse_view(state: &AppState) -> BrowseView {
    BrowseView::new(
        state.browse.snapshot(),
        state.catalog_config(),
        &state.favorites,
    )
}
