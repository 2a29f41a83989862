//! Access gate for protected routes

use auth::{GateDecision, decide, gate::SIGN_IN_PATH};
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::debug;

use crate::state::AppState;

/// Redirect unauthenticated requests to the sign-in screen
///
/// While the session is still being restored the request gets a
/// placeholder answer instead. The signed-in [`auth::Session`] is inserted
/// into the request extensions.
pub async fn access_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let status = state.sessions.status();

    match decide(&status) {
        GateDecision::Placeholder => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "1")],
            Json(json!({ "status": "loading" })),
        )
            .into_response(),
        GateDecision::RedirectToSignIn => {
            debug!("No session, redirecting {} to sign-in", req.uri().path());
            Redirect::to(SIGN_IN_PATH).into_response()
        }
        GateDecision::Render => {
            if let Some(session) = status.user() {
                req.extensions_mut().insert(session.clone());
            }
            next.run(req).await
        }
    }
}
