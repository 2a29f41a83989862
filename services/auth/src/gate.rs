//! Access gate for protected screens

use crate::models::SessionStatus;

/// Screen shown to unauthenticated visitors
pub const SIGN_IN_PATH: &str = "/login";

/// Outcome of checking a protected navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session status is still being determined
    Placeholder,
    /// No active session; send the visitor to [`SIGN_IN_PATH`]
    RedirectToSignIn,
    /// Render the protected content
    Render,
}

/// Decide what a protected screen shows for the given session status
pub fn decide(status: &SessionStatus) -> GateDecision {
    match status {
        SessionStatus::Loading => GateDecision::Placeholder,
        SessionStatus::SignedOut => GateDecision::RedirectToSignIn,
        SessionStatus::SignedIn(_) => GateDecision::Render,
    }
}
