//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    /// Absent on records written before timestamps were kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn start(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            signed_in_at: Some(Utc::now()),
        }
    }
}

/// What the session store currently knows about the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Persisted state has not been restored yet
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&Session> {
        match self {
            SessionStatus::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}
