//! Session management on top of local storage

use std::sync::{PoisonError, RwLock};

use common::LocalStorage;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{Credentials, Session, SessionStatus, UserRecord};
use crate::validation::validate_credentials;

/// Storage key of the registered-user list
pub const USERS_KEY: &str = "auth_users";
/// Storage key of the active session
pub const SESSION_KEY: &str = "auth_session";

/// Session store for registered users and the single active session
///
/// Constructed once at startup and shared by reference. The status starts
/// as [`SessionStatus::Loading`] until [`SessionStore::restore`] runs.
#[derive(Debug)]
pub struct SessionStore {
    storage: LocalStorage,
    status: RwLock<SessionStatus>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            status: RwLock::new(SessionStatus::Loading),
        }
    }

    /// Create a store and immediately restore the persisted session
    pub fn restored(storage: LocalStorage) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    /// Load the persisted session and resolve the status
    pub fn restore(&self) -> SessionStatus {
        let status = match self.storage.read::<Option<Session>>(SESSION_KEY, None) {
            Some(session) => {
                info!("Restored session for {}", session.email);
                SessionStatus::SignedIn(session)
            }
            None => SessionStatus::SignedOut,
        };
        self.set_status(status.clone());
        status
    }

    /// Register a new user and sign them in
    pub fn sign_up(&self, credentials: Credentials) -> AuthResult<Session> {
        validate_credentials(&credentials)?;

        let mut users = self.users();
        if users.iter().any(|u| u.email == credentials.email) {
            warn!("Sign-up rejected, email already registered: {}", credentials.email);
            return Err(AuthError::DuplicateEmail);
        }

        info!("Registering user: {}", credentials.email);
        let session = Session::start(credentials.email.clone());
        users.push(UserRecord::from(credentials));
        self.storage.write(USERS_KEY, &users);
        self.establish(session.clone());

        Ok(session)
    }

    /// Sign in with an exact email and password match
    pub fn sign_in(&self, credentials: Credentials) -> AuthResult<Session> {
        if !self.users().iter().any(|u| u.matches(&credentials)) {
            warn!("Sign-in failed for {}", credentials.email);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Sign-in for {}", credentials.email);
        let session = Session::start(credentials.email);
        self.establish(session.clone());

        Ok(session)
    }

    /// Clear the active session. Always succeeds.
    pub fn sign_out(&self) {
        if let Some(session) = self.current_user() {
            info!("Sign-out for {}", session.email);
        }
        self.storage.remove(SESSION_KEY);
        self.set_status(SessionStatus::SignedOut);
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<Session> {
        self.status().user().cloned()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget every registered user and the active session
    pub fn clear(&self) {
        info!("Clearing all users and the active session");
        self.storage.remove(USERS_KEY);
        self.storage.remove(SESSION_KEY);
        self.set_status(SessionStatus::SignedOut);
    }

    fn users(&self) -> Vec<UserRecord> {
        self.storage.read(USERS_KEY, Vec::new())
    }

    fn establish(&self, session: Session) {
        self.storage.write(SESSION_KEY, &session);
        self.set_status(SessionStatus::SignedIn(session));
    }

    fn set_status(&self, status: SessionStatus) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
    }
}
