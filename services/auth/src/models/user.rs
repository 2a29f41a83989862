//! Registered user model

use serde::{Deserialize, Serialize};

/// Entry of the registered-user list
///
/// The password is kept as entered; this store only gates a local client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
}

impl UserRecord {
    pub fn matches(&self, credentials: &Credentials) -> bool {
        self.email == credentials.email && self.password == credentials.password
    }
}

/// Sign-in or sign-up form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl From<Credentials> for UserRecord {
    fn from(credentials: Credentials) -> Self {
        Self {
            email: credentials.email,
            password: credentials.password,
        }
    }
}
