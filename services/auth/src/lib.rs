//! Local authentication for the movie explorer
//!
//! Registered users and the active session live in [`common::LocalStorage`].
//! There is no server-side identity; the [`gate`] module only decides what a
//! protected screen should show.

pub mod error;
pub mod gate;
pub mod models;
pub mod session;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use gate::{GateDecision, decide};
pub use models::{Credentials, Session, SessionStatus, UserRecord};
pub use session::SessionStore;
