//! Authentication models

pub mod session;
pub mod user;

// Re-export for convenience
pub use session::{Session, SessionStatus};
pub use user::{Credentials, UserRecord};
