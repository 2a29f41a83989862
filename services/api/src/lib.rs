//! HTTP front end of the movie explorer

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
