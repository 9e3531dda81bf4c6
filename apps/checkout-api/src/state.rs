//! Application state management.
//!
//! This module defines the shared application state passed to all request
//! handlers: the loaded configuration and the PostgreSQL connection pool.

/// Shared application state.
///
/// Cloning is cheap: the connection pool is an Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
