//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It only carries the database connection
//! pool, which is cheap to clone since clones share the pool.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,
}

impl AppState {
    /// Creates a new application state around the connected database.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
