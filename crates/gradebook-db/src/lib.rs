//! # Gradebook DB
//!
//! Database pool initialization for the Gradebook API, using SQLx with
//! PostgreSQL.
//!
//! # Example
//!
//! ```ignore
//! use gradebook_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     // Use pool for database operations
//! }
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

/// Initializes a PostgreSQL connection pool.
///
/// Reads the connection string from `DATABASE_URL` and the pool size from
/// `DATABASE_MAX_CONNECTIONS` (default 10). The returned pool is cheaply
/// cloneable and should be created once during startup and shared through
/// the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection cannot be
/// established; the service cannot run without its store.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
