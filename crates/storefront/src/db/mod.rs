//! Database operations for the storefront `PostgreSQL` database.
//!
//! # Tables
//!
//! - `products` - Merch catalog (sizes stored as `TEXT[]`)
//! - `tours` - Music tours with free-text date ranges
//! - `photos` - Standalone gallery photos
//! - `albums` - Photo albums (photos stored as ordered `JSONB`)
//! - `tower_sessions.session` - Session storage (carts live here)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p locura-cli -- migrate
//! ```

pub mod gallery;
pub mod products;
pub mod tours;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use gallery::GalleryRepository;
pub use products::ProductRepository;
pub use tours::{TourQuery, TourRepository};

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
