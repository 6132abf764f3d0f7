//! Photo and album repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use locura_core::AlbumId;

use super::RepositoryError;
use crate::models::{Album, AlbumPhoto, Photo};

/// Raw album row; photos are stored as an ordered JSONB array.
#[derive(sqlx::FromRow)]
struct AlbumRow {
    id: AlbumId,
    title: String,
    description: Option<String>,
    location: Option<String>,
    photos: Json<Vec<AlbumPhoto>>,
    created_at: DateTime<Utc>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            photos: row.photos.0,
            created_at: row.created_at,
        }
    }
}

/// Repository for gallery reads.
pub struct GalleryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GalleryRepository<'a> {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List standalone photos, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn photos(&self) -> Result<Vec<Photo>, RepositoryError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT id, src, alt, title, location, created_at FROM photos ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(photos)
    }

    /// List albums with their photos, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn albums(&self) -> Result<Vec<Album>, RepositoryError> {
        let rows = sqlx::query_as::<_, AlbumRow>(
            "SELECT id, title, description, location, photos, created_at FROM albums ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Album::from).collect())
    }

    /// Get an album by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no album has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(album_id = %id))]
    pub async fn album(&self, id: AlbumId) -> Result<Album, RepositoryError> {
        sqlx::query_as::<_, AlbumRow>(
            "SELECT id, title, description, location, photos, created_at FROM albums WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Album::from)
        .ok_or(RepositoryError::NotFound)
    }
}
