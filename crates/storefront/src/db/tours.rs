//! Tour repository.

use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use locura_core::TourId;

use super::RepositoryError;
use crate::models::Tour;

const TOUR_COLUMNS: &str =
    "id, title, description, destination, dates, price, image, grupo, created_at, updated_at";

/// Optional filters for the tour listing. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourQuery {
    pub destination: Option<String>,
    pub grupo: Option<String>,
}

impl TourQuery {
    fn destination(&self) -> Option<&str> {
        non_blank(self.destination.as_deref())
    }

    fn grupo(&self) -> Option<&str> {
        non_blank(self.grupo.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Repository for tour reads.
pub struct TourRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TourRepository<'a> {
    /// Create a new tour repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List tours matching the query, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &TourQuery) -> Result<Vec<Tour>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {TOUR_COLUMNS} FROM tours"));
        let mut has_where = false;

        if let Some(destination) = query.destination() {
            builder.push(" WHERE destination = ").push_bind(destination);
            has_where = true;
        }
        if let Some(grupo) = query.grupo() {
            builder
                .push(if has_where { " AND " } else { " WHERE " })
                .push("grupo = ")
                .push_bind(grupo);
        }
        builder.push(" ORDER BY id");

        let tours = builder.build_query_as::<Tour>().fetch_all(self.pool).await?;
        Ok(tours)
    }

    /// Get a tour by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no tour has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(tour_id = %id))]
    pub async fn get(&self, id: TourId) -> Result<Tour, RepositoryError> {
        let sql = format!("SELECT {TOUR_COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
