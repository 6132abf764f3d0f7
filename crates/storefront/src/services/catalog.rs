//! Catalog reads with an in-process cache.
//!
//! The product list and the tour filter values are cached for 5 minutes using
//! `moka`. Everything else goes straight to the repositories.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use locura_core::{AlbumId, ProductId, TourId};

use crate::db::products::{categories, filter_by_category};
use crate::db::{GalleryRepository, ProductRepository, RepositoryError, TourQuery, TourRepository};
use crate::models::{Album, Photo, Product, Tour, TourFilters};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    TourFilters,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    TourFilters(TourFilters),
}

/// Read access to products, tours and the gallery.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogService {
    /// Create a catalog service backed by `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self { pool, cache }
    }

    /// All products, from cache when warm.
    async fn all_products(&self) -> Result<Arc<Vec<Product>>, RepositoryError> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = Arc::new(ProductRepository::new(&self.pool).list().await?);
        self.cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// Products in a category; `None` or "Todos" lists everything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let products = self.all_products().await?;
        Ok(filter_by_category(products.as_ref().clone(), category))
    }

    /// "Todos" followed by the distinct product categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let products = self.all_products().await?;
        Ok(categories(&products))
    }

    /// A single product, read fresh so stock and price are current.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, RepositoryError> {
        ProductRepository::new(&self.pool).get(id).await
    }

    /// Tours matching the destination and grupo filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn tours(&self, query: &TourQuery) -> Result<Vec<Tour>, RepositoryError> {
        TourRepository::new(&self.pool).list(query).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the tour does not exist.
    #[instrument(skip(self))]
    pub async fn tour(&self, id: TourId) -> Result<Tour, RepositoryError> {
        TourRepository::new(&self.pool).get(id).await
    }

    /// Distinct destinations and grupos across all tours.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn tour_filters(&self) -> Result<TourFilters, RepositoryError> {
        if let Some(CacheValue::TourFilters(filters)) = self.cache.get(&CacheKey::TourFilters).await
        {
            debug!("Cache hit for tour filters");
            return Ok(filters);
        }

        let tours = TourRepository::new(&self.pool)
            .list(&TourQuery::default())
            .await?;
        let filters = TourFilters::from_tours(&tours);
        self.cache
            .insert(CacheKey::TourFilters, CacheValue::TourFilters(filters.clone()))
            .await;
        Ok(filters)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn photos(&self) -> Result<Vec<Photo>, RepositoryError> {
        GalleryRepository::new(&self.pool).photos().await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn albums(&self) -> Result<Vec<Album>, RepositoryError> {
        GalleryRepository::new(&self.pool).albums().await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the album does not exist.
    pub async fn album(&self, id: AlbumId) -> Result<Album, RepositoryError> {
        GalleryRepository::new(&self.pool).album(id).await
    }
}
