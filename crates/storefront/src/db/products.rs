//! Product repository.

use sqlx::PgPool;
use tracing::instrument;

use locura_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

/// Label of the catch-all category shown before the real ones.
pub const ALL_CATEGORIES: &str = "Todos";

const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, cost_price, image, \
     image_public_id, category, rating, in_stock, sizes, created_at";

/// Repository for product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

/// Keep the products of one category. `None` or "Todos" keeps everything.
#[must_use]
pub fn filter_by_category(products: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category.map(str::trim) {
        None | Some("" | ALL_CATEGORIES) => products,
        Some(category) => products
            .into_iter()
            .filter(|product| product.category == category)
            .collect(),
    }
}

/// "Todos" followed by each distinct category in the order it first appears.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_owned()];
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}
