//! Merch listing handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::products::ALL_CATEGORIES;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::Product;
use crate::state::AppState;

/// Category filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    /// Selected category; blank means "Todos".
    #[must_use]
    pub fn selected(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(ALL_CATEGORIES)
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub selected: String,
    pub nonce: String,
}

/// Display products, optionally filtered by category.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog cannot be read.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let selected = query.selected();
    let products = state.catalog().products(Some(selected)).await?;
    let categories = state.catalog().categories().await?;

    Ok(ProductsIndexTemplate {
        products,
        categories,
        selected: selected.to_string(),
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_category_defaults_to_all() {
        assert_eq!(CategoryQuery::default().selected(), "Todos");
        let query = CategoryQuery {
            category: Some(" Remeras ".to_string()),
        };
        assert_eq!(query.selected(), "Remeras");
    }
}
