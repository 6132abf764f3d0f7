//! Read-only JSON API.
//!
//! Mirrors the HTML pages for clients that render on their own. Internal
//! product fields (cost price, CDN IDs) are never serialized.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use locura_core::{AlbumId, CartLineItem, ProductId, TourId};

use super::products::CategoryQuery;
use crate::db::TourQuery;
use crate::error::Result;
use crate::middleware::SessionCart;
use crate::models::{Album, Photo, Product, Tour, TourFilters};
use crate::state::AppState;

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLineItem>,
    pub item_count: u32,
    pub total: Decimal,
}

/// `GET /api/cart`
#[instrument(skip(cart))]
pub async fn cart(cart: SessionCart) -> Json<CartSummary> {
    let state = cart.into_state();
    Json(CartSummary {
        item_count: state.item_count(),
        total: state.total(),
        items: state.items().to_vec(),
    })
}

/// `GET /api/products[?category=]`
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().products(Some(query.selected())).await?))
}

/// `GET /api/products/categories`
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().categories().await?))
}

/// `GET /api/products/{id}`
#[instrument(skip(state))]
pub async fn product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog().product(id).await?))
}

/// `GET /api/tours[?destination=&grupo=]`
#[instrument(skip(state))]
pub async fn tours(
    State(state): State<AppState>,
    Query(query): Query<TourQuery>,
) -> Result<Json<Vec<Tour>>> {
    Ok(Json(state.catalog().tours(&query).await?))
}

/// `GET /api/tours/filters`
#[instrument(skip(state))]
pub async fn tour_filters(State(state): State<AppState>) -> Result<Json<TourFilters>> {
    Ok(Json(state.catalog().tour_filters().await?))
}

/// `GET /api/tours/{id}`
#[instrument(skip(state))]
pub async fn tour(State(state): State<AppState>, Path(id): Path<TourId>) -> Result<Json<Tour>> {
    Ok(Json(state.catalog().tour(id).await?))
}

/// `GET /api/photos`
#[instrument(skip(state))]
pub async fn photos(State(state): State<AppState>) -> Result<Json<Vec<Photo>>> {
    Ok(Json(state.catalog().photos().await?))
}

/// `GET /api/albums`
#[instrument(skip(state))]
pub async fn albums(State(state): State<AppState>) -> Result<Json<Vec<Album>>> {
    Ok(Json(state.catalog().albums().await?))
}

/// `GET /api/albums/{id}`
#[instrument(skip(state))]
pub async fn album(State(state): State<AppState>, Path(id): Path<AlbumId>) -> Result<Json<Album>> {
    Ok(Json(state.catalog().album(id).await?))
}
