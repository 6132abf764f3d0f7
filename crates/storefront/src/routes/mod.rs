//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Redirect to /products
//! GET  /health, /health/ready     - Health checks (registered in main)
//!
//! # Catalog (HTML)
//! GET  /products[?category=]      - Merch listing
//! GET  /tours[?destination=&grupo=] - Tour listing
//! GET  /gallery                   - Photos and albums
//!
//! # Cart (HTMX fragments)
//! GET  /cart                      - Cart page
//! POST /cart/add                  - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update               - Set quantity (returns cart_items fragment)
//! POST /cart/remove               - Remove line (returns cart_items fragment)
//! POST /cart/clear                - Empty cart (returns cart_items fragment)
//! GET  /cart/count                - Cart count badge (fragment)
//!
//! # WhatsApp hand-off (rate limited POSTs)
//! GET  /checkout                  - Checkout form
//! POST /checkout                  - Redirect to wa.me with the order message
//! GET  /tours/{id}/reserve        - Reservation form
//! POST /tours/{id}/reserve        - Redirect to wa.me with the reservation message
//!
//! # JSON API
//! GET  /api/cart
//! GET  /api/products[?category=], /api/products/categories, /api/products/{id}
//! GET  /api/tours[?destination=&grupo=], /api/tours/filters, /api/tours/{id}
//! GET  /api/photos, /api/albums, /api/albums/{id}
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod gallery;
pub mod products;
pub mod tours;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::checkout_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the tour routes router.
pub fn tour_routes() -> Router<AppState> {
    Router::new().route("/", get(tours::index)).route(
        "/{id}/reserve",
        get(tours::reserve_form).merge(post(tours::reserve).layer(checkout_rate_limiter())),
    )
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(api::cart))
        .route("/products", get(api::products))
        .route("/products/categories", get(api::categories))
        .route("/products/{id}", get(api::product))
        .route("/tours", get(api::tours))
        .route("/tours/filters", get(api::tour_filters))
        .route("/tours/{id}", get(api::tour))
        .route("/photos", get(api::photos))
        .route("/albums", get(api::albums))
        .route("/albums/{id}", get(api::album))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/products") }))
        .route("/products", get(products::index))
        .route("/gallery", get(gallery::index))
        .nest("/cart", cart_routes())
        .route(
            "/checkout",
            get(checkout::show).merge(post(checkout::submit).layer(checkout_rate_limiter())),
        )
        .nest("/tours", tour_routes())
        .nest("/api", api_routes())
}
