//! Integration tests for the Locura y Realidad storefront.
//!
//! These tests drive a running storefront over HTTP, so they are marked
//! `#[ignore]` and run explicitly.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate, seed and start the storefront
//! cargo run -p locura-cli -- migrate
//! cargo run -p locura-cli -- seed catalog crates/cli/seeds/catalog.yaml
//! cargo run -p locura-storefront
//!
//! # Run integration tests against it
//! STOREFRONT_BASE_URL=http://127.0.0.1:3000 cargo test -p locura-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Health checks, HTML pages, security headers
//! - `storefront_cart` - Session cart over the HTMX endpoints
//! - `storefront_checkout` - WhatsApp hand-off for orders and reservations
//! - `storefront_api` - JSON catalog API

#![cfg_attr(not(test), forbid(unsafe_code))]

use locura_core::ProductId;
use reqwest::{Client, redirect};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// A cookie-keeping HTTP client pointed at one storefront.
///
/// Each context has its own cookie jar, and so its own session cart.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from `STOREFRONT_BASE_URL` (default `http://127.0.0.1:3000`).
    ///
    /// Redirects are not followed so tests can inspect `Location` headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        let base_url = std::env::var("STOREFRONT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the product list from the JSON API.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    pub async fn products(&self) -> Result<Vec<ApiProduct>, reqwest::Error> {
        self.client
            .get(self.url("/api/products"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// First in-stock product, with the first of its sizes if it has any.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be fetched.
    pub async fn purchasable_product(
        &self,
    ) -> Result<Option<(ApiProduct, Option<String>)>, reqwest::Error> {
        Ok(self.products().await?.into_iter().find(|p| p.in_stock).map(|p| {
            let size = p.sizes.first().cloned();
            (p, size)
        }))
    }

    /// Add a product to this context's session cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        size: Option<&str>,
        quantity: u32,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut form = vec![
            ("product_id", product_id.to_string()),
            ("quantity", quantity.to_string()),
        ];
        if let Some(size) = size {
            form.push(("size", size.to_owned()));
        }
        self.client.post(self.url("/cart/add")).form(&form).send().await
    }

    /// Current cart as returned by `GET /api/cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a cart summary.
    pub async fn cart(&self) -> Result<ApiCart, reqwest::Error> {
        self.client
            .get(self.url("/api/cart"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Public product fields used by the tests.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: ProductId,
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub category: String,
    pub in_stock: bool,
    pub sizes: Vec<String>,
}

/// Cart line as returned by `GET /api/cart`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCartLine {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub size: Option<String>,
}

/// Cart summary as returned by `GET /api/cart`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCart {
    pub items: Vec<ApiCartLine>,
    pub item_count: u32,
    pub total: rust_decimal::Decimal,
}
