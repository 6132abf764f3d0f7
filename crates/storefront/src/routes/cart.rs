//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session (see [`SessionCart`]).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use locura_core::{CartAction, CartLineItem, CartState, LineId, ProductId};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{CspNonce, SessionCart};
use crate::state::AppState;

/// HTMX event fired after every cart change so badges refresh.
const CART_UPDATED: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

impl AddToCartForm {
    /// Selected size, ignoring the empty "choose a size" option.
    fn size(&self) -> Option<&str> {
        self.size.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Update cart form data. Zero or negative quantities remove the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartState,
    pub nonce: String,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartState,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(cart, nonce))]
pub async fn show(cart: SessionCart, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    CartShowTemplate {
        cart: cart.into_state(),
        nonce,
    }
}

/// Add a product to the cart (HTMX).
///
/// The product is read fresh from the catalog so the line carries the current
/// name and price. Returns the count badge and triggers `cart-updated`.
///
/// # Errors
///
/// Returns `AppError::Cart` when the product is out of stock or the size
/// selection is missing or unknown, and `AppError::Database` when the product
/// does not exist.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.catalog().product(form.product_id).await?;
    let line = CartLineItem::from_snapshot(
        &product.snapshot(),
        form.size(),
        form.quantity.unwrap_or(1),
    )?;

    let count = cart.dispatch(CartAction::AddItem(line)).await?.item_count();

    Ok((AppendHeaders([CART_UPDATED]), CartCountTemplate { count }))
}

/// Set a line's quantity (HTMX). Returns the cart items fragment.
///
/// # Errors
///
/// Returns `AppError::Session` if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn update(
    mut cart: SessionCart,
    Form(form): Form<UpdateCartForm>,
) -> Result<impl IntoResponse, AppError> {
    let action = CartAction::UpdateQuantity {
        id: LineId::from(form.line_id),
        quantity: form.quantity,
    };
    let cart = cart.dispatch(action).await?.clone();

    Ok((AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }))
}

/// Remove a line (HTMX). Returns the cart items fragment.
///
/// # Errors
///
/// Returns `AppError::Session` if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse, AppError> {
    let action = CartAction::RemoveItem(LineId::from(form.line_id));
    let cart = cart.dispatch(action).await?.clone();

    Ok((AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }))
}

/// Empty the cart (HTMX). Returns the cart items fragment.
///
/// # Errors
///
/// Returns `AppError::Session` if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn clear(mut cart: SessionCart) -> Result<impl IntoResponse, AppError> {
    let cart = cart.dispatch(CartAction::Clear).await?.clone();

    Ok((AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }))
}

/// Get cart count badge (HTMX).
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        count: cart.state().item_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_size_is_no_size() {
        let form = AddToCartForm {
            product_id: ProductId::new(1),
            size: Some("  ".to_string()),
            quantity: None,
        };
        assert_eq!(form.size(), None);

        let form = AddToCartForm {
            size: Some("M".to_string()),
            ..form
        };
        assert_eq!(form.size(), Some("M"));
    }
}
