//! Session-backed cart extractor.
//!
//! The cart lives in the tower-sessions session under `session_keys::CART`.
//! Handlers take a [`SessionCart`], dispatch actions on it and the new state is
//! written back to the session before the response is built.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use locura_core::{CartAction, CartState, CartStore};

use crate::error::add_breadcrumb;
use crate::models::session_keys;

/// The shopper's cart, loaded from the session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: SessionCart) -> Result<impl IntoResponse, AppError> {
///     let count = cart.dispatch(CartAction::Clear).await?.item_count();
///     Ok(format!("{count} items"))
/// }
/// ```
pub struct SessionCart {
    session: Session,
    store: CartStore,
}

/// Rejection when the session layer is missing from the stack.
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("Session not found in request extensions - session layer missing");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl SessionCart {
    fn new(session: Session, state: CartState) -> Self {
        let mut store = CartStore::with_state(state);
        store.subscribe(|state, action| {
            let count = state.item_count().to_string();
            add_breadcrumb(
                "cart",
                action.name(),
                Some(&[("item_count", count.as_str())]),
            );
        });
        Self { session, store }
    }

    /// Load the cart stored in `session`.
    pub(crate) async fn load(session: Session) -> Self {
        let cart = load_cart(&session).await;
        Self::new(session, cart)
    }

    /// Current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        self.store.state()
    }

    /// Apply an action and persist the resulting cart in the session.
    ///
    /// # Errors
    ///
    /// Returns the session error if the cart cannot be written back.
    pub async fn dispatch(
        &mut self,
        action: CartAction,
    ) -> Result<&CartState, tower_sessions::session::Error> {
        tracing::debug!(action = action.name(), "Cart action");
        self.store.dispatch(action);
        self.session
            .insert(session_keys::CART, self.store.state())
            .await?;
        Ok(self.store.state())
    }

    /// Take the cart contents, leaving the session untouched.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.store.into_state()
    }
}

/// Read the stored cart. A missing or unreadable cart starts empty.
async fn load_cart(session: &Session) -> CartState {
    match session.get::<CartState>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable cart in session: {e}");
            CartState::default()
        }
    }
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(MissingSession)?;

        Ok(Self::load(session).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use locura_core::{CartLineItem, ProductId};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn remera() -> CartLineItem {
        CartLineItem::new(
            ProductId::new(2),
            "Remera",
            Decimal::from(20),
            Some("M".to_owned()),
        )
    }

    #[tokio::test]
    async fn test_dispatch_persists_cart_in_session() {
        let session = session();
        let mut cart = SessionCart::new(session.clone(), load_cart(&session).await);

        let state = cart.dispatch(CartAction::AddItem(remera())).await.unwrap();
        assert_eq!(state.item_count(), 1);

        let stored = load_cart(&session).await;
        assert_eq!(stored.item_count(), 1);
        assert_eq!(stored.total(), Decimal::from(20));
    }

    #[tokio::test]
    async fn test_empty_session_starts_empty_cart() {
        let cart = load_cart(&session()).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_cart_starts_empty() {
        let session = session();
        session
            .insert(session_keys::CART, "not a cart")
            .await
            .unwrap();
        assert!(load_cart(&session).await.is_empty());
    }
}
