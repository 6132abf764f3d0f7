//! One write request at a time per session.
//!
//! A cart change loads the whole cart from the session, reduces it and the
//! session layer writes the whole record back after the handler returns. Two
//! overlapping POSTs on one session (a double-click on "Agregar al carrito")
//! would otherwise both start from the same cart and the later save would drop
//! the earlier change.
//!
//! This middleware sits outside the session layer, so the lock covers the load,
//! the dispatch and the final save. It is keyed by the session cookie value;
//! requests without a cookie start a fresh session and need no lock.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// Idle locks are dropped after this long.
const LOCK_IDLE: Duration = Duration::from_secs(300);

/// Per-session mutexes, created on demand.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(LOCK_IDLE)
                .build(),
        }
    }

    /// Wait until no other request holds the lock for `key`, then take it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = self
            .locks
            .get_with(key.to_owned(), async { Arc::new(Mutex::new(())) })
            .await;
        mutex.lock_owned().await
    }
}

/// Session cookie value, if the request carries one.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

/// Serialize unsafe-method requests that share a session cookie.
pub async fn session_write_lock_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method().is_safe() {
        return next.run(request).await;
    }
    let Some(key) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let _guard = state.session_locks().acquire(&key).await;
    next.run(request).await
}
