//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CSP nonce (generate per-request nonce for inline scripts)
//! 5. Security headers (CSP, frame and isolation policies)
//! 6. Session write lock (one POST at a time per session cookie)
//! 7. Session layer (tower-sessions with `PostgreSQL` store)
//! 8. Rate limiting on checkout and reservation submissions (governor)
//!
//! The [`SessionCart`] extractor reads and writes the cart held in the session.

pub mod cart;
pub mod csp;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_lock;

pub use cart::SessionCart;
pub use csp::{CspNonce, csp_nonce_middleware};
pub use rate_limit::checkout_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use session_lock::{SessionLocks, session_write_lock_middleware};
