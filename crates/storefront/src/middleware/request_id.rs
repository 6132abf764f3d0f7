//! Request ID middleware for log and error correlation.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header carrying the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID we accept before generating our own.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Reuse a sane upstream `x-request-id` or generate a UUID v4.
fn request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_UPSTREAM_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Tag the request span and Sentry scope with a request ID and echo it back
/// in the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id(&request);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/cart");
        if let Some(value) = header {
            builder = builder.header("x-request-id", value);
        }
        builder.body(Body::empty()).unwrap_or_default()
    }

    #[test]
    fn test_upstream_id_is_reused() {
        assert_eq!(request_id(&request_with(Some("cf-abc123"))), "cf-abc123");
    }

    #[test]
    fn test_missing_or_oversized_id_is_generated() {
        let generated = request_id(&request_with(None));
        assert!(Uuid::parse_str(&generated).is_ok());

        let long = "a".repeat(MAX_UPSTREAM_ID_LEN + 1);
        let generated = request_id(&request_with(Some(&long)));
        assert!(Uuid::parse_str(&generated).is_ok());
    }
}
