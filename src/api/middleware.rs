//! API Middleware
//!
//! Request context and request logging middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::domain::RequestContext;

/// Header carrying the correlation ID in both directions
pub const CORRELATION_HEADER: &str = "x-correlation-id";

// =========================================================================
// Request Context Middleware
// =========================================================================

/// Attach a `RequestContext` to the request and echo its correlation ID
pub async fn context_middleware(mut request: Request<Body>, next: Next) -> Response {
    // Extract correlation ID or generate new one
    let correlation_id = request
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let context = RequestContext::new().with_correlation_id(correlation_id);
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }

    response
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Client headers never written to the log
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key"];

/// Headers as logged, with credentials redacted
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid utf8]")
            };
            (name.to_string(), value.to_string())
        })
        .collect()
}

/// Owner key addressed by an owner earnings path
pub fn owner_key_from_path(path: &str) -> Option<&str> {
    let (_, rest) = path.split_once("/admin/earnings/owners/")?;
    let key = rest.trim_end_matches('/');
    (!key.is_empty() && !key.contains('/')).then_some(key)
}

/// Log each report request with its route, owner and outcome
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string());
    let owner = owner_key_from_path(&path).map(str::to_string);
    let correlation_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.correlation_id);

    tracing::debug!(
        correlation_id = ?correlation_id,
        headers = ?mask_headers_for_logging(request.headers()),
        "Request headers"
    );

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::warn!(
            %method,
            %path,
            route = ?route,
            owner = ?owner,
            status = status.as_u16(),
            elapsed_ms,
            correlation_id = ?correlation_id,
            "Report request failed"
        );
    } else {
        tracing::info!(
            %method,
            %path,
            route = ?route,
            owner = ?owner,
            status = status.as_u16(),
            elapsed_ms,
            correlation_id = ?correlation_id,
            "Report request served"
        );
    }

    response
}
