//! Request inspection and rewriting.
//!
//! # Responsibilities
//! - Extract routing-relevant information (hostname, path)
//! - Rewrite the request URI to the routed target, keeping the query
//! - Tag every request with an `x-request-id`
//!
//! # Design Decisions
//! - Host header first, URI authority second, empty hostname otherwise
//! - HTTP/2 requests carry the host in the URI only; it is copied into a
//!   `Host` header before the URI is rewritten to a bare path
//! - Ports and IPv6 brackets never reach the router
//! - Request ID added as early as possible for tracing

use axum::http::header::{HeaderName, HOST};
use axum::http::uri::{Authority, InvalidUri};
use axum::http::{HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::routing::RouteRequest;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer assigning a UUID v4 request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Request ID of a request, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Hostname the request was addressed to, without port.
pub fn request_hostname<B>(request: &Request<B>) -> String {
    let from_header = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.parse::<Authority>().ok())
        .map(|authority| authority.host().to_string());

    from_header
        .or_else(|| request.uri().host().map(str::to_string))
        .unwrap_or_default()
}

/// Insert a `Host` header from the URI authority when the client sent none.
pub fn ensure_host_header<B>(request: &mut Request<B>) {
    if request.headers().contains_key(HOST) {
        return;
    }
    let Some(value) = request
        .uri()
        .authority()
        .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
    else {
        return;
    };
    request.headers_mut().insert(HOST, value);
}

/// Routing input for an HTTP request.
pub fn route_request<B>(request: &Request<B>) -> RouteRequest {
    RouteRequest::new(request_hostname(request), request.uri().path())
}

/// URI for the routed target, carrying over the original query string.
pub fn rewrite_uri(original: &Uri, target_path: &str) -> Result<Uri, InvalidUri> {
    match original.query() {
        Some(query) => format!("{}?{}", target_path, query).parse(),
        None => target_path.parse(),
    }
}
