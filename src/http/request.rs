//! Request-side helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Resolve product IDs from path segments
//! - Decode JSON bodies into domain payloads
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An unparseable path ID is indistinguishable from a missing product (404)

use axum::{body::Body, http::HeaderValue, http::Request};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::http::response::ApiError;
use crate::model::ProductId;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Produces a fresh UUID v4 request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span wrapping every request, tagged with its request ID.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Resolve a path segment to a product ID.
pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse::<ProductId>().map_err(|e| {
        tracing::debug!(raw_id = %raw, error = %e, "Unparseable product id");
        ApiError::NotFound
    })
}

/// Decode a JSON body, reporting `context` to the client on failure.
pub fn decode_json<T: DeserializeOwned>(body: &[u8], context: &'static str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed request body");
        ApiError::Malformed(context)
    })
}
