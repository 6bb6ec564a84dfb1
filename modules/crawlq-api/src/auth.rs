use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::response::ApiError;
use crate::AppState;

pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

/// Caller presented the shared ingest secret. Extract this in ingest handlers.
pub struct IngestAuth;

impl FromRequestParts<Arc<AppState>> for IngestAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(INGEST_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if is_authorized(&state.ingest_token, provided) {
            Ok(IngestAuth)
        } else {
            warn!(path = %parts.uri.path(), "Rejected ingest call with bad token");
            Err(ApiError::Unauthorized)
        }
    }
}

/// An unset server token rejects everything; otherwise trimmed values must match.
pub fn is_authorized(expected: &str, provided: &str) -> bool {
    let expected = expected.trim();
    let provided = provided.trim();
    if expected.is_empty() || provided.is_empty() {
        return false;
    }
    constant_time_eq(expected.as_bytes(), provided.as_bytes())
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
