//! Ingest HTTP surface for the adaptive query sampler.
//!
//! Four POST endpoints under `/v1/ingest/crawlerQueries:*`, all gated by the
//! `X-Ingest-Token` shared secret and answering with the `ResponseData` envelope.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crawlq_sampler::AdaptiveQuerySampler;

pub mod auth;
pub mod response;
pub mod rest;

pub struct AppState {
    pub sampler: AdaptiveQuerySampler,
    /// Expected `X-Ingest-Token`. Empty rejects every ingest call.
    pub ingest_token: String,
}

impl AppState {
    pub fn new(sampler: AdaptiveQuerySampler, ingest_token: impl Into<String>) -> Self {
        Self {
            sampler,
            ingest_token: ingest_token.into().trim().to_string(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    use rest::crawler_queries as cq;

    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Ingest
        .route("/v1/ingest/crawlerQueries:upsert", post(cq::upsert_seeds))
        .route("/v1/ingest/crawlerQueries:sample", post(cq::sample))
        .route("/v1/ingest/crawlerQueries:report", post(cq::report))
        .route("/v1/ingest/crawlerQueries:listTop", post(cq::list_top))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path + status + latency only; bodies carry the token-gated payloads.
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
