use std::sync::Arc;

use axum::extract::State;
use serde::Deserialize;

use crawlq_sampler::{ArmSummary, RewardReport};

use super::{check_query_len, require_non_empty, require_platform, IngestJson};
use crate::auth::IngestAuth;
use crate::response::{ApiError, ResponseData};
use crate::AppState;

// --- Request bodies ---

#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Shared by `:sample` and `:listTop`.
#[derive(Debug, Deserialize)]
pub struct SampleRequest {
    #[serde(default)]
    pub platform: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub items: Vec<RewardReport>,
}

// --- Handlers ---

pub async fn upsert_seeds(
    _auth: IngestAuth,
    State(state): State<Arc<AppState>>,
    IngestJson(req): IngestJson<UpsertRequest>,
) -> Result<ResponseData<bool>, ApiError> {
    let platform = require_platform(&req.platform)?;
    require_non_empty(&req.queries, "queries")?;
    for q in &req.queries {
        check_query_len(q)?;
    }

    state.sampler.upsert_seeds(platform, &req.queries).await?;
    Ok(ResponseData::ok(true))
}

pub async fn sample(
    _auth: IngestAuth,
    State(state): State<Arc<AppState>>,
    IngestJson(req): IngestJson<SampleRequest>,
) -> Result<ResponseData<Vec<String>>, ApiError> {
    let platform = require_platform(&req.platform)?;
    Ok(ResponseData::ok(
        state.sampler.sample_queries(platform, req.limit).await,
    ))
}

pub async fn report(
    _auth: IngestAuth,
    State(state): State<Arc<AppState>>,
    IngestJson(req): IngestJson<ReportRequest>,
) -> Result<ResponseData<bool>, ApiError> {
    let platform = require_platform(&req.platform)?;
    require_non_empty(&req.items, "items")?;
    for item in &req.items {
        check_query_len(&item.query)?;
    }

    state.sampler.report_rewards(platform, &req.items).await?;
    Ok(ResponseData::ok(true))
}

pub async fn list_top(
    _auth: IngestAuth,
    State(state): State<Arc<AppState>>,
    IngestJson(req): IngestJson<SampleRequest>,
) -> Result<ResponseData<Vec<ArmSummary>>, ApiError> {
    let platform = require_platform(&req.platform)?;
    let top = state.sampler.list_top(platform, req.limit).await?;
    Ok(ResponseData::ok(top))
}
