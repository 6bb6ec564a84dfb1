use serde::{Deserialize, Serialize};

/// Envelope every ingest endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData<T> {
    pub success: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// One crawl outcome to report back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub reward: f64,
    pub trials: i64,
}

/// An arm as returned by `:listTop`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStat {
    pub platform: String,
    pub query: String,
    pub mean_reward: f64,
    pub alpha: f64,
    pub beta: f64,
    #[serde(default)]
    pub last_reward: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertBody<'a> {
    pub platform: &'a str,
    pub queries: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct SampleBody<'a> {
    pub platform: &'a str,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportBody<'a> {
    pub platform: &'a str,
    pub items: &'a [QueryReport],
}
