pub mod error;
pub mod types;

pub use error::{IngestClientError, Result};
pub use types::{QueryReport, QueryStat};

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use types::{ReportBody, ResponseData, SampleBody, UpsertBody};

const TOKEN_HEADER: &str = "x-ingest-token";
const DEFAULT_SAMPLE_LIMIT: i64 = 10;
const DEFAULT_LIST_LIMIT: i64 = 20;
/// Error bodies are cut to this many characters before surfacing.
const ERROR_BODY_PREVIEW: usize = 500;

/// Crawler-side client for the query sampler ingest endpoints.
pub struct IngestClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl IngestClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))?;
        Ok(Self {
            client,
            base_url,
            token: token.into().trim().to_string(),
        })
    }

    /// Register seed queries. Returns `false` without calling the server when
    /// nothing is left after trimming.
    pub async fn upsert_queries<S: AsRef<str>>(&self, platform: &str, queries: &[S]) -> Result<bool> {
        let platform = platform.trim();
        let queries: Vec<String> = queries
            .iter()
            .map(|q| q.as_ref().trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect();
        if platform.is_empty() || queries.is_empty() {
            return Ok(false);
        }

        let body = UpsertBody {
            platform,
            queries: &queries,
        };
        self.post_json::<_, bool>("/v1/ingest/crawlerQueries:upsert", &body)
            .await?;
        tracing::debug!(platform, count = queries.len(), "Upserted crawler queries");
        Ok(true)
    }

    /// Ask the sampler which queries to crawl next, best first.
    pub async fn sample_queries(&self, platform: &str, limit: Option<u32>) -> Result<Vec<String>> {
        let platform = platform.trim();
        if platform.is_empty() {
            return Ok(Vec::new());
        }

        let body = SampleBody {
            platform,
            limit: limit
                .filter(|n| *n > 0)
                .map(i64::from)
                .unwrap_or(DEFAULT_SAMPLE_LIMIT),
        };
        let data: Option<Vec<String>> = self
            .post_json("/v1/ingest/crawlerQueries:sample", &body)
            .await?;

        Ok(data
            .unwrap_or_default()
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect())
    }

    /// Report crawl outcomes. Returns `false` without calling the server when
    /// there is nothing to report.
    pub async fn report_queries(&self, platform: &str, items: &[QueryReport]) -> Result<bool> {
        let platform = platform.trim();
        if platform.is_empty() || items.is_empty() {
            return Ok(false);
        }

        let body = ReportBody { platform, items };
        self.post_json::<_, bool>("/v1/ingest/crawlerQueries:report", &body)
            .await?;
        tracing::debug!(platform, count = items.len(), "Reported crawler query rewards");
        Ok(true)
    }

    /// Most recently updated arms with their beliefs.
    pub async fn list_top(&self, platform: &str, limit: Option<u32>) -> Result<Vec<QueryStat>> {
        let platform = platform.trim();
        if platform.is_empty() {
            return Ok(Vec::new());
        }

        let body = SampleBody {
            platform,
            limit: limit
                .filter(|n| *n > 0)
                .map(i64::from)
                .unwrap_or(DEFAULT_LIST_LIMIT),
        };
        let data: Option<Vec<QueryStat>> = self
            .post_json("/v1/ingest/crawlerQueries:listTop", &body)
            .await?;
        Ok(data.unwrap_or_default())
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let url = resolve_endpoint(&self.base_url, path)?;
        let resp = self
            .client
            .post(url)
            .header(TOKEN_HEADER, &self.token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        decode_envelope(status.as_u16(), &text)
    }
}

fn resolve_endpoint(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path.trim_start_matches('/'))?)
}

fn preview(text: &str) -> String {
    text.chars().take(ERROR_BODY_PREVIEW).collect()
}

/// Turn a raw HTTP answer into the envelope's `data`.
fn decode_envelope<T: DeserializeOwned>(status: u16, text: &str) -> Result<Option<T>> {
    if !(200..300).contains(&status) {
        return Err(IngestClientError::Api {
            status,
            message: preview(text),
        });
    }

    let envelope: ResponseData<T> = serde_json::from_str(text)
        .map_err(|_| IngestClientError::Parse(preview(text)))?;

    if !envelope.success {
        return Err(IngestClientError::Rejected {
            code: envelope.code.unwrap_or_else(|| "ERROR".to_string()),
            message: envelope
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_resolution_tolerates_slashes() {
        for base in ["http://svc:8080", "http://svc:8080/", "http://svc:8080///"] {
            let client = IngestClient::new(base, "t").unwrap();
            let url = resolve_endpoint(&client.base_url, "/v1/ingest/crawlerQueries:sample").unwrap();
            assert_eq!(url.as_str(), "http://svc:8080/v1/ingest/crawlerQueries:sample");
        }
    }

    #[test]
    fn endpoint_resolution_keeps_base_path() {
        let client = IngestClient::new("http://gw/content", "t").unwrap();
        let url = resolve_endpoint(&client.base_url, "/v1/ingest/crawlerQueries:report").unwrap();
        assert_eq!(url.as_str(), "http://gw/content/v1/ingest/crawlerQueries:report");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(matches!(
            IngestClient::new("not a url", "t"),
            Err(IngestClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn decodes_successful_envelope() {
        let text = r#"{"code":"SUCCESS","message":"ok","data":["a","b"],"success":true,"traceId":""}"#;
        let data: Option<Vec<String>> = decode_envelope(200, text).unwrap();
        assert_eq!(data, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn envelope_without_data_decodes_as_none() {
        let data: Option<Vec<QueryStat>> =
            decode_envelope(200, r#"{"success":true,"code":"SUCCESS"}"#).unwrap();
        assert!(data.is_none());

        let data: Option<bool> = decode_envelope(200, r#"{"success":true,"data":null}"#).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn rejected_envelope_carries_code_and_message() {
        let text = r#"{"code":"UNAUTHORIZED","message":"invalid X-Ingest-Token","data":null,"success":false}"#;
        let err = decode_envelope::<bool>(200, text).unwrap_err();
        match err {
            IngestClientError::Rejected { code, message } => {
                assert_eq!(code, "UNAUTHORIZED");
                assert_eq!(message, "invalid X-Ingest-Token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejected_envelope_without_details_uses_defaults() {
        let err = decode_envelope::<bool>(200, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.to_string(), "ERROR: unknown error");
    }

    #[test]
    fn non_2xx_is_an_api_error_with_truncated_body() {
        let body = "x".repeat(2_000);
        match decode_envelope::<bool>(503, &body).unwrap_err() {
            IngestClientError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.len(), ERROR_BODY_PREVIEW);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_a_parse_error() {
        assert!(matches!(
            decode_envelope::<bool>(200, "<html>gateway</html>"),
            Err(IngestClientError::Parse(_))
        ));
        assert!(matches!(
            decode_envelope::<bool>(200, ""),
            Err(IngestClientError::Parse(_))
        ));
    }

    #[test]
    fn list_top_items_decode() {
        let text = r#"{"success":true,"data":[{"platform":"weibo","query":"q","meanReward":0.75,"alpha":3.0,"beta":1.0,"lastReward":1.0,"updatedAt":"2026-01-01T00:00:00Z"}]}"#;
        let data: Option<Vec<QueryStat>> = decode_envelope(200, text).unwrap();
        let stats = data.unwrap();
        assert_eq!(stats[0].query, "q");
        assert_eq!(stats[0].mean_reward, 0.75);
        assert_eq!(stats[0].last_reward, Some(1.0));
    }

    // Unroutable base: these only pass if no request is attempted.

    #[tokio::test]
    async fn blank_inputs_short_circuit() {
        let client = IngestClient::new("http://127.0.0.1:9", "t").unwrap();
        let none: [&str; 0] = [];
        assert!(!client.upsert_queries("p", &none).await.unwrap());
        assert!(!client.upsert_queries("  ", &["a"]).await.unwrap());
        assert!(!client.upsert_queries("p", &["", " "]).await.unwrap());
        assert!(!client.report_queries("p", &[]).await.unwrap());
        assert!(client.sample_queries(" ", None).await.unwrap().is_empty());
        assert!(client.list_top("", Some(5)).await.unwrap().is_empty());
    }
}
