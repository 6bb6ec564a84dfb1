pub mod crawler_queries;

use axum::extract::{FromRequest, Request};
use axum::Json;
use crawlq_common::{MAX_PLATFORM_LEN, MAX_QUERY_LEN};

use crate::response::ApiError;

/// `Json` body whose rejections answer with the envelope as `VALIDATION`.
pub struct IngestJson<T>(pub T);

impl<S, T> FromRequest<S> for IngestJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Self(body))
    }
}

// --- Validation helpers ---
//
// Only reject what the arm table cannot hold. Everything else (blank list
// entries, out-of-range numbers) is normalized by the sampler.

fn require_platform(platform: &str) -> Result<&str, ApiError> {
    let p = platform.trim();
    if p.is_empty() {
        return Err(ApiError::Validation("platform must not be blank".into()));
    }
    if p.chars().count() > MAX_PLATFORM_LEN {
        return Err(ApiError::Validation(format!(
            "platform must be at most {MAX_PLATFORM_LEN} characters"
        )));
    }
    Ok(p)
}

fn check_query_len(query: &str) -> Result<(), ApiError> {
    if query.trim().chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::Validation(format!(
            "query must be at most {MAX_QUERY_LEN} characters"
        )));
    }
    Ok(())
}

fn require_non_empty<T>(items: &[T], field: &str) -> Result<(), ApiError> {
    if items.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
