use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::warn;

use crawlq_common::SamplerError;

/// JSON envelope shared by every ingest endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData<T> {
    pub code: String,
    pub message: String,
    pub data: Option<T>,
    pub success: bool,
    pub trace_id: String,
}

impl<T> ResponseData<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: "SUCCESS".to_string(),
            message: "ok".to_string(),
            data: Some(data),
            success: true,
            trace_id: String::new(),
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            data: None,
            success: false,
            trace_id: String::new(),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseData<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failures an ingest handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Validation(String),
    StoreUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ApiError::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl From<SamplerError> for ApiError {
    fn from(err: SamplerError) -> Self {
        match err {
            SamplerError::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            SamplerError::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            ApiError::Unauthorized => "invalid X-Ingest-Token".to_string(),
            ApiError::Validation(msg) => msg,
            ApiError::StoreUnavailable(msg) => {
                warn!(error = %msg, "Arm store unavailable");
                "store unavailable, retry later".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Ingest call failed");
                "internal error".to_string()
            }
        };
        (status, Json(ResponseData::<()>::error(code, message))).into_response()
    }
}
