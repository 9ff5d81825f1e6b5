//! Error taxonomy.
//!
//! - `UnusableRecord`: a sampled record breaks a question invariant. Recovered by
//!   resampling inside the dispatcher; never reaches a client.
//! - `QuestionError`: request-level failures that do reach the client,
//!   including malformed query strings.
//! - `StoreError`: a category file could not be read or parsed; the store
//!   absorbs it and serves the category as empty.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::Category;
use crate::protocol::ErrorOut;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unusable record: {reason}")]
pub struct UnusableRecord {
    pub reason: String,
}

impl UnusableRecord {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("unsupported mode: {0}")]
    UnsupportedCategory(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no usable content for category '{category}' after {attempts} attempts")]
    NoUsableContent { category: Category, attempts: usize },
}

impl QuestionError {
    pub fn code(&self) -> &'static str {
        match self {
            QuestionError::UnsupportedCategory(_) => "UNSUPPORTED_MODE",
            QuestionError::BadRequest(_) => "BAD_REQUEST",
            QuestionError::NoUsableContent { .. } => "NO_USABLE_CONTENT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            QuestionError::UnsupportedCategory(_) | QuestionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            QuestionError::NoUsableContent { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_out(&self) -> ErrorOut {
        ErrorOut { code: self.code().to_string(), error: self.to_string() }
    }
}

impl IntoResponse for QuestionError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_out())).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value is not a list")]
    NotAList,
}
