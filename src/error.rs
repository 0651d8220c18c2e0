use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::num::ParseIntError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed, contradictory or missing query parameters.
    #[error("{0}")]
    Validation(String),

    /// A non-numeric identifier or coordinate.
    #[error("invalid integer {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn parse(value: &str, source: ParseIntError) -> Self {
        Error::Parse {
            value: value.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "ValidationError",
            Error::Parse { .. } => "ParseError",
            Error::NotFound(_) => "NotFound",
            Error::Store(_) | Error::Io(_) => "StoreError",
        }
    }

    /// Every kind is reported as a bad request; the kind tag in the body is
    /// what distinguishes a missing record from a malformed query.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::Parse { .. }
            | Error::NotFound(_)
            | Error::Store(_)
            | Error::Io(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), "request failed: {}", self);
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
