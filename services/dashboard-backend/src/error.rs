//! Backend error types.
//!
//! Every error leaving a handler is rendered as a JSON body of the form
//! `{ "error": <short cause>, "message": <user-facing text> }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cluster_client::ClusterError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in the dashboard backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Kubernetes API error on a direct (uncached) path
    #[error("Kubernetes error: {0}")]
    Cluster(#[from] ClusterError),

    /// Kubernetes API error with a fixed user-facing message
    #[error("{message}")]
    Upstream {
        error: &'static str,
        message: &'static str,
        #[source]
        source: ClusterError,
    },

    /// Cache accessed before the watchers were started
    #[error("Watched resources have not been initialized yet")]
    NotInitialized,

    /// Watchers started twice
    #[error("Watched resources are already initialized")]
    AlreadyInitialized,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Requested object is not known to the backend
    #[error("{0}")]
    NotFound(String),

    /// Malformed query parameter
    #[error("{0}")]
    BadRequest(String),
}

impl BackendError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Cluster(err) => err
                .status_code()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::AlreadyInitialized | Self::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_label(&self) -> String {
        match self {
            Self::Upstream { error, .. } => (*error).to_string(),
            Self::NotInitialized | Self::AlreadyInitialized => "watched resources unavailable".to_string(),
            other => other
                .status_code()
                .canonical_reason()
                .unwrap_or("error")
                .to_lowercase(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_label(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
