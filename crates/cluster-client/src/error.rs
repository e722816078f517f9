//! Cluster client errors

use thiserror::Error;

/// Errors that can occur when talking to the Kubernetes API
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Error returned by the kube client (transport or API status)
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Client configuration could not be inferred from the environment
    #[error("Kubernetes configuration error: {0}")]
    Config(#[from] kube::config::InferConfigError),

    /// API returned a failure status without a kube error attached (mock and synthetic errors)
    #[error("Kubernetes API error ({code}): {message}")]
    Api { code: u16, message: String },
}

impl ClusterError {
    /// HTTP status reported by the API server, if the failure came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Kube(kube::Error::Api(resp)) => Some(resp.code),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True when the API server answered 404, typically a missing CRD or object.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}
