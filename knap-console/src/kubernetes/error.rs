//! Kubernetes error types and ApiError mapping
//!
//! Classifies kube-rs errors into console errors so route handlers can
//! surface NotFound/Conflict outcomes with the right status code.

use thiserror::Error;

use crate::error::ApiError;

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Engine resource not found
    #[error("Engine not found: {name} in namespace {namespace}")]
    EngineNotFound { name: String, namespace: String },

    /// Engine name collision on create
    #[error("Engine already exists: {0}")]
    AlreadyExists(String),

    /// Stale resource version on update
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid or unreadable kubeconfig
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),
}

impl K8sError {
    /// Classify an API-call failure against a named engine
    ///
    /// The API server reports both name collisions and stale updates as
    /// 409; the reason field tells them apart.
    pub fn for_engine(err: kube::Error, name: &str, namespace: &str) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => K8sError::EngineNotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            },
            kube::Error::Api(ae) if ae.code == 409 && ae.reason == "AlreadyExists" => {
                K8sError::AlreadyExists(name.to_string())
            }
            kube::Error::Api(ae) if ae.code == 409 => K8sError::Conflict(ae.message),
            other => K8sError::KubeError(other),
        }
    }
}

impl From<K8sError> for ApiError {
    fn from(err: K8sError) -> Self {
        match err {
            K8sError::EngineNotFound { name, namespace } => ApiError::NotFound(format!(
                "Engine '{}' not found in namespace {}",
                name, namespace
            )),
            K8sError::AlreadyExists(name) => {
                ApiError::Conflict(format!("Engine '{}' already exists", name))
            }
            K8sError::Conflict(msg) => ApiError::Conflict(msg),
            K8sError::InvalidKubeconfig(msg) => ApiError::ServiceUnavailable(msg),
            K8sError::KubeError(e) => ApiError::Internal(format!("Kubernetes error: {}", e)),
        }
    }
}
