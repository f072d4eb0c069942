//! Kubernetes integration for the knap console
//!
//! Provides the pieces every route goes through:
//! - client construction from a kubeconfig path or inferred configuration
//! - Appengine CRUD against the single configured namespace
//! - error classification and mapping onto console responses

pub mod client;
pub mod engines;
pub mod error;

pub use client::K8sClient;
pub use error::{K8sError, K8sResult};
