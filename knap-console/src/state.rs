//! Application State
//!
//! Shared state for the knap console server. Everything here is built once
//! at startup and read-only afterwards, so handlers never take locks.

use std::sync::Arc;

use crate::config::KnapConfig;
use crate::kubernetes::K8sClient;
use crate::views::ViewRenderer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<KnapConfig>,
    pub k8s: Arc<K8sClient>,
    pub views: Arc<ViewRenderer>,
}
