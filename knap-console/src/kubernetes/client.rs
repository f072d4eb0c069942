//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client with the single namespace every engine
//! operation is scoped to.

use kube::api::Api;
use kube::{Client, Config};

use knap_common::Appengine;

use super::error::{K8sError, K8sResult};
use crate::config::KubernetesConfig;

/// Wrapper around kube-rs Client bound to one namespace
#[derive(Clone)]
pub struct K8sClient {
    inner: Client,
    namespace: String,
}

impl K8sClient {
    /// Create a client from the console's Kubernetes settings
    ///
    /// A configured kubeconfig path wins; otherwise the client is inferred
    /// from the environment (in-cluster service account or `~/.kube/config`).
    pub async fn from_settings(settings: &KubernetesConfig) -> K8sResult<Self> {
        let client = match &settings.kubeconfig {
            Some(path) => {
                let yaml = std::fs::read_to_string(path).map_err(|e| {
                    K8sError::InvalidKubeconfig(format!(
                        "Failed to read kubeconfig {:?}: {}",
                        path, e
                    ))
                })?;
                Self::client_from_yaml(&yaml).await?
            }
            None => Client::try_default().await.map_err(|e| {
                K8sError::InvalidKubeconfig(format!("Failed to infer cluster config: {}", e))
            })?,
        };

        Ok(Self {
            inner: client,
            namespace: settings.namespace.clone(),
        })
    }

    /// Build a kube client from kubeconfig YAML
    async fn client_from_yaml(kubeconfig_yaml: &str) -> K8sResult<Client> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = Kubeconfig::from_yaml(kubeconfig_yaml).map_err(|e| {
            K8sError::InvalidKubeconfig(format!("Failed to parse kubeconfig: {}", e))
        })?;

        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create config: {}", e)))?;

        Client::try_from(config)
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create client: {}", e)))
    }

    /// Typed Appengine API handle scoped to the bound namespace
    pub fn engines(&self) -> Api<Appengine> {
        Api::namespaced(self.inner.clone(), &self.namespace)
    }

    /// Get the inner kube-rs Client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// The namespace all operations are scoped to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("namespace", &self.namespace)
            .finish()
    }
}
