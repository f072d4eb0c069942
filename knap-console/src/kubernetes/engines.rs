//! Appengine operations
//!
//! CRUD operations for the Appengine custom resource. Each call is a
//! single best-effort round trip: no retries, no backoff.

use kube::api::{DeleteParams, ListParams, PostParams};
use kube::ResourceExt;

use knap_common::Appengine;

use super::client::K8sClient;
use super::error::{K8sError, K8sResult};

/// List all engines in the bound namespace
pub async fn list_engines(client: &K8sClient) -> K8sResult<Vec<Appengine>> {
    let list = client.engines().list(&ListParams::default()).await?;

    Ok(list.items)
}

/// Get a single engine by name
pub async fn get_engine(client: &K8sClient, name: &str) -> K8sResult<Appengine> {
    client
        .engines()
        .get(name)
        .await
        .map_err(|e| K8sError::for_engine(e, name, client.namespace()))
}

/// Create a new engine
pub async fn create_engine(client: &K8sClient, engine: Appengine) -> K8sResult<Appengine> {
    let name = engine.name_any();

    client
        .engines()
        .create(&PostParams::default(), &engine)
        .await
        .map_err(|e| K8sError::for_engine(e, &name, client.namespace()))
}

/// Replace an existing engine
///
/// Full-object replace, not a patch; the resource version carried over
/// from the preceding get is what makes stale updates fail with Conflict.
pub async fn update_engine(client: &K8sClient, engine: Appengine) -> K8sResult<Appengine> {
    let name = engine.name_any();

    client
        .engines()
        .replace(&name, &PostParams::default(), &engine)
        .await
        .map_err(|e| K8sError::for_engine(e, &name, client.namespace()))
}

/// Delete an engine by name
pub async fn delete_engine(client: &K8sClient, name: &str) -> K8sResult<()> {
    client
        .engines()
        .delete(name, &DeleteParams::default())
        .await
        .map(|_| ())
        .map_err(|e| K8sError::for_engine(e, name, client.namespace()))
}
