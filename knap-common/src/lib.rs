//! Common types shared between the knap console and its integrations

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Suffix appended to an application name to form its engine name
pub const ENGINE_NAME_SUFFIX: &str = "-appengine";

/// Derive the engine resource name for an application
///
/// Every application maps to exactly one engine named `<appName>-appengine`.
pub fn engine_name(app_name: &str) -> String {
    format!("{}{}", app_name, ENGINE_NAME_SUFFIX)
}

/// Appengine is the Schema for the appengines API
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
#[kube(
    group = "knap.bluebosh.com",
    version = "v1alpha1",
    kind = "Appengine",
    plural = "appengines",
    namespaced,
    status = "AppengineStatus",
    printcolumn = r#"{"name":"Application", "type":"string", "jsonPath":".spec.appName"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.ready"}"#,
    printcolumn = r#"{"name":"Instance", "type":"integer", "jsonPath":".status.instance"}"#,
    printcolumn = r#"{"name":"Domain", "type":"string", "jsonPath":".status.domain"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AppengineSpec {
    /// Application name, also the stem of the engine name
    pub app_name: String,
    /// Git repository the application is built from
    pub git_repo: String,
    /// Git revision (branch, tag or commit) to build
    pub git_revision: String,
    /// Desired instance count
    #[serde(default)]
    pub size: i32,
    /// Pipeline template used to build and roll out the application
    pub template: String,
}

/// Server-managed status, read-only to the console
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppengineStatus {
    /// Readiness flag reported by the pipeline ("True" / "False")
    #[serde(default)]
    pub ready: String,
    /// Current instance count
    #[serde(default)]
    pub instance: i32,
    /// Domain the application is served under
    #[serde(default)]
    pub domain: String,
}

impl AppengineStatus {
    /// Whether the engine reports itself ready
    pub fn is_ready(&self) -> bool {
        self.ready.eq_ignore_ascii_case("true")
    }
}

/// Console error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Engine not found: {0}")]
    EngineNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_name_derivation() {
        assert_eq!(engine_name("demo"), "demo-appengine");
        assert_eq!(engine_name("my-app"), "my-app-appengine");
    }

    #[test]
    fn test_spec_field_names_match_wire_format() {
        let spec = AppengineSpec {
            app_name: "demo".to_string(),
            git_repo: "https://x/y.git".to_string(),
            git_revision: "main".to_string(),
            size: 3,
            template: "default".to_string(),
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["appName"], "demo");
        assert_eq!(json["gitRepo"], "https://x/y.git");
        assert_eq!(json["gitRevision"], "main");
        assert_eq!(json["size"], 3);
        assert_eq!(json["template"], "default");
    }

    #[test]
    fn test_size_defaults_to_zero_on_wire() {
        let spec: AppengineSpec = serde_json::from_str(
            r#"{"appName":"demo","gitRepo":"r","gitRevision":"main","template":"default"}"#,
        )
        .unwrap();
        assert_eq!(spec.size, 0);
    }

    #[test]
    fn test_status_readiness() {
        let mut status = AppengineStatus::default();
        assert!(!status.is_ready());

        status.ready = "True".to_string();
        assert!(status.is_ready());

        status.ready = "False".to_string();
        assert!(!status.is_ready());
    }

    #[test]
    fn test_engine_resource_metadata() {
        use kube::Resource;

        let engine = Appengine::new("demo-appengine", AppengineSpec::default());
        assert_eq!(engine.meta().name.as_deref(), Some("demo-appengine"));
        assert_eq!(Appengine::kind(&()), "Appengine");
        assert_eq!(Appengine::group(&()), "knap.bluebosh.com");
        assert_eq!(Appengine::version(&()), "v1alpha1");
    }
}
