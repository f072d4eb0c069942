//! View rendering
//!
//! All HTML templates are loaded into a handlebars registry once at
//! startup; render-time lookup is by template name (the file stem). A
//! malformed template aborts startup rather than surfacing mid-request.

use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::error::ApiError;

/// Reverse a named route to its path
pub fn route_path(name: &str) -> Option<&'static str> {
    match name {
        "index" => Some("/"),
        "create" => Some("/create"),
        "templates" => Some("/templates"),
        "list" => Some("/list"),
        "spaces" => Some("/spaces"),
        "services" => Some("/services"),
        "get" => Some("/get"),
        "edit" => Some("/edit"),
        "createnew" => Some("/createnew"),
        "getedit" => Some("/getedit"),
        "delete" => Some("/delete"),
        "hello" => Some("/hello"),
        _ => None,
    }
}

// Template helpers. `url_for` mirrors the named-route reversal the pages
// link with; `status_icon` maps the readiness flag to its icon asset;
// `instances` folds current/desired counts into one column.

handlebars_helper!(url_for: |name: String| {
    route_path(&name).unwrap_or("/").to_string()
});

handlebars_helper!(status_icon: |ready: String| {
    if ready.eq_ignore_ascii_case("true") {
        "/img/status-ready.svg"
    } else {
        "/img/status-notready.svg"
    }
});

handlebars_helper!(instances: |current: i64, size: i64| {
    format!("{}/{}", current, size)
});

/// Template registry shared by all handlers, read-only after startup
pub struct ViewRenderer {
    registry: Handlebars<'static>,
}

impl ViewRenderer {
    /// Load every `*.html` template under `dir`, keyed by file stem
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut registry = Self::empty_registry();

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read views directory {:?}", dir))?;

        let mut count = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Invalid template file name {:?}", path))?;

            registry
                .register_template_file(&name, &path)
                .with_context(|| format!("Failed to compile template {:?}", path))?;
            count += 1;
        }

        anyhow::ensure!(count > 0, "No templates found in {:?}", dir);

        Ok(Self { registry })
    }

    /// Registry with helpers only, used by tests to register inline templates
    pub fn empty_registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        registry.register_helper("url_for", Box::new(url_for));
        registry.register_helper("status_icon", Box::new(status_icon));
        registry.register_helper("instances", Box::new(instances));
        registry
    }

    /// Render a named view with the given context
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, ApiError> {
        if self.registry.get_template(name).is_none() {
            return Err(ApiError::Internal(format!("Unknown view '{}'", name)));
        }

        Ok(self.registry.render(name, data)?)
    }

    /// Names of all loaded templates
    pub fn template_names(&self) -> Vec<String> {
        self.registry.get_templates().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_reversal_covers_every_named_route() {
        for name in [
            "index",
            "create",
            "templates",
            "list",
            "spaces",
            "services",
            "get",
            "edit",
            "createnew",
            "getedit",
            "delete",
            "hello",
        ] {
            assert!(route_path(name).is_some(), "no path for route '{}'", name);
        }

        assert_eq!(route_path("index"), Some("/"));
        assert_eq!(route_path("createnew"), Some("/createnew"));
        assert_eq!(route_path("bogus"), None);
    }

    #[test]
    fn test_url_for_helper() {
        let mut registry = ViewRenderer::empty_registry();
        registry
            .register_template_string("t", r#"<a href="{{url_for "edit"}}">edit</a>"#)
            .unwrap();

        let html = registry.render("t", &json!({})).unwrap();
        assert_eq!(html, r#"<a href="/edit">edit</a>"#);
    }

    #[test]
    fn test_status_icon_helper() {
        let mut registry = ViewRenderer::empty_registry();
        registry
            .register_template_string("t", "{{status_icon ready}}")
            .unwrap();

        let html = registry.render("t", &json!({ "ready": "True" })).unwrap();
        assert_eq!(html, "/img/status-ready.svg");

        let html = registry.render("t", &json!({ "ready": "False" })).unwrap();
        assert_eq!(html, "/img/status-notready.svg");
    }

    #[test]
    fn test_instances_helper() {
        let mut registry = ViewRenderer::empty_registry();
        registry
            .register_template_string("t", "{{instances current size}}")
            .unwrap();

        let html = registry
            .render("t", &json!({ "current": 2, "size": 3 }))
            .unwrap();
        assert_eq!(html, "2/3");
    }

    #[test]
    fn test_values_are_html_escaped() {
        let mut registry = ViewRenderer::empty_registry();
        registry.register_template_string("t", "{{name}}").unwrap();

        let html = registry
            .render("t", &json!({ "name": "<script>" }))
            .unwrap();
        assert_eq!(html, "&lt;script&gt;");
    }
}
