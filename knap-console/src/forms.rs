//! Typed request forms for the console routes
//!
//! The create and edit pages submit their fields as query parameters; the
//! structs here give them names and validation before anything reaches the
//! cluster. Malformed numeric input is rejected, never silently defaulted.

use serde::Deserialize;

use knap_common::{engine_name, AppengineSpec, Error, Result};

/// Query carrying a single engine name (`/get`, `/edit`, `/delete`)
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// Fields submitted by the create form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEngineForm {
    pub app_name: String,
    pub git_repo: String,
    pub git_revision: String,
    #[serde(default)]
    pub size: String,
    pub template: String,
}

impl CreateEngineForm {
    /// The engine name this submission maps to
    pub fn engine_name(&self) -> String {
        engine_name(&self.app_name)
    }

    /// Validate the submission and build the engine spec
    pub fn into_spec(self) -> Result<AppengineSpec> {
        if self.app_name.trim().is_empty() {
            return Err(Error::Validation("appName must not be empty".to_string()));
        }
        if self.git_repo.trim().is_empty() {
            return Err(Error::Validation("gitRepo must not be empty".to_string()));
        }

        let size = parse_size(&self.size)?;

        Ok(AppengineSpec {
            app_name: self.app_name,
            git_repo: self.git_repo,
            git_revision: self.git_revision,
            size,
            template: self.template,
        })
    }
}

/// Fields submitted by the edit form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEngineForm {
    pub app_name: String,
    pub git_revision: String,
    #[serde(default)]
    pub size: String,
    pub template: String,
}

impl UpdateEngineForm {
    /// The engine name this submission targets
    pub fn engine_name(&self) -> String {
        engine_name(&self.app_name)
    }

    /// Overwrite the fields the edit page owns
    ///
    /// Only revision, size and template change; application name and git
    /// repository are preserved from the stored spec.
    pub fn apply_to(&self, spec: &mut AppengineSpec) -> Result<()> {
        let size = parse_size(&self.size)?;

        spec.git_revision = self.git_revision.clone();
        spec.size = size;
        spec.template = self.template.clone();

        Ok(())
    }
}

/// Parse the desired instance count
fn parse_size(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| Error::Validation(format!("size must be a 32-bit integer, got '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form(size: &str) -> CreateEngineForm {
        CreateEngineForm {
            app_name: "demo".to_string(),
            git_repo: "https://x/y.git".to_string(),
            git_revision: "main".to_string(),
            size: size.to_string(),
            template: "default".to_string(),
        }
    }

    #[test]
    fn test_create_form_builds_spec() {
        let form = create_form("3");
        assert_eq!(form.engine_name(), "demo-appengine");

        let spec = form.into_spec().unwrap();
        assert_eq!(spec.app_name, "demo");
        assert_eq!(spec.git_repo, "https://x/y.git");
        assert_eq!(spec.git_revision, "main");
        assert_eq!(spec.size, 3);
        assert_eq!(spec.template, "default");
    }

    #[test]
    fn test_create_form_rejects_bad_size() {
        let err = create_form("lots").into_spec().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("size"));

        let err = create_form("").into_spec().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_create_form_rejects_empty_app_name() {
        let mut form = create_form("1");
        form.app_name = "  ".to_string();
        assert!(form.into_spec().is_err());
    }

    #[test]
    fn test_update_only_touches_owned_fields() {
        let mut spec = AppengineSpec {
            app_name: "demo".to_string(),
            git_repo: "https://x/y.git".to_string(),
            git_revision: "main".to_string(),
            size: 1,
            template: "default".to_string(),
        };

        let form = UpdateEngineForm {
            app_name: "demo".to_string(),
            git_revision: "v2".to_string(),
            size: "5".to_string(),
            template: "kaniko".to_string(),
        };
        assert_eq!(form.engine_name(), "demo-appengine");

        form.apply_to(&mut spec).unwrap();
        assert_eq!(spec.git_revision, "v2");
        assert_eq!(spec.size, 5);
        assert_eq!(spec.template, "kaniko");
        // untouched
        assert_eq!(spec.app_name, "demo");
        assert_eq!(spec.git_repo, "https://x/y.git");
    }

    #[test]
    fn test_update_bad_size_leaves_spec_unchanged() {
        let mut spec = AppengineSpec {
            app_name: "demo".to_string(),
            git_repo: "https://x/y.git".to_string(),
            git_revision: "main".to_string(),
            size: 1,
            template: "default".to_string(),
        };

        let form = UpdateEngineForm {
            app_name: "demo".to_string(),
            git_revision: "v2".to_string(),
            size: "NaN".to_string(),
            template: "kaniko".to_string(),
        };

        assert!(form.apply_to(&mut spec).is_err());
        assert_eq!(spec.git_revision, "main");
        assert_eq!(spec.size, 1);
        assert_eq!(spec.template, "default");
    }
}
