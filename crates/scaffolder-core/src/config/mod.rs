//! Project configuration model
//!
//! A [`ProjectConfig`] is built once per run by the resolver and then only
//! read. Its name is validated when it is acquired, and the CI-dependent
//! toggles are normalized by the resolver, so the model itself carries no
//! re-validation.

pub mod options;
pub mod validate;

pub use options::{Language, ModuleFormat, PackageManager, TestRunner};
pub use validate::{directory_name, validate_package_name, NameError};

/// Optional package metadata. `None` fields are left out of generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub github_username: Option<String>,
}

impl Metadata {
    /// Manifest `author` string: `Name <email> (https://github.com/handle)`,
    /// each segment present only when its field is.
    pub fn author(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(name) = &self.author_name {
            parts.push(name.clone());
        }
        if let Some(email) = &self.author_email {
            parts.push(format!("<{}>", email));
        }
        if let Some(handle) = &self.github_username {
            parts.push(format!("(https://github.com/{})", handle));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Every choice that shapes a generated package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub package_name: String,
    pub language: Language,
    pub module_format: ModuleFormat,
    pub test_runner: TestRunner,
    pub linting: bool,
    pub git_init: bool,
    pub ci: bool,
    /// Publish workflow; only meaningful with `ci`
    pub cd: bool,
    /// Coverage upload in CI; needs `ci` and a test runner
    pub coverage_upload: bool,
    /// Dependabot; only meaningful with `ci`
    pub dependency_bot: bool,
    pub package_manager: PackageManager,
    pub metadata: Metadata,
}

impl ProjectConfig {
    pub fn is_typescript(&self) -> bool {
        self.language.is_typescript()
    }

    pub fn has_tests(&self) -> bool {
        self.test_runner.is_some()
    }

    pub fn is_scoped(&self) -> bool {
        self.package_name.starts_with('@')
    }

    /// Whether a `test:coverage` script is wired up
    pub fn has_coverage_script(&self) -> bool {
        self.ci && self.has_tests()
    }

    /// `owner/name` slug on GitHub, when a handle is known
    pub fn github_repo(&self) -> Option<String> {
        self.metadata
            .github_username
            .as_ref()
            .map(|user| format!("{}/{}", user, directory_name(&self.package_name)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_with_all_segments() {
        let meta = Metadata {
            author_name: Some("Ada".to_string()),
            author_email: Some("ada@example.com".to_string()),
            github_username: Some("ada".to_string()),
            ..Default::default()
        };
        assert_eq!(
            meta.author().as_deref(),
            Some("Ada <ada@example.com> (https://github.com/ada)")
        );
    }

    #[test]
    fn test_author_segments_omitted_independently() {
        let name_only = Metadata {
            author_name: Some("Ada".to_string()),
            ..Default::default()
        };
        assert_eq!(name_only.author().as_deref(), Some("Ada"));

        let email_and_handle = Metadata {
            author_email: Some("ada@example.com".to_string()),
            github_username: Some("ada".to_string()),
            ..Default::default()
        };
        assert_eq!(
            email_and_handle.author().as_deref(),
            Some("<ada@example.com> (https://github.com/ada)")
        );

        assert_eq!(Metadata::default().author(), None);
    }

    #[test]
    fn test_github_repo_uses_unscoped_name() {
        let mut config = fixtures::with_github(fixtures::default_config());
        config.package_name = "@acme/widgets".to_string();
        assert_eq!(config.github_repo().as_deref(), Some("ada/widgets"));
        assert!(config.is_scoped());
    }
}
