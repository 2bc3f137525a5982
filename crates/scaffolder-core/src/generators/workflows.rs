//! GitHub Actions workflows and Dependabot config
//!
//! Workflows are built as values and serialized with serde_yaml, so step
//! gating can be tested without parsing YAML text.

use crate::config::{PackageManager, ProjectConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node versions every CI run is tested against
pub const NODE_MATRIX: [&str; 3] = ["20.x", "22.x", "24.x"];

/// Node version used by the publish job
pub const PUBLISH_NODE_VERSION: &str = "22.x";

pub const CI_WORKFLOW_PATH: &str = ".github/workflows/ci.yml";
pub const PUBLISH_WORKFLOW_PATH: &str = ".github/workflows/publish.yml";
pub const DEPENDABOT_PATH: &str = ".github/dependabot.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub on: Triggers,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub permissions: BTreeMap<String, String>,
    pub jobs: BTreeMap<String, Job>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triggers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<RefFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<RefFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFilter {
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    pub runs_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub matrix: Matrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Matrix {
    pub node_version: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub with: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Step {
    fn uses(name: &str, action: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            uses: Some(action.to_string()),
            ..Default::default()
        }
    }

    fn run(name: &str, command: impl Into<String>) -> Self {
        Self {
            name: Some(name.to_string()),
            run: Some(command.into()),
            ..Default::default()
        }
    }

    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.with.insert(key.to_string(), value.into());
        self
    }

    fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }
}

/// Checkout, package manager setup, Node setup and install
fn setup_steps(pm: PackageManager, node_version: &str, registry: bool) -> Vec<Step> {
    let mut steps = vec![Step::uses("Checkout", "actions/checkout@v4")];

    match pm {
        PackageManager::Pnpm => {
            steps.push(Step::uses("Setup pnpm", "pnpm/action-setup@v4").with("version", "9"))
        }
        PackageManager::Bun => steps.push(Step::uses("Setup Bun", "oven-sh/setup-bun@v2")),
        PackageManager::Npm | PackageManager::Yarn => {}
    }

    let mut node = Step::uses("Setup Node.js", "actions/setup-node@v4")
        .with("node-version", node_version);
    if let Some(cache) = pm.setup_node_cache() {
        node = node.with("cache", cache);
    }
    if registry {
        node = node.with("registry-url", "https://registry.npmjs.org");
    }
    steps.push(node);

    steps.push(Step::run("Install dependencies", pm.ci_install_command()));
    steps
}

fn build_step(config: &ProjectConfig) -> Step {
    if config.is_typescript() {
        Step::run("Build", config.package_manager.run("build"))
    } else {
        Step::run("Build", "npm pack --dry-run")
    }
}

/// Steps of the CI job, in order
pub fn ci_steps(config: &ProjectConfig) -> Vec<Step> {
    let pm = config.package_manager;
    let mut steps = setup_steps(pm, "${{ matrix.node-version }}", false);

    if config.is_typescript() {
        steps.push(Step::run("Type check", pm.run("typecheck")));
    }
    if config.linting {
        steps.push(Step::run("Lint", pm.run("lint")));
    }
    if config.has_tests() {
        let upload = config.coverage_upload;
        let script = if upload { "test:coverage" } else { "test" };
        steps.push(Step::run("Test", pm.run(script)));
        if upload {
            steps.push(
                Step::uses("Upload coverage", "codecov/codecov-action@v5")
                    .with("token", "${{ secrets.CODECOV_TOKEN }}"),
            );
        }
    }

    steps.push(build_step(config));
    steps
}

pub fn ci_workflow(config: &ProjectConfig) -> Workflow {
    let main = RefFilter {
        branches: vec!["main".to_string()],
    };

    let job = Job {
        runs_on: "ubuntu-latest".to_string(),
        strategy: Some(Strategy {
            matrix: Matrix {
                node_version: NODE_MATRIX.iter().map(|v| v.to_string()).collect(),
            },
        }),
        steps: ci_steps(config),
    };

    Workflow {
        name: "CI".to_string(),
        on: Triggers {
            push: Some(main.clone()),
            pull_request: Some(main),
            release: None,
        },
        permissions: BTreeMap::new(),
        jobs: BTreeMap::from([("test".to_string(), job)]),
    }
}

/// Steps of the publish job: CI's test/build gating plus an npm publish
pub fn publish_steps(config: &ProjectConfig) -> Vec<Step> {
    let pm = config.package_manager;
    let mut steps = setup_steps(pm, PUBLISH_NODE_VERSION, true);

    if config.has_tests() {
        steps.push(Step::run("Test", pm.run("test")));
    }
    steps.push(build_step(config));
    steps.push(
        Step::run("Publish", "npm publish --provenance --access public")
            .env("NODE_AUTH_TOKEN", "${{ secrets.NPM_TOKEN }}"),
    );
    steps
}

pub fn publish_workflow(config: &ProjectConfig) -> Workflow {
    let job = Job {
        runs_on: "ubuntu-latest".to_string(),
        strategy: None,
        steps: publish_steps(config),
    };

    Workflow {
        name: "Publish".to_string(),
        on: Triggers {
            push: None,
            pull_request: None,
            release: Some(ReleaseFilter {
                types: vec!["published".to_string()],
            }),
        },
        permissions: BTreeMap::from([
            ("contents".to_string(), "read".to_string()),
            ("id-token".to_string(), "write".to_string()),
        ]),
        jobs: BTreeMap::from([("publish".to_string(), job)]),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependabotConfig {
    pub version: u8,
    pub updates: Vec<DependabotUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependabotUpdate {
    pub package_ecosystem: String,
    pub directory: String,
    pub schedule: Schedule,
    pub open_pull_requests_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub interval: String,
}

pub fn dependabot_config() -> DependabotConfig {
    let update = |ecosystem: &str| DependabotUpdate {
        package_ecosystem: ecosystem.to_string(),
        directory: "/".to_string(),
        schedule: Schedule {
            interval: "weekly".to_string(),
        },
        open_pull_requests_limit: 10,
    };

    DependabotConfig {
        version: 2,
        updates: vec![update("npm"), update("github-actions")],
    }
}

pub fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to serialize workflow YAML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::default_config;
    use crate::config::{Language, TestRunner};

    fn step_names(steps: &[Step]) -> Vec<String> {
        steps.iter().filter_map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_default_ci_steps() {
        assert_eq!(
            step_names(&ci_steps(&default_config())),
            vec![
                "Checkout",
                "Setup Node.js",
                "Install dependencies",
                "Type check",
                "Lint",
                "Test",
                "Build"
            ]
        );
    }

    #[test]
    fn test_ci_gating_for_minimal_javascript() {
        let config = ProjectConfig {
            language: Language::JavaScript,
            test_runner: TestRunner::None,
            linting: false,
            coverage_upload: true,
            ..default_config()
        };
        let names = step_names(&ci_steps(&config));
        assert!(!names.contains(&"Type check".to_string()));
        assert!(!names.contains(&"Lint".to_string()));
        assert!(!names.contains(&"Test".to_string()));
        assert!(!names.contains(&"Upload coverage".to_string()));
        assert_eq!(names.last().map(String::as_str), Some("Build"));
    }

    #[test]
    fn test_coverage_upload_step() {
        let config = ProjectConfig {
            coverage_upload: true,
            ..default_config()
        };
        let steps = ci_steps(&config);
        let test = steps.iter().find(|s| s.name.as_deref() == Some("Test")).unwrap();
        assert_eq!(test.run.as_deref(), Some("npm run test:coverage"));
        let upload = steps
            .iter()
            .find(|s| s.name.as_deref() == Some("Upload coverage"))
            .unwrap();
        assert_eq!(upload.with["token"], "${{ secrets.CODECOV_TOKEN }}");
        assert_eq!(steps.last().unwrap().name.as_deref(), Some("Build"));
    }

    #[test]
    fn test_package_manager_setup() {
        let pnpm = ProjectConfig {
            package_manager: PackageManager::Pnpm,
            ..default_config()
        };
        let steps = ci_steps(&pnpm);
        assert_eq!(steps[1].uses.as_deref(), Some("pnpm/action-setup@v4"));
        assert_eq!(steps[2].with["cache"], "pnpm");
        assert_eq!(steps[3].run.as_deref(), Some("pnpm install --frozen-lockfile"));

        let bun = ProjectConfig {
            package_manager: PackageManager::Bun,
            ..default_config()
        };
        let steps = ci_steps(&bun);
        assert_eq!(steps[1].uses.as_deref(), Some("oven-sh/setup-bun@v2"));
        assert!(!steps[2].with.contains_key("cache"));
    }

    #[test]
    fn test_publish_steps_end_with_build_then_publish() {
        let steps = publish_steps(&default_config());
        let names = step_names(&steps);
        let n = names.len();
        assert_eq!(&names[n - 2..], &["Build".to_string(), "Publish".to_string()]);
        assert!(names.contains(&"Test".to_string()));
        assert_eq!(
            steps[n - 1].env["NODE_AUTH_TOKEN"],
            "${{ secrets.NPM_TOKEN }}"
        );

        let untested = publish_steps(&ProjectConfig {
            test_runner: TestRunner::None,
            ..default_config()
        });
        assert!(!step_names(&untested).contains(&"Test".to_string()));
    }

    #[test]
    fn test_workflow_yaml_round_trips() {
        let workflow = ci_workflow(&default_config());
        let yaml = render(&workflow).unwrap();
        let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, workflow);
        assert!(yaml.contains("runs-on: ubuntu-latest"));
        assert!(yaml.contains("node-version:"));
    }

    #[test]
    fn test_publish_triggers() {
        let workflow = publish_workflow(&default_config());
        // A release creates its tag; a tag trigger as well would publish twice
        assert!(workflow.on.push.is_none());
        assert!(workflow.on.pull_request.is_none());
        assert_eq!(workflow.on.release.unwrap().types, vec!["published"]);

        let yaml = render(&publish_workflow(&default_config())).unwrap();
        assert!(!yaml.contains("tags:"));
        assert_eq!(workflow.permissions["id-token"], "write");
    }

    #[test]
    fn test_dependabot_config() {
        let yaml = render(&dependabot_config()).unwrap();
        assert!(yaml.contains("package-ecosystem: npm"));
        assert!(yaml.contains("package-ecosystem: github-actions"));
    }
}
