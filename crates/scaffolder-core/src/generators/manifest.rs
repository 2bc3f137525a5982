//! Package manifest (`package.json`) assembly
//!
//! Assembly is a pure transformation from [`ProjectConfig`] plus looked-up
//! versions into a [`PackageManifest`] value; serialization happens last, in
//! [`render`]. Entry points branch on language × module format:
//!
//! | language   | format   | main               | module             | types          | export conditions          |
//! |------------|----------|--------------------|--------------------|----------------|----------------------------|
//! | JavaScript | any      | `./src/index.js`   | same (esm, dual)   | -              | bare string                |
//! | TypeScript | esm      | `./index.js`       | -                  | `./index.d.ts` | `types`, `import`          |
//! | TypeScript | commonjs | `./index.js`       | -                  | `./index.d.ts` | `types`, `require`         |
//! | TypeScript | dual     | `./index.js`       | `./index.mjs`      | `./index.d.ts` | `types`, `import`, `require` |

use crate::config::{Language, ModuleFormat, ProjectConfig, TestRunner};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Engine range used when the runtime feed could not be read
pub const DEFAULT_NODE_ENGINE: &str = ">=20";

/// Version every new package starts at
pub const INITIAL_VERSION: &str = "0.1.0";

pub const SOURCE_DIR: &str = "src";
pub const BUILD_DIR: &str = "dist";

/// Root re-export files shipped by TypeScript packages
pub const ROOT_ENTRY: &str = "index.js";
pub const ROOT_TYPES: &str = "index.d.ts";
pub const ROOT_ESM_ENTRY: &str = "index.mjs";

/// Versions and engine range looked up before assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    /// Package name -> version range. Packages that failed lookup are absent.
    pub versions: BTreeMap<String, String>,
    pub node_engine: Option<String>,
}

/// Structured `package.json`; field order is serialization order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub links: Option<RepositoryLinks>,
    #[serde(rename = "type")]
    pub package_type: String,
    pub main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    pub exports: Exports,
    pub files: Vec<String>,
    pub side_effects: bool,
    pub scripts: Map<String, Value>,
    pub engines: Engines,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_config: Option<PublishConfig>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// `repository`, `bugs` and `homepage`, always emitted together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryLinks {
    pub repository: Repository,
    pub bugs: Bugs,
    pub homepage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bugs {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Engines {
    pub node: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishConfig {
    pub access: String,
}

/// The manifest `exports` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Exports {
    /// A single path, used when source is shipped as-is
    Bare(String),
    Map(ExportMap),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportMap {
    #[serde(rename = ".")]
    pub root: ExportConditions,
    #[serde(rename = "./package.json")]
    pub package_json: String,
}

/// Export condition set. `types` must stay first for TypeScript resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require: Option<String>,
}

impl ExportConditions {
    /// Names of the conditions present, in serialization order
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.types.is_some() {
            keys.push("types");
        }
        if self.import.is_some() {
            keys.push("import");
        }
        if self.require.is_some() {
            keys.push("require");
        }
        keys
    }
}

/// Module-resolution fields of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoints {
    pub main: String,
    pub module: Option<String>,
    pub types: Option<String>,
    pub exports: Exports,
}

fn rel(path: &str) -> String {
    format!("./{}", path)
}

/// Entry points for one language × module format combination.
pub fn entry_points(language: Language, format: ModuleFormat) -> EntryPoints {
    match language {
        Language::JavaScript => {
            let entry = rel(&format!("{}/index.js", SOURCE_DIR));
            EntryPoints {
                main: entry.clone(),
                module: format.emits_esm().then(|| entry.clone()),
                types: None,
                exports: Exports::Bare(entry),
            }
        }
        Language::TypeScript => {
            let dist_types = Some(rel(&format!("{}/index.d.ts", BUILD_DIR)));
            let dist_js = rel(&format!("{}/index.js", BUILD_DIR));
            let dist_mjs = rel(&format!("{}/index.mjs", BUILD_DIR));

            let (module, conditions) = match format {
                ModuleFormat::Esm => (
                    None,
                    ExportConditions {
                        types: dist_types,
                        import: Some(dist_js),
                        require: None,
                    },
                ),
                ModuleFormat::CommonJs => (
                    None,
                    ExportConditions {
                        types: dist_types,
                        import: None,
                        require: Some(dist_js),
                    },
                ),
                ModuleFormat::Dual => (
                    Some(rel(ROOT_ESM_ENTRY)),
                    ExportConditions {
                        types: dist_types,
                        import: Some(dist_mjs),
                        require: Some(dist_js),
                    },
                ),
            };

            EntryPoints {
                main: rel(ROOT_ENTRY),
                module,
                types: Some(rel(ROOT_TYPES)),
                exports: Exports::Map(ExportMap {
                    root: conditions,
                    package_json: rel("package.json"),
                }),
            }
        }
    }
}

/// Paths published with the package (`files`)
pub fn files_allowlist(language: Language, format: ModuleFormat) -> Vec<String> {
    match language {
        Language::JavaScript => vec![SOURCE_DIR.to_string()],
        Language::TypeScript => {
            let mut files = vec![
                BUILD_DIR.to_string(),
                ROOT_ENTRY.to_string(),
                ROOT_TYPES.to_string(),
            ];
            if format == ModuleFormat::Dual {
                files.push(ROOT_ESM_ENTRY.to_string());
            }
            files
        }
    }
}

/// Package scripts in the order they appear in the manifest
pub fn scripts(config: &ProjectConfig) -> Vec<(&'static str, String)> {
    let pm = config.package_manager;
    let mut scripts = Vec::new();

    if config.is_typescript() {
        scripts.push(("build", "tsup".to_string()));
        scripts.push(("typecheck", "tsc --noEmit".to_string()));
    }

    let runner = config.test_runner;
    if let (Some(test), Some(watch)) = (runner.test_command(), runner.watch_command()) {
        scripts.push(("test", runner_script(config, test)));
        scripts.push(("test:watch", runner_script(config, watch)));
        if config.has_coverage_script() {
            if let Some(coverage) = runner.coverage_command() {
                scripts.push(("test:coverage", runner_script(config, coverage)));
            }
        }
    }

    if config.linting {
        scripts.push(("lint", "eslint .".to_string()));
        scripts.push(("lint:fix", "eslint . --fix".to_string()));
        scripts.push(("format", "prettier --write .".to_string()));
        scripts.push(("format:check", "prettier --check .".to_string()));
    }

    if config.is_typescript() {
        scripts.push(("check-exports", "attw --pack .".to_string()));
        scripts.push(("prepublishOnly", pm.run("build")));
    }

    if config.dependency_bot {
        scripts.push(("deps:check", pm.dlx("npm-check-updates")));
        scripts.push(("deps:update", pm.dlx("npm-check-updates -u")));
    }

    if config.cd {
        scripts.push((
            "release",
            format!("{} && git push --follow-tags", pm.version_patch()),
        ));
    }

    scripts
}

/// Jest loads ES module tests only through Node's VM modules flag
const JEST_ESM_BIN: &str = "node --experimental-vm-modules node_modules/jest/bin/jest.js";

/// Test runner command as written into the manifest. Plain JavaScript under
/// `type: module` runs Jest through [`JEST_ESM_BIN`]; ts-jest compiles
/// TypeScript tests to CommonJS itself.
fn runner_script(config: &ProjectConfig, command: &str) -> String {
    let esm_tests = !config.is_typescript() && config.module_format.package_type() == "module";
    if config.test_runner == TestRunner::Jest && esm_tests {
        command.replacen("jest", JEST_ESM_BIN, 1)
    } else {
        command.to_string()
    }
}

/// Dev dependencies the configuration needs, before version lookup
pub fn required_dev_dependencies(config: &ProjectConfig) -> Vec<&'static str> {
    let mut deps = Vec::new();

    if config.is_typescript() {
        deps.extend(["typescript", "tsup", "@types/node", "@arethetypeswrong/cli"]);
    }

    match config.test_runner {
        TestRunner::None => {}
        TestRunner::Vitest => {
            deps.push("vitest");
            if config.ci {
                deps.push("@vitest/coverage-v8");
            }
        }
        TestRunner::Jest => {
            deps.push("jest");
            if config.is_typescript() {
                deps.extend(["ts-jest", "@types/jest"]);
            }
        }
    }

    if config.linting {
        deps.extend([
            "eslint",
            "@eslint/js",
            "globals",
            "prettier",
            "eslint-config-prettier",
        ]);
        if config.is_typescript() {
            deps.push("typescript-eslint");
        }
    }

    deps
}

fn repository_links(config: &ProjectConfig) -> Option<RepositoryLinks> {
    let repo = config.github_repo()?;
    let web = format!("https://github.com/{}", repo);
    Some(RepositoryLinks {
        repository: Repository {
            kind: "git".to_string(),
            url: format!("git+{}.git", web),
        },
        bugs: Bugs {
            url: format!("{}/issues", web),
        },
        homepage: format!("{}#readme", web),
    })
}

/// Build the manifest for a configuration.
///
/// Dependencies without a resolved version are left out; the lookup step has
/// already reported them.
pub fn assemble(config: &ProjectConfig, resolved: &ResolvedDependencies) -> PackageManifest {
    let entry = entry_points(config.language, config.module_format);

    let scripts = scripts(config)
        .into_iter()
        .map(|(name, command)| (name.to_string(), Value::String(command)))
        .collect();

    let dev_dependencies = required_dev_dependencies(config)
        .into_iter()
        .filter_map(|name| {
            resolved
                .versions
                .get(name)
                .map(|version| (name.to_string(), version.clone()))
        })
        .collect();

    PackageManifest {
        name: config.package_name.clone(),
        version: INITIAL_VERSION.to_string(),
        description: config.metadata.description.clone(),
        license: "MIT".to_string(),
        author: config.metadata.author(),
        links: repository_links(config),
        package_type: config.module_format.package_type().to_string(),
        main: entry.main,
        module: entry.module,
        types: entry.types,
        exports: entry.exports,
        files: files_allowlist(config.language, config.module_format),
        side_effects: false,
        scripts,
        engines: Engines {
            node: resolved
                .node_engine
                .clone()
                .unwrap_or_else(|| DEFAULT_NODE_ENGINE.to_string()),
        },
        publish_config: config.is_scoped().then(|| PublishConfig {
            access: "public".to_string(),
        }),
        dev_dependencies,
    }
}

/// Serialize a manifest the way package managers write it: two-space
/// indentation and a trailing newline.
pub fn render(manifest: &PackageManifest) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize package.json")?;
    json.push('\n');
    Ok(json)
}
