//! File generators
//!
//! Every generator is a pure function of the [`ProjectConfig`] (the manifest
//! also takes looked-up versions). [`plan`] collects their output into the
//! ordered list of files a project consists of; dry runs print that list and
//! the materializer writes it, so both always agree.

pub mod ignore;
pub mod lint;
pub mod manifest;
pub mod readme;
pub mod source;
pub mod testing;
pub mod typescript;
pub mod workflows;

use crate::config::ProjectConfig;
use anyhow::Result;
use std::path::PathBuf;

pub use manifest::{PackageManifest, ResolvedDependencies};

/// One file of the generated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the project root
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Every file for `config`, in write order.
pub fn plan(config: &ProjectConfig, resolved: &ResolvedDependencies) -> Result<Vec<GeneratedFile>> {
    let mut files = vec![
        GeneratedFile::new(
            "package.json",
            manifest::render(&manifest::assemble(config, resolved))?,
        ),
        GeneratedFile::new("README.md", readme::readme(config)),
        GeneratedFile::new(".gitignore", ignore::gitignore()),
        GeneratedFile::new(source::entry_file_name(config), source::entry_source(config)),
    ];

    if let Some(test) = source::test_source(config) {
        files.push(GeneratedFile::new(source::test_file_name(config), test));
    }

    if config.is_typescript() {
        files.push(GeneratedFile::new(
            "tsconfig.json",
            typescript::render_tsconfig(config)?,
        ));
        files.push(GeneratedFile::new(
            "tsup.config.ts",
            typescript::tsup_config(config),
        ));
        for (name, contents) in typescript::root_reexports(config.module_format) {
            files.push(GeneratedFile::new(name, contents));
        }
    }

    if let Some(npmignore) = ignore::npmignore(config) {
        files.push(GeneratedFile::new(".npmignore", npmignore));
    }

    if let (Some(name), Some(contents)) = (
        testing::config_file_name(config),
        testing::runner_config(config),
    ) {
        files.push(GeneratedFile::new(name, contents));
    }

    if config.linting {
        files.push(GeneratedFile::new(
            "eslint.config.mjs",
            lint::eslint_config(config),
        ));
        files.push(GeneratedFile::new(".prettierrc", lint::prettier_config()?));
        files.push(GeneratedFile::new(".prettierignore", lint::prettier_ignore()));
    }

    if config.ci {
        files.push(GeneratedFile::new(
            workflows::CI_WORKFLOW_PATH,
            workflows::render(&workflows::ci_workflow(config))?,
        ));
        if config.cd {
            files.push(GeneratedFile::new(
                workflows::PUBLISH_WORKFLOW_PATH,
                workflows::render(&workflows::publish_workflow(config))?,
            ));
        }
        if config.dependency_bot {
            files.push(GeneratedFile::new(
                workflows::DEPENDABOT_PATH,
                workflows::render(&workflows::dependabot_config())?,
            ));
        }
    }

    Ok(files)
}
