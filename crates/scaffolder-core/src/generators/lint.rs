//! ESLint flat config and Prettier config

use super::typescript::root_reexports;
use crate::config::{ProjectConfig, TestRunner};
use anyhow::{Context, Result};
use serde::Serialize;

/// One entry spread into the flat config array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintExtension {
    /// `@eslint/js` recommended rules
    Recommended,
    /// `typescript-eslint` recommended rules
    TypeScript,
    /// `eslint-config-prettier`; turns off rules Prettier owns
    Prettier,
}

impl LintExtension {
    fn import(&self) -> &'static str {
        match self {
            LintExtension::Recommended => "import js from '@eslint/js';",
            LintExtension::TypeScript => "import tseslint from 'typescript-eslint';",
            LintExtension::Prettier => "import prettier from 'eslint-config-prettier';",
        }
    }

    fn entry(&self) -> &'static str {
        match self {
            LintExtension::Recommended => "js.configs.recommended",
            LintExtension::TypeScript => "...tseslint.configs.recommended",
            LintExtension::Prettier => "prettier",
        }
    }
}

/// Extensions in application order. Prettier is always last.
pub fn lint_extensions(config: &ProjectConfig) -> Vec<LintExtension> {
    let mut extensions = vec![LintExtension::Recommended];
    if config.is_typescript() {
        extensions.push(LintExtension::TypeScript);
    }
    extensions.push(LintExtension::Prettier);
    extensions
}

/// Paths ESLint skips. Root re-export shims are generated, not source.
pub fn ignores(config: &ProjectConfig) -> Vec<&'static str> {
    let mut ignores = vec!["dist/", "coverage/", "node_modules/"];
    if config.is_typescript() {
        ignores.extend(root_reexports(config.module_format).into_iter().map(|(name, _)| name));
    }
    ignores
}

/// `globals` sets enabled for every file. Jest tests use its globals
/// without importing them.
pub fn global_sets(config: &ProjectConfig) -> Vec<&'static str> {
    let mut sets = vec!["node"];
    if config.test_runner == TestRunner::Jest {
        sets.push("jest");
    }
    sets
}

fn quoted(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `eslint.config.mjs`
pub fn eslint_config(config: &ProjectConfig) -> String {
    let extensions = lint_extensions(config);

    let mut out = String::new();
    for ext in &extensions {
        out.push_str(ext.import());
        out.push('\n');
    }
    out.push_str("import globals from 'globals';\n\n");
    out.push_str("export default [\n");
    out.push_str(&format!("  {{ ignores: [{}] }},\n", quoted(&ignores(config))));
    out.push_str(&format!(
        "  {{ languageOptions: {{ globals: {{ {} }} }} }},\n",
        global_sets(config)
            .iter()
            .map(|set| format!("...globals.{}", set))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    for ext in &extensions {
        out.push_str("  ");
        out.push_str(ext.entry());
        out.push_str(",\n");
    }
    out.push_str("];\n");
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrettierConfig {
    pub semi: bool,
    pub single_quote: bool,
    pub trailing_comma: String,
    pub print_width: u32,
}

/// `.prettierrc`
pub fn prettier_config() -> Result<String> {
    let config = PrettierConfig {
        semi: true,
        single_quote: true,
        trailing_comma: "all".to_string(),
        print_width: 100,
    };
    let mut json = serde_json::to_string_pretty(&config).context("Failed to serialize .prettierrc")?;
    json.push('\n');
    Ok(json)
}

/// `.prettierignore`
pub fn prettier_ignore() -> String {
    ["dist", "coverage", "node_modules", "pnpm-lock.yaml", "package-lock.json"]
        .iter()
        .map(|line| format!("{}\n", line))
        .collect()
}
