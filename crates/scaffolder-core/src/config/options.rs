//! Choice enums for a generated package: language, module format, test runner
//! and package manager

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language of the generated package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }

    /// File extension used for sources and configs written in this language
    pub fn extension(&self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Language::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the package is resolved by consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    Esm,
    #[value(name = "commonjs", alias = "cjs")]
    CommonJs,
    Dual,
}

impl ModuleFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleFormat::Esm => "ESM",
            ModuleFormat::CommonJs => "CommonJS",
            ModuleFormat::Dual => "Dual (ESM + CommonJS)",
        }
    }

    /// Value of the manifest `type` field.
    ///
    /// Dual packages are ESM-first; CommonJS consumers reach them through the
    /// `require` export condition.
    pub fn package_type(&self) -> &'static str {
        match self {
            ModuleFormat::CommonJs => "commonjs",
            ModuleFormat::Esm | ModuleFormat::Dual => "module",
        }
    }

    pub fn emits_esm(&self) -> bool {
        matches!(self, ModuleFormat::Esm | ModuleFormat::Dual)
    }

    pub fn emits_cjs(&self) -> bool {
        matches!(self, ModuleFormat::CommonJs | ModuleFormat::Dual)
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Test framework wired into the package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestRunner {
    None,
    Vitest,
    Jest,
}

impl TestRunner {
    pub fn display_name(&self) -> &'static str {
        match self {
            TestRunner::None => "None",
            TestRunner::Vitest => "Vitest",
            TestRunner::Jest => "Jest",
        }
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, TestRunner::None)
    }

    /// Command behind the `test` script
    pub fn test_command(&self) -> Option<&'static str> {
        match self {
            TestRunner::None => None,
            TestRunner::Vitest => Some("vitest run"),
            TestRunner::Jest => Some("jest"),
        }
    }

    /// Command behind the `test:watch` script
    pub fn watch_command(&self) -> Option<&'static str> {
        match self {
            TestRunner::None => None,
            TestRunner::Vitest => Some("vitest"),
            TestRunner::Jest => Some("jest --watch"),
        }
    }

    /// Command behind the `test:coverage` script
    pub fn coverage_command(&self) -> Option<&'static str> {
        match self {
            TestRunner::None => None,
            TestRunner::Vitest => Some("vitest run --coverage"),
            TestRunner::Jest => Some("jest --coverage"),
        }
    }
}

impl fmt::Display for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Package manager used for install, scripts and CI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Binary name, also used as the display name
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| pm.name() == name)
    }

    /// Command for running a package script, e.g. `pnpm run build`
    pub fn run(&self, script: &str) -> String {
        format!("{} run {}", self.name(), script)
    }

    /// Command that bumps the patch version, commits and tags it
    pub fn version_patch(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm version patch",
            PackageManager::Bun => "bun pm version patch",
            // yarn's own bump does not tag
            PackageManager::Npm | PackageManager::Yarn => "npm version patch",
        }
    }

    /// Command for running a tool without installing it
    pub fn dlx(&self, tool: &str) -> String {
        match self {
            PackageManager::Npm => format!("npx {}", tool),
            PackageManager::Pnpm => format!("pnpm dlx {}", tool),
            PackageManager::Yarn => format!("yarn dlx {}", tool),
            PackageManager::Bun => format!("bunx {}", tool),
        }
    }

    /// Command for adding the package to another project
    pub fn add_command(&self, package: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm install {}", package),
            _ => format!("{} add {}", self.name(), package),
        }
    }

    /// Arguments for a plain local install
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Lockfile-respecting install used in CI
    pub fn ci_install_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm ci",
            PackageManager::Pnpm => "pnpm install --frozen-lockfile",
            PackageManager::Yarn => "yarn install --frozen-lockfile",
            PackageManager::Bun => "bun install --frozen-lockfile",
        }
    }

    /// Value for `actions/setup-node`'s `cache` input, if supported
    pub fn setup_node_cache(&self) -> Option<&'static str> {
        match self {
            PackageManager::Npm => Some("npm"),
            PackageManager::Pnpm => Some("pnpm"),
            PackageManager::Yarn => Some("yarn"),
            PackageManager::Bun => None,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_type_follows_module_format() {
        assert_eq!(ModuleFormat::CommonJs.package_type(), "commonjs");
        assert_eq!(ModuleFormat::Esm.package_type(), "module");
        assert_eq!(ModuleFormat::Dual.package_type(), "module");
    }

    #[test]
    fn test_format_emission_flags() {
        assert!(ModuleFormat::Dual.emits_cjs() && ModuleFormat::Dual.emits_esm());
        assert!(!ModuleFormat::Esm.emits_cjs());
        assert!(!ModuleFormat::CommonJs.emits_esm());
    }

    #[test]
    fn test_runner_commands_absent_for_none() {
        assert!(TestRunner::None.test_command().is_none());
        assert!(TestRunner::None.watch_command().is_none());
        assert!(TestRunner::None.coverage_command().is_none());
        assert_eq!(TestRunner::Vitest.coverage_command(), Some("vitest run --coverage"));
    }

    #[test]
    fn test_package_manager_commands() {
        assert_eq!(PackageManager::Pnpm.run("build"), "pnpm run build");
        assert_eq!(PackageManager::Npm.add_command("x"), "npm install x");
        assert_eq!(PackageManager::Bun.add_command("x"), "bun add x");
        assert_eq!(PackageManager::Bun.dlx("ncu"), "bunx ncu");
        assert_eq!(PackageManager::from_name("yarn"), Some(PackageManager::Yarn));
        assert_eq!(PackageManager::from_name("deno"), None);
    }

    #[test]
    fn test_value_enum_aliases() {
        assert_eq!(Language::from_str("ts", true), Ok(Language::TypeScript));
        assert_eq!(ModuleFormat::from_str("cjs", true), Ok(ModuleFormat::CommonJs));
        assert_eq!(ModuleFormat::from_str("commonjs", true), Ok(ModuleFormat::CommonJs));
    }
}
