//! Test runner configuration (Vitest, Jest)

use crate::config::{ModuleFormat, ProjectConfig, TestRunner};

/// Config file name for the selected runner, or `None` without a runner.
///
/// Jest configs are CommonJS; in `type: module` packages that needs `.cjs`.
pub fn config_file_name(config: &ProjectConfig) -> Option<&'static str> {
    match config.test_runner {
        TestRunner::None => None,
        TestRunner::Vitest if config.is_typescript() => Some("vitest.config.ts"),
        TestRunner::Vitest => Some("vitest.config.mjs"),
        TestRunner::Jest if config.module_format == ModuleFormat::CommonJs => {
            Some("jest.config.js")
        }
        TestRunner::Jest => Some("jest.config.cjs"),
    }
}

/// Contents of the runner config file
pub fn runner_config(config: &ProjectConfig) -> Option<String> {
    let ext = config.language.extension();
    match config.test_runner {
        TestRunner::None => None,
        TestRunner::Vitest => Some(vitest_config(config, ext)),
        TestRunner::Jest => Some(jest_config(config, ext)),
    }
}

fn vitest_config(config: &ProjectConfig, ext: &str) -> String {
    let mut out = String::from("import { defineConfig } from 'vitest/config';\n\n");
    out.push_str("export default defineConfig({\n");
    out.push_str("  test: {\n");
    out.push_str(&format!("    include: ['src/**/*.test.{}'],\n", ext));
    if config.has_coverage_script() {
        out.push_str("    coverage: {\n");
        out.push_str("      provider: 'v8',\n");
        out.push_str("      reporter: ['text', 'lcov'],\n");
        out.push_str("      include: ['src/**'],\n");
        out.push_str("    },\n");
    }
    out.push_str("  },\n");
    out.push_str("});\n");
    out
}

fn jest_config(config: &ProjectConfig, ext: &str) -> String {
    let mut out = String::from("/** @type {import('jest').Config} */\n");
    out.push_str("module.exports = {\n");
    if config.is_typescript() {
        out.push_str("  preset: 'ts-jest',\n");
    }
    out.push_str("  testEnvironment: 'node',\n");
    out.push_str(&format!("  testMatch: ['<rootDir>/src/**/*.test.{}'],\n", ext));
    if config.has_coverage_script() {
        out.push_str(&format!(
            "  collectCoverageFrom: ['src/**/*.{ext}', '!src/**/*.test.{ext}'],\n",
            ext = ext
        ));
        out.push_str("  coverageReporters: ['text', 'lcov'],\n");
    }
    out.push_str("};\n");
    out
}
