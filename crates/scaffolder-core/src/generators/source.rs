//! Starter source and test files

use crate::config::{Language, ModuleFormat, ProjectConfig, TestRunner};

pub fn entry_file_name(config: &ProjectConfig) -> String {
    format!("src/index.{}", config.language.extension())
}

pub fn test_file_name(config: &ProjectConfig) -> String {
    format!("src/index.test.{}", config.language.extension())
}

/// `src/index.*`
pub fn entry_source(config: &ProjectConfig) -> String {
    match (config.language, config.module_format) {
        (Language::TypeScript, _) => "/**\n * Returns a friendly greeting.\n */\n\
             export function greet(name: string): string {\n\
             \x20 return `Hello, ${name}!`;\n\
             }\n"
            .to_string(),
        (Language::JavaScript, ModuleFormat::CommonJs) => "/**\n * Returns a friendly greeting.\n \
             * @param {string} name\n * @returns {string}\n */\n\
             function greet(name) {\n\
             \x20 return `Hello, ${name}!`;\n\
             }\n\
             \n\
             module.exports = { greet };\n"
            .to_string(),
        (Language::JavaScript, _) => "/**\n * Returns a friendly greeting.\n \
             * @param {string} name\n * @returns {string}\n */\n\
             export function greet(name) {\n\
             \x20 return `Hello, ${name}!`;\n\
             }\n"
            .to_string(),
    }
}

/// `src/index.test.*`, or `None` without a test runner
pub fn test_source(config: &ProjectConfig) -> Option<String> {
    let import = match (config.test_runner, config.language, config.module_format) {
        (TestRunner::None, _, _) => return None,
        (_, Language::TypeScript, _) => "import { greet } from './index';\n",
        (TestRunner::Jest, Language::JavaScript, ModuleFormat::CommonJs) => {
            "const { greet } = require('./index');\n"
        }
        (_, Language::JavaScript, _) => "import { greet } from './index.js';\n",
    };

    let mut out = String::new();
    if config.test_runner == TestRunner::Vitest {
        out.push_str("import { describe, expect, it } from 'vitest';\n");
    }
    out.push_str(import);
    out.push('\n');
    out.push_str("describe('greet', () => {\n");
    out.push_str("  it('greets by name', () => {\n");
    out.push_str("    expect(greet('world')).toBe('Hello, world!');\n");
    out.push_str("  });\n");
    out.push_str("});\n");
    Some(out)
}
