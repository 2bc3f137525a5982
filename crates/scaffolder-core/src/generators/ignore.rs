//! `.gitignore` and `.npmignore`

use crate::config::ProjectConfig;

const GITIGNORE: &[&str] = &[
    "node_modules/",
    "dist/",
    "coverage/",
    "*.log",
    "*.tsbuildinfo",
    ".env",
    ".env.*",
    ".DS_Store",
];

/// Excluded from TypeScript packages: sources and build intermediates
const NPMIGNORE: &[&str] = &[
    "src/",
    "coverage/",
    ".github/",
    "*.test.ts",
    "*.tsbuildinfo",
    "tsconfig.json",
    "tsup.config.ts",
    "vitest.config.ts",
    "jest.config.*",
    "eslint.config.mjs",
    ".prettierrc",
    ".prettierignore",
];

fn lines(entries: &[&str]) -> String {
    entries.iter().map(|e| format!("{}\n", e)).collect()
}

pub fn gitignore() -> String {
    lines(GITIGNORE)
}

/// `.npmignore`; JavaScript packages ship their source and get none
pub fn npmignore(config: &ProjectConfig) -> Option<String> {
    config.is_typescript().then(|| lines(NPMIGNORE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::default_config;
    use crate::config::Language;

    #[test]
    fn test_gitignore_covers_build_output() {
        let content = gitignore();
        assert!(content.contains("node_modules/\n"));
        assert!(content.contains("dist/\n"));
    }

    #[test]
    fn test_npmignore_only_for_typescript() {
        let ts = npmignore(&default_config()).unwrap();
        assert!(ts.starts_with("src/\n"));
        assert!(ts.contains("*.tsbuildinfo"));

        let js = ProjectConfig {
            language: Language::JavaScript,
            ..default_config()
        };
        assert!(npmignore(&js).is_none());
    }
}
