//! README generation

use crate::config::{Language, ModuleFormat, ProjectConfig};

/// Badge markdown, in display order
pub fn badges(config: &ProjectConfig) -> Vec<String> {
    let name = &config.package_name;
    let mut badges = vec![format!(
        "[![npm version](https://img.shields.io/npm/v/{name}.svg)](https://www.npmjs.com/package/{name})",
        name = name
    )];

    // CI and coverage badges are keyed by the GitHub repository.
    if let Some(repo) = config.github_repo() {
        if config.ci {
            badges.push(format!(
                "[![CI](https://github.com/{repo}/actions/workflows/ci.yml/badge.svg)](https://github.com/{repo}/actions/workflows/ci.yml)",
                repo = repo
            ));
        }
        if config.coverage_upload && config.has_tests() {
            badges.push(format!(
                "[![codecov](https://codecov.io/gh/{repo}/branch/main/graph/badge.svg)](https://codecov.io/gh/{repo})",
                repo = repo
            ));
        }
    }

    badges.push(
        "[![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)"
            .to_string(),
    );
    badges
}

fn usage_snippet(config: &ProjectConfig) -> String {
    let name = &config.package_name;
    let (lang, import) = match (config.language, config.module_format) {
        (Language::TypeScript, _) => ("ts", format!("import {{ greet }} from '{}';", name)),
        (Language::JavaScript, ModuleFormat::CommonJs) => {
            ("js", format!("const {{ greet }} = require('{}');", name))
        }
        (Language::JavaScript, _) => ("js", format!("import {{ greet }} from '{}';", name)),
    };
    format!(
        "```{}\n{}\n\nconsole.log(greet('world')); // Hello, world!\n```\n",
        lang, import
    )
}

/// `README.md`
pub fn readme(config: &ProjectConfig) -> String {
    let pm = config.package_manager;
    let mut out = format!("# {}\n\n", config.package_name);

    out.push_str(&badges(config).join("\n"));
    out.push_str("\n\n");

    if let Some(description) = &config.metadata.description {
        out.push_str(description);
        out.push_str("\n\n");
    }

    out.push_str("## Installation\n\n");
    out.push_str(&format!("```sh\n{}\n```\n\n", pm.add_command(&config.package_name)));

    out.push_str("## Usage\n\n");
    out.push_str(&usage_snippet(config));
    out.push('\n');

    out.push_str("## Development\n\n");
    out.push_str(&format!("```sh\n{} install\n", pm.name()));
    if config.is_typescript() {
        out.push_str(&format!("{}\n", pm.run("build")));
    }
    out.push_str("```\n\n");

    if config.has_tests() {
        out.push_str("### Testing\n\n");
        out.push_str(&format!("```sh\n{}\n{}\n", pm.run("test"), pm.run("test:watch")));
        if config.has_coverage_script() {
            out.push_str(&format!("{}\n", pm.run("test:coverage")));
        }
        out.push_str("```\n\n");
    }

    if config.linting {
        out.push_str("### Linting and formatting\n\n");
        out.push_str(&format!(
            "```sh\n{}\n{}\n{}\n```\n\n",
            pm.run("lint"),
            pm.run("lint:fix"),
            pm.run("format")
        ));
    }

    if config.is_typescript() {
        out.push_str("### Validating exports\n\n");
        out.push_str(
            "Checks that the published types resolve for every import style:\n\n",
        );
        out.push_str(&format!("```sh\n{}\n```\n\n", pm.run("check-exports")));
    }

    if config.cd {
        out.push_str("## Releasing\n\n");
        out.push_str(&format!(
            "```sh\n{}\n```\n\n\
             This bumps the version and pushes a `v*` tag. Publishing a GitHub release \
             for that tag runs the publish workflow. It needs an `NPM_TOKEN` repository secret.\n\n",
            pm.run("release")
        ));
    }

    if let Some(repo) = config.github_repo() {
        out.push_str("## Contributing\n\n");
        out.push_str(&format!(
            "Issues and pull requests are welcome at \
             [github.com/{repo}](https://github.com/{repo}/issues).\n\n",
            repo = repo
        ));
    }

    out.push_str("## License\n\nMIT\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{default_config, with_github};
    use crate::config::TestRunner;

    #[test]
    fn test_ci_badge_requires_ci() {
        let with_ci = with_github(default_config());
        assert!(badges(&with_ci).iter().any(|b| b.contains("ci.yml/badge.svg")));

        let without_ci = ProjectConfig {
            ci: false,
            ..with_github(default_config())
        };
        assert!(!badges(&without_ci).iter().any(|b| b.contains("ci.yml")));
    }

    #[test]
    fn test_coverage_badge_requires_runner_and_upload() {
        let upload = ProjectConfig {
            coverage_upload: true,
            ..with_github(default_config())
        };
        assert!(badges(&upload).iter().any(|b| b.contains("codecov")));

        let no_runner = ProjectConfig {
            test_runner: TestRunner::None,
            ..upload.clone()
        };
        assert!(!badges(&no_runner).iter().any(|b| b.contains("codecov")));

        let no_upload = with_github(default_config());
        assert!(!badges(&no_upload).iter().any(|b| b.contains("codecov")));
    }

    #[test]
    fn test_sections_are_gated() {
        let full = readme(&ProjectConfig {
            cd: true,
            ..with_github(default_config())
        });
        for heading in [
            "### Testing",
            "### Linting and formatting",
            "### Validating exports",
            "## Releasing",
            "## Contributing",
        ] {
            assert!(full.contains(heading), "{}", heading);
        }
        assert!(full.contains("A sample library"));
        assert!(full.contains("Publishing a GitHub release for that tag runs the publish workflow."));

        let bare = readme(&ProjectConfig {
            language: Language::JavaScript,
            test_runner: TestRunner::None,
            linting: false,
            ..default_config()
        });
        for heading in [
            "### Testing",
            "### Linting",
            "### Validating exports",
            "## Releasing",
            "## Contributing",
        ] {
            assert!(!bare.contains(heading), "{}", heading);
        }
    }

    #[test]
    fn test_usage_snippet_matches_module_format() {
        let cjs = readme(&ProjectConfig {
            language: Language::JavaScript,
            module_format: ModuleFormat::CommonJs,
            ..default_config()
        });
        assert!(cjs.contains("const { greet } = require('sample-lib');"));
        assert!(readme(&default_config()).contains("import { greet } from 'sample-lib';"));
    }
}
