//! Configuration resolver
//!
//! The interactive flow is an ordered list of [`QUESTIONS`], each with a
//! predicate over the answers collected so far. [`next_question`] walks that
//! list; the presentation layer asks whatever it returns and records the
//! [`Answer`]. Flags pre-answer their question, so it is never asked.
//! [`Answers::finalize`] fills the gaps with defaults and enforces the
//! CI dependency rules, whichever path the answers came from.

pub mod metadata;

use crate::config::{
    Language, Metadata, ModuleFormat, PackageManager, ProjectConfig, TestRunner,
};

/// Choices that can be forced from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub language: Option<Language>,
    pub module_format: Option<ModuleFormat>,
    pub test_runner: Option<TestRunner>,
    pub package_manager: Option<PackageManager>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    Language,
    ModuleFormat,
    TestRunner,
    Linting,
    GitInit,
    Ci,
    Cd,
    CoverageUpload,
    DependencyBot,
    PackageManager,
}

/// One recorded answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Language(Language),
    ModuleFormat(ModuleFormat),
    TestRunner(TestRunner),
    Linting(bool),
    GitInit(bool),
    Ci(bool),
    Cd(bool),
    CoverageUpload(bool),
    DependencyBot(bool),
    PackageManager(PackageManager),
}

impl Answer {
    pub fn question(&self) -> QuestionId {
        match self {
            Answer::Language(_) => QuestionId::Language,
            Answer::ModuleFormat(_) => QuestionId::ModuleFormat,
            Answer::TestRunner(_) => QuestionId::TestRunner,
            Answer::Linting(_) => QuestionId::Linting,
            Answer::GitInit(_) => QuestionId::GitInit,
            Answer::Ci(_) => QuestionId::Ci,
            Answer::Cd(_) => QuestionId::Cd,
            Answer::CoverageUpload(_) => QuestionId::CoverageUpload,
            Answer::DependencyBot(_) => QuestionId::DependencyBot,
            Answer::PackageManager(_) => QuestionId::PackageManager,
        }
    }
}

/// A question in the interactive flow
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    /// Whether the question applies given earlier answers
    pub applies: fn(&Answers) -> bool,
}

fn always(_: &Answers) -> bool {
    true
}

fn ci_enabled(answers: &Answers) -> bool {
    answers.ci == Some(true)
}

fn ci_with_tests(answers: &Answers) -> bool {
    ci_enabled(answers) && answers.test_runner.is_some_and(|r| r.is_some())
}

/// Every question, in asking order
pub const QUESTIONS: &[Question] = &[
    Question {
        id: QuestionId::Language,
        prompt: "Language",
        applies: always,
    },
    Question {
        id: QuestionId::ModuleFormat,
        prompt: "Module format",
        applies: always,
    },
    Question {
        id: QuestionId::TestRunner,
        prompt: "Test runner",
        applies: always,
    },
    Question {
        id: QuestionId::Linting,
        prompt: "Set up ESLint and Prettier?",
        applies: always,
    },
    Question {
        id: QuestionId::GitInit,
        prompt: "Initialize a git repository?",
        applies: always,
    },
    Question {
        id: QuestionId::Ci,
        prompt: "Add a GitHub Actions CI workflow?",
        applies: always,
    },
    Question {
        id: QuestionId::Cd,
        prompt: "Add a workflow that publishes to npm on release?",
        applies: ci_enabled,
    },
    Question {
        id: QuestionId::CoverageUpload,
        prompt: "Upload coverage to Codecov?",
        applies: ci_with_tests,
    },
    Question {
        id: QuestionId::DependencyBot,
        prompt: "Enable Dependabot updates?",
        applies: ci_enabled,
    },
    Question {
        id: QuestionId::PackageManager,
        prompt: "Package manager",
        applies: always,
    },
];

/// Answers collected so far; `None` means not (yet) answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Answers {
    pub language: Option<Language>,
    pub module_format: Option<ModuleFormat>,
    pub test_runner: Option<TestRunner>,
    pub linting: Option<bool>,
    pub git_init: Option<bool>,
    pub ci: Option<bool>,
    pub cd: Option<bool>,
    pub coverage_upload: Option<bool>,
    pub dependency_bot: Option<bool>,
    pub package_manager: Option<PackageManager>,
}

impl Answers {
    /// Start from the forced flags
    pub fn from_flags(flags: &Flags) -> Self {
        Self {
            language: flags.language,
            module_format: flags.module_format,
            test_runner: flags.test_runner,
            package_manager: flags.package_manager,
            ..Default::default()
        }
    }

    pub fn record(&mut self, answer: Answer) {
        match answer {
            Answer::Language(v) => self.language = Some(v),
            Answer::ModuleFormat(v) => self.module_format = Some(v),
            Answer::TestRunner(v) => self.test_runner = Some(v),
            Answer::Linting(v) => self.linting = Some(v),
            Answer::GitInit(v) => self.git_init = Some(v),
            Answer::Ci(v) => self.ci = Some(v),
            Answer::Cd(v) => self.cd = Some(v),
            Answer::CoverageUpload(v) => self.coverage_upload = Some(v),
            Answer::DependencyBot(v) => self.dependency_bot = Some(v),
            Answer::PackageManager(v) => self.package_manager = Some(v),
        }
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        match id {
            QuestionId::Language => self.language.is_some(),
            QuestionId::ModuleFormat => self.module_format.is_some(),
            QuestionId::TestRunner => self.test_runner.is_some(),
            QuestionId::Linting => self.linting.is_some(),
            QuestionId::GitInit => self.git_init.is_some(),
            QuestionId::Ci => self.ci.is_some(),
            QuestionId::Cd => self.cd.is_some(),
            QuestionId::CoverageUpload => self.coverage_upload.is_some(),
            QuestionId::DependencyBot => self.dependency_bot.is_some(),
            QuestionId::PackageManager => self.package_manager.is_some(),
        }
    }

    /// Build the configuration. Unanswered questions take their default, and
    /// the CI-dependent toggles are cleared when their prerequisites are off.
    pub fn finalize(
        self,
        package_name: String,
        metadata: Metadata,
        detected: PackageManager,
    ) -> ProjectConfig {
        let take = |id: QuestionId| self.answer_or_default(id, detected);

        let language = match take(QuestionId::Language) {
            Answer::Language(v) => v,
            _ => Language::TypeScript,
        };
        let module_format = match take(QuestionId::ModuleFormat) {
            Answer::ModuleFormat(v) => v,
            _ => ModuleFormat::Dual,
        };
        let test_runner = match take(QuestionId::TestRunner) {
            Answer::TestRunner(v) => v,
            _ => TestRunner::Vitest,
        };
        let package_manager = match take(QuestionId::PackageManager) {
            Answer::PackageManager(v) => v,
            _ => detected,
        };
        let toggle = |id: QuestionId| matches!(
            take(id),
            Answer::Linting(true)
                | Answer::GitInit(true)
                | Answer::Ci(true)
                | Answer::Cd(true)
                | Answer::CoverageUpload(true)
                | Answer::DependencyBot(true)
        );

        let ci = toggle(QuestionId::Ci);
        ProjectConfig {
            package_name,
            language,
            module_format,
            test_runner,
            linting: toggle(QuestionId::Linting),
            git_init: toggle(QuestionId::GitInit),
            ci,
            cd: ci && toggle(QuestionId::Cd),
            coverage_upload: ci && test_runner.is_some() && toggle(QuestionId::CoverageUpload),
            dependency_bot: ci && toggle(QuestionId::DependencyBot),
            package_manager,
            metadata,
        }
    }

    fn answer_or_default(&self, id: QuestionId, detected: PackageManager) -> Answer {
        let recorded = match id {
            QuestionId::Language => self.language.map(Answer::Language),
            QuestionId::ModuleFormat => self.module_format.map(Answer::ModuleFormat),
            QuestionId::TestRunner => self.test_runner.map(Answer::TestRunner),
            QuestionId::Linting => self.linting.map(Answer::Linting),
            QuestionId::GitInit => self.git_init.map(Answer::GitInit),
            QuestionId::Ci => self.ci.map(Answer::Ci),
            QuestionId::Cd => self.cd.map(Answer::Cd),
            QuestionId::CoverageUpload => self.coverage_upload.map(Answer::CoverageUpload),
            QuestionId::DependencyBot => self.dependency_bot.map(Answer::DependencyBot),
            QuestionId::PackageManager => self.package_manager.map(Answer::PackageManager),
        };
        recorded.unwrap_or_else(|| default_answer(id, detected))
    }
}

/// The accept-defaults bundle, also used as the initial value of each prompt
pub fn default_answer(id: QuestionId, detected: PackageManager) -> Answer {
    match id {
        QuestionId::Language => Answer::Language(Language::TypeScript),
        QuestionId::ModuleFormat => Answer::ModuleFormat(ModuleFormat::Dual),
        QuestionId::TestRunner => Answer::TestRunner(TestRunner::Vitest),
        QuestionId::Linting => Answer::Linting(true),
        QuestionId::GitInit => Answer::GitInit(false),
        QuestionId::Ci => Answer::Ci(true),
        QuestionId::Cd => Answer::Cd(false),
        QuestionId::CoverageUpload => Answer::CoverageUpload(false),
        QuestionId::DependencyBot => Answer::DependencyBot(false),
        QuestionId::PackageManager => Answer::PackageManager(detected),
    }
}

/// The next question to ask, or `None` when the flow is complete
pub fn next_question(answers: &Answers) -> Option<&'static Question> {
    QUESTIONS
        .iter()
        .find(|q| !answers.is_answered(q.id) && (q.applies)(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answer every question the flow asks using `pick`, returning the ids asked
    fn walk(mut answers: Answers, pick: impl Fn(QuestionId) -> Answer) -> (Answers, Vec<QuestionId>) {
        let mut asked = Vec::new();
        while let Some(question) = next_question(&answers) {
            asked.push(question.id);
            answers.record(pick(question.id));
        }
        (answers, asked)
    }

    fn yes_to_everything(id: QuestionId) -> Answer {
        match default_answer(id, PackageManager::Npm) {
            Answer::Linting(_) => Answer::Linting(true),
            Answer::GitInit(_) => Answer::GitInit(true),
            Answer::Ci(_) => Answer::Ci(true),
            Answer::Cd(_) => Answer::Cd(true),
            Answer::CoverageUpload(_) => Answer::CoverageUpload(true),
            Answer::DependencyBot(_) => Answer::DependencyBot(true),
            other => other,
        }
    }

    #[test]
    fn test_questions_are_unique_and_ordered() {
        let ids: Vec<_> = QUESTIONS.iter().map(|q| q.id).collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.first(), Some(&QuestionId::Language));
    }

    #[test]
    fn test_full_walk_asks_everything() {
        let (_, asked) = walk(Answers::default(), yes_to_everything);
        assert_eq!(asked.len(), QUESTIONS.len());
    }

    #[test]
    fn test_declining_ci_skips_dependent_questions() {
        let (answers, asked) = walk(Answers::default(), |id| match id {
            QuestionId::Ci => Answer::Ci(false),
            other => yes_to_everything(other),
        });
        assert!(!asked.contains(&QuestionId::Cd));
        assert!(!asked.contains(&QuestionId::CoverageUpload));
        assert!(!asked.contains(&QuestionId::DependencyBot));
        assert!(asked.contains(&QuestionId::PackageManager));

        let config = answers.finalize("x".into(), Metadata::default(), PackageManager::Npm);
        assert!(!config.ci && !config.cd && !config.coverage_upload && !config.dependency_bot);
    }

    #[test]
    fn test_no_runner_skips_coverage_question() {
        let (_, asked) = walk(Answers::default(), |id| match id {
            QuestionId::TestRunner => Answer::TestRunner(TestRunner::None),
            other => yes_to_everything(other),
        });
        assert!(!asked.contains(&QuestionId::CoverageUpload));
        assert!(asked.contains(&QuestionId::Cd));
    }

    #[test]
    fn test_flags_short_circuit_their_question() {
        let flags = Flags {
            language: Some(Language::JavaScript),
            test_runner: Some(TestRunner::Jest),
            package_manager: Some(PackageManager::Pnpm),
            ..Default::default()
        };
        let (answers, asked) = walk(Answers::from_flags(&flags), yes_to_everything);
        assert!(!asked.contains(&QuestionId::Language));
        assert!(!asked.contains(&QuestionId::TestRunner));
        assert!(!asked.contains(&QuestionId::PackageManager));
        assert!(asked.contains(&QuestionId::ModuleFormat));

        let config = answers.finalize("x".into(), Metadata::default(), PackageManager::Npm);
        assert_eq!(config.language, Language::JavaScript);
        assert_eq!(config.test_runner, TestRunner::Jest);
        assert_eq!(config.package_manager, PackageManager::Pnpm);
    }

    #[test]
    fn test_defaults_bundle() {
        let config = Answers::default().finalize(
            "sample-lib".into(),
            Metadata::default(),
            PackageManager::Yarn,
        );
        assert_eq!(config.language, Language::TypeScript);
        assert_eq!(config.module_format, ModuleFormat::Dual);
        assert_eq!(config.test_runner, TestRunner::Vitest);
        assert!(config.linting);
        assert!(!config.git_init);
        assert!(config.ci);
        assert!(!config.cd && !config.coverage_upload && !config.dependency_bot);
        assert_eq!(config.package_manager, PackageManager::Yarn);
    }

    #[test]
    fn test_coverage_never_without_ci_and_runner() {
        let runners = [TestRunner::None, TestRunner::Vitest, TestRunner::Jest];
        for runner in runners {
            for ci in [false, true] {
                // Recorded directly, as if every answer came from outside the flow
                let answers = Answers {
                    test_runner: Some(runner),
                    ci: Some(ci),
                    cd: Some(true),
                    coverage_upload: Some(true),
                    dependency_bot: Some(true),
                    ..Default::default()
                };
                let config = answers.finalize("x".into(), Metadata::default(), PackageManager::Npm);
                assert_eq!(config.coverage_upload, ci && runner.is_some());
                assert_eq!(config.cd, ci);
                assert_eq!(config.dependency_bot, ci);
            }
        }
    }

    #[test]
    fn test_runner_flag_none_with_interactive_ci() {
        let flags = Flags {
            test_runner: Some(TestRunner::None),
            ..Default::default()
        };
        let (answers, asked) = walk(Answers::from_flags(&flags), yes_to_everything);
        assert!(!asked.contains(&QuestionId::CoverageUpload));
        let config = answers.finalize("x".into(), Metadata::default(), PackageManager::Npm);
        assert!(!config.coverage_upload);
    }
}
