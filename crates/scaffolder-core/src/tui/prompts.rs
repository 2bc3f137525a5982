//! Charm-style CLI prompts using cliclack

use crate::config::{
    directory_name, validate_package_name, Language, Metadata, ModuleFormat, PackageManager,
    ProjectConfig, TestRunner,
};
use crate::error::{is_cancellation, ScaffoldError};
use crate::generators::{self, ResolvedDependencies};
use crate::materialize::{ensure_target_free, write_project};
use crate::profile::{ProfileStore, UserProfile};
use crate::registry::{self, NameAvailability, NpmRegistry, PackageRegistry};
use crate::resolver::metadata::{
    from_profile, metadata_source, optional_text, should_offer_save, MetadataSource,
};
use crate::resolver::{default_answer, next_question, Answer, Answers, Flags, Question};
use crate::runtime::{self, check};
use crate::USER_AGENT;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Package name; prompted for when absent
    pub name: Option<String>,

    /// Accept defaults for everything but the name (non-interactive mode)
    pub yes: bool,

    /// Print the files that would be created and stop
    pub dry_run: bool,

    /// Skip the dependency install and the build check that needs it
    pub skip_install: bool,

    /// Never offer to save author details
    pub no_save: bool,

    /// Pre-answered questions
    pub flags: Flags,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro(" create a new npm package ".on_cyan().black().to_string())?;

    match create(args).await {
        Err(e) if is_cancellation(&e) => {
            cliclack::outro_cancel("Cancelled, nothing was written")?;
            Err(ScaffoldError::Cancelled.into())
        }
        other => other,
    }
}

async fn create(args: CreateArgs) -> Result<()> {
    let interactive = !args.yes;
    let registry = NpmRegistry::from_env(USER_AGENT)?;
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;

    // Step 1: Package name, target directory, availability
    let package_name = acquire_name(&args, &registry, &current_dir, interactive).await?;
    let target_dir = current_dir.join(directory_name(&package_name));

    // Step 2: Feature questions
    let detected = check::detect_package_manager();
    let answers = ask_questions(Answers::from_flags(&args.flags), detected, interactive)?;

    // Step 3: Author metadata
    let store = match ProfileStore::locate() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::debug!(error = %e, "profile storage unavailable");
            None
        }
    };
    let source = metadata_source(
        store.as_ref().and_then(ProfileStore::load),
        check::git_identity(),
    );
    let metadata = collect_metadata(&source, interactive)?;

    if interactive && !args.dry_run && should_offer_save(&source, args.no_save, &metadata) {
        offer_save(store.as_ref(), &metadata)?;
    }

    let config = answers.finalize(package_name, metadata, detected);
    cliclack::note("Configuration", summary(&config))?;

    // Step 4: Dry run stops before any lookup or write
    if args.dry_run {
        let files = generators::plan(&config, &ResolvedDependencies::default())?;
        print_plan(&target_dir, &files);
        cliclack::outro("Dry run complete, nothing was written")?;
        return Ok(());
    }

    // Step 5: Versions and engine range
    let resolved = resolve_versions(&registry, &config).await?;

    // Step 6: Write files
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let files = generators::plan(&config, &resolved)?;
    let written = match write_project(&target_dir, &files).await {
        Ok(written) => written,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        written.len(),
        target_dir.display()
    ));

    // Step 7: Install and post-install tasks
    let installed = install_dependencies(&config, &target_dir, args.skip_install).await?;
    run_post_install(&config, &target_dir, installed).await?;

    // Step 8: Show next steps
    print_next_steps(&config, installed)?;

    Ok(())
}

fn invalid_name(name: &str, source: crate::config::NameError) -> ScaffoldError {
    ScaffoldError::InvalidPackageName {
        name: name.to_string(),
        source,
    }
}

fn prompt_name() -> Result<String> {
    let name: String = cliclack::input("Package name")
        .placeholder("my-package")
        .validate(|input: &String| validate_package_name(input.trim()).map_err(|e| e.to_string()))
        .interact()?;
    Ok(name.trim().to_string())
}

async fn acquire_name<R: PackageRegistry>(
    args: &CreateArgs,
    registry: &R,
    current_dir: &Path,
    interactive: bool,
) -> Result<String> {
    let mut candidate = args.name.clone();

    loop {
        let name = match candidate.take() {
            // A name given on the command line aborts instead of re-prompting
            Some(name) => {
                validate_package_name(&name).map_err(|e| invalid_name(&name, e))?;
                name
            }
            None => prompt_name()?,
        };

        let target_dir = current_dir.join(directory_name(&name));
        if args.dry_run {
            if target_dir.exists() {
                cliclack::log::warning(format!("{} already exists", target_dir.display()))?;
            }
            return Ok(name);
        }
        ensure_target_free(&target_dir)?;

        let spinner = cliclack::spinner();
        spinner.start("Checking name availability...");
        let availability = registry.name_availability(&name).await;

        match availability {
            NameAvailability::Taken => {
                spinner.stop(format!("{} is already published", name));
                cliclack::log::warning(format!(
                    "'{}' is taken on npm; you will need a different name or a scope to publish",
                    name
                ))?;
                if !interactive {
                    return Ok(name);
                }
                let keep: bool = cliclack::confirm("Keep this name anyway?")
                    .initial_value(false)
                    .interact()?;
                if keep {
                    return Ok(name);
                }
            }
            NameAvailability::Unknown(reason) => {
                tracing::debug!(%reason, "availability check failed; assuming available");
                spinner.stop(format!("Package name: {}", name));
                return Ok(name);
            }
            NameAvailability::Available => {
                spinner.stop(format!("{} is available", name));
                return Ok(name);
            }
        }
    }
}

fn ask_questions(mut answers: Answers, detected: PackageManager, interactive: bool) -> Result<Answers> {
    if !interactive {
        return Ok(answers);
    }
    while let Some(question) = next_question(&answers) {
        answers.record(ask(question, detected)?);
    }
    Ok(answers)
}

fn confirm(prompt: &str, initial: bool) -> Result<bool> {
    Ok(cliclack::confirm(prompt).initial_value(initial).interact()?)
}

fn ask(question: &Question, detected: PackageManager) -> Result<Answer> {
    let answer = match default_answer(question.id, detected) {
        Answer::Language(initial) => Answer::Language(
            cliclack::select(question.prompt)
                .item(Language::TypeScript, Language::TypeScript, "built with tsup")
                .item(Language::JavaScript, Language::JavaScript, "no build step")
                .initial_value(initial)
                .interact()?,
        ),
        Answer::ModuleFormat(initial) => Answer::ModuleFormat(
            cliclack::select(question.prompt)
                .item(ModuleFormat::Dual, ModuleFormat::Dual, "import and require")
                .item(ModuleFormat::Esm, ModuleFormat::Esm, "import only")
                .item(ModuleFormat::CommonJs, ModuleFormat::CommonJs, "require only")
                .initial_value(initial)
                .interact()?,
        ),
        Answer::TestRunner(initial) => Answer::TestRunner(
            cliclack::select(question.prompt)
                .item(TestRunner::Vitest, TestRunner::Vitest, "")
                .item(TestRunner::Jest, TestRunner::Jest, "")
                .item(TestRunner::None, TestRunner::None, "")
                .initial_value(initial)
                .interact()?,
        ),
        Answer::PackageManager(initial) => {
            let mut select = cliclack::select(question.prompt);
            for pm in PackageManager::ALL {
                let hint = if pm == detected { "detected" } else { "" };
                select = select.item(pm, pm, hint);
            }
            Answer::PackageManager(select.initial_value(initial).interact()?)
        }
        Answer::Linting(initial) => Answer::Linting(confirm(question.prompt, initial)?),
        Answer::GitInit(initial) => Answer::GitInit(confirm(question.prompt, initial)?),
        Answer::Ci(initial) => Answer::Ci(confirm(question.prompt, initial)?),
        Answer::Cd(initial) => Answer::Cd(confirm(question.prompt, initial)?),
        Answer::CoverageUpload(initial) => Answer::CoverageUpload(confirm(question.prompt, initial)?),
        Answer::DependencyBot(initial) => Answer::DependencyBot(confirm(question.prompt, initial)?),
    };
    Ok(answer)
}

/// Optional free-text field; an empty answer leaves the field out
fn prompt_text(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut input = cliclack::input(prompt).required(false);
    input = match default {
        Some(value) => input.default_input(value),
        None => input.placeholder("optional"),
    };
    let value: String = input.interact()?;
    Ok(optional_text(&value))
}

fn collect_metadata(source: &MetadataSource, interactive: bool) -> Result<Metadata> {
    if !interactive {
        return Ok(source.silent());
    }

    let mut metadata = match source {
        MetadataSource::Profile(profile) => {
            cliclack::log::info(format!("Using saved author profile ({})", describe(profile)))?;
            from_profile(profile)
        }
        MetadataSource::Git(identity) => {
            let who = describe(&UserProfile {
                author: identity.name.clone(),
                email: identity.email.clone(),
                github: None,
            });
            if confirm(&format!("Use your git identity ({})?", who), true)? {
                Metadata {
                    author_name: identity.name.clone(),
                    author_email: identity.email.clone(),
                    github_username: prompt_text("GitHub username", None)?,
                    ..Default::default()
                }
            } else {
                Metadata {
                    author_name: prompt_text("Author name", identity.name.as_deref())?,
                    author_email: prompt_text("Author email", identity.email.as_deref())?,
                    github_username: prompt_text("GitHub username", None)?,
                    ..Default::default()
                }
            }
        }
        MetadataSource::Blank => Metadata {
            author_name: prompt_text("Author name", None)?,
            author_email: prompt_text("Author email", None)?,
            github_username: prompt_text("GitHub username", None)?,
            ..Default::default()
        },
    };

    metadata.description = prompt_text("Description", None)?;
    Ok(metadata)
}

fn describe(profile: &UserProfile) -> String {
    [
        profile.author.clone(),
        profile.email.as_ref().map(|e| format!("<{}>", e)),
        profile.github.as_ref().map(|g| format!("@{}", g)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

fn offer_save(store: Option<&ProfileStore>, metadata: &Metadata) -> Result<()> {
    let Some(store) = store else {
        return Ok(());
    };
    if !confirm("Save these author details for next time?", true)? {
        return Ok(());
    }
    match store.save(&UserProfile::from_metadata(metadata)) {
        Ok(()) => cliclack::log::success(format!("Saved to {}", store.path().display()))?,
        Err(e) => cliclack::log::warning(format!("Could not save profile: {:#}", e))?,
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "yes"
    } else {
        "no"
    }
}

fn summary(config: &ProjectConfig) -> String {
    let mut lines = vec![
        format!("Name:            {}", config.package_name),
        format!("Language:        {}", config.language),
        format!("Module format:   {}", config.module_format),
        format!("Test runner:     {}", config.test_runner),
        format!("Lint + format:   {}", on_off(config.linting)),
        format!("Git:             {}", on_off(config.git_init)),
        format!("CI:              {}", on_off(config.ci)),
    ];
    if config.ci {
        lines.push(format!("Publish:         {}", on_off(config.cd)));
        lines.push(format!("Coverage upload: {}", on_off(config.coverage_upload)));
        lines.push(format!("Dependabot:      {}", on_off(config.dependency_bot)));
    }
    lines.push(format!("Package manager: {}", config.package_manager));
    if let Some(author) = config.metadata.author() {
        lines.push(format!("Author:          {}", author));
    }
    lines.join("\n")
}

fn print_plan(target_dir: &Path, files: &[generators::GeneratedFile]) {
    println!();
    println!("  {}", format!("Would create {}", target_dir.display()).bold());
    println!();
    for file in files {
        println!("  {} {}", "+".green(), file.path.display());
    }
    println!();
}

async fn resolve_versions<R: PackageRegistry>(
    client: &R,
    config: &ProjectConfig,
) -> Result<ResolvedDependencies> {
    let spinner = cliclack::spinner();
    spinner.start("Resolving dependency versions...");
    let resolution = registry::resolve(client, config).await;
    spinner.stop(format!(
        "Resolved {} dev dependencies",
        resolution.dependencies.versions.len()
    ));

    for warning in &resolution.warnings {
        cliclack::log::warning(warning.to_string())?;
    }
    Ok(resolution.dependencies)
}

/// Whether dependencies ended up installed
async fn install_dependencies(
    config: &ProjectConfig,
    target_dir: &Path,
    skip_install: bool,
) -> Result<bool> {
    let pm = config.package_manager;
    if skip_install {
        cliclack::log::info("Skipping dependency install")?;
        return Ok(false);
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Installing dependencies with {}...", pm));
    match runtime::install(pm, target_dir).await {
        Ok(()) => {
            spinner.stop("Dependencies installed");
            Ok(true)
        }
        Err(e) => {
            spinner.stop("Dependency install failed");
            cliclack::log::warning(format!(
                "{:#}\nRun `{} install` inside the project to retry.",
                e,
                pm.name()
            ))?;
            Ok(false)
        }
    }
}

async fn run_post_install(config: &ProjectConfig, target_dir: &Path, installed: bool) -> Result<()> {
    let tasks = runtime::planned_tasks(config, installed);
    if tasks.is_empty() {
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Finishing up...");
    let outcomes = runtime::run_tasks(&tasks, config.package_manager, target_dir).await;
    spinner.stop("Post-install tasks finished");

    for outcome in outcomes {
        match outcome.result {
            Ok(()) => cliclack::log::success(outcome.task.label())?,
            Err(e) => cliclack::log::warning(format!("{} failed: {:#}", outcome.task, e))?,
        }
    }
    Ok(())
}

fn print_next_steps(config: &ProjectConfig, installed: bool) -> Result<()> {
    let steps = runtime::next_steps(config, directory_name(&config.package_name), installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy publishing!")?;

    Ok(())
}

/// Print the saved author profile
pub fn show_profile() -> Result<()> {
    let store = ProfileStore::locate()?;
    match store.load() {
        Some(profile) => {
            println!("{}", store.path().display().to_string().dimmed());
            println!(
                "{}",
                serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?
            );
        }
        None => println!(
            "No saved profile {}",
            format!("({})", store.path().display()).dimmed()
        ),
    }
    Ok(())
}

/// Delete the saved author profile
pub fn reset_profile() -> Result<()> {
    let store = ProfileStore::locate()?;
    if store.reset()? {
        println!("{} Removed {}", "✔".green(), store.path().display());
    } else {
        println!(
            "No saved profile {}",
            format!("({})", store.path().display()).dimmed()
        );
    }
    Ok(())
}
