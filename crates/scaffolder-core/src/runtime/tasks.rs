//! Dependency install and the tasks that follow it

use super::process::{self, CommandSpec, INSTALL_TIMEOUT, TASK_TIMEOUT};
use crate::config::{PackageManager, ProjectConfig};
use anyhow::Result;
use futures_util::future::join_all;
use std::fmt;
use std::path::Path;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Install command for the chosen package manager
pub fn install_command(pm: PackageManager) -> CommandSpec {
    CommandSpec::new(pm.name(), pm.install_args().iter().copied())
}

/// Install dependencies in `dir`
pub async fn install(pm: PackageManager, dir: &Path) -> Result<()> {
    process::run(&install_command(pm), dir, INSTALL_TIMEOUT).await?;
    Ok(())
}

/// Work that runs once files are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostInstallTask {
    /// `git init`, stage everything, initial commit
    Git,
    /// Verify the TypeScript build
    Build,
}

impl PostInstallTask {
    pub fn label(&self) -> &'static str {
        match self {
            PostInstallTask::Git => "Initialize git repository",
            PostInstallTask::Build => "Verify build",
        }
    }

    pub fn commands(&self, pm: PackageManager) -> Vec<CommandSpec> {
        match self {
            PostInstallTask::Git => vec![
                CommandSpec::new("git", ["init", "--quiet"]),
                CommandSpec::new("git", ["add", "-A"]),
                CommandSpec::new("git", ["commit", "--quiet", "-m", INITIAL_COMMIT_MESSAGE]),
            ],
            PostInstallTask::Build => vec![CommandSpec::new(pm.name(), ["run", "build"])],
        }
    }
}

impl fmt::Display for PostInstallTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tasks to launch. Git follows the toggle alone; the build needs
/// TypeScript and a successful install.
pub fn planned_tasks(config: &ProjectConfig, install_succeeded: bool) -> Vec<PostInstallTask> {
    let mut tasks = Vec::new();
    if config.git_init {
        tasks.push(PostInstallTask::Git);
    }
    if config.is_typescript() && install_succeeded {
        tasks.push(PostInstallTask::Build);
    }
    tasks
}

/// How one task settled
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: PostInstallTask,
    pub result: Result<()>,
}

async fn run_task(task: PostInstallTask, pm: PackageManager, dir: &Path) -> TaskOutcome {
    let mut result = Ok(());
    // Steps within a task are sequential; stop at the first failure
    for spec in task.commands(pm) {
        if let Err(e) = process::run(&spec, dir, TASK_TIMEOUT).await {
            result = Err(e);
            break;
        }
    }
    TaskOutcome { task, result }
}

/// Run every task concurrently and wait for all of them, whatever their
/// outcome. Outcomes come back in task order.
pub async fn run_tasks(
    tasks: &[PostInstallTask],
    pm: PackageManager,
    dir: &Path,
) -> Vec<TaskOutcome> {
    join_all(tasks.iter().map(|&task| run_task(task, pm, dir))).await
}

/// Commands to suggest once the run is over
pub fn next_steps(config: &ProjectConfig, dir_name: &str, installed: bool) -> Vec<String> {
    let pm = config.package_manager;
    let mut steps = vec![format!("cd {}", dir_name)];
    if !installed {
        steps.push(format!("{} install", pm.name()));
    }
    if config.has_tests() {
        steps.push(pm.run("test"));
    }
    if config.is_typescript() {
        steps.push(pm.run("build"));
    }
    steps
}
