//! Environment detection and subprocesses
//!
//! This module provides:
//! - Package manager and git identity detection
//! - A subprocess runner with captured output and timeouts
//! - Dependency install and the post-install tasks (git, build)

pub mod check;
pub mod process;
pub mod tasks;

pub use check::{detect_package_manager, git_identity, GitIdentity};
pub use process::CommandSpec;
pub use tasks::{install, next_steps, planned_tasks, run_tasks, PostInstallTask, TaskOutcome};
