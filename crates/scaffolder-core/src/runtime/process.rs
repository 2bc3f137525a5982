//! Subprocess execution with captured output and a timeout

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Dependency installs can be slow on cold caches
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// git and build steps
pub const TASK_TIMEOUT: Duration = Duration::from_secs(120);

/// A command line to run inside a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Shell-like rendering for messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `spec` in `dir`, capturing output. Non-zero exit is an error carrying
/// the tail of stderr.
pub async fn run(spec: &CommandSpec, dir: &Path, limit: Duration) -> Result<String> {
    let cmd = spec.display();
    tracing::debug!(command = %cmd, dir = %dir.display(), "running");

    let child = TokioCommand::new(&spec.program)
        .args(&spec.args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start `{}`", cmd))?;

    // Dropping the child on timeout kills it
    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(result) => result.with_context(|| format!("Failed to wait for `{}`", cmd))?,
        Err(_) => anyhow::bail!("`{}` timed out after {} seconds", cmd, limit.as_secs()),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = last_lines(&stderr, 5);
        anyhow::bail!(
            "`{}` failed with exit code {}{}",
            cmd,
            output.status.code().unwrap_or(-1),
            if detail.is_empty() {
                String::new()
            } else {
                format!(":\n{}", detail)
            }
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let spec = CommandSpec::new("git", ["commit", "-m", "Initial commit"]);
        assert_eq!(spec.display(), "git commit -m Initial commit");
    }

    #[test]
    fn test_last_lines() {
        assert_eq!(last_lines("a\n\nb\nc\nd\n", 2), "c\nd");
        assert_eq!(last_lines("", 3), "");
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("pkgsmith-definitely-not-a-binary", Vec::<String>::new());
        let err = run(&spec, dir.path(), TASK_TIMEOUT).await.unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("sh", ["-c", "echo broken >&2; exit 3"]);
        let err = run(&spec, dir.path(), TASK_TIMEOUT).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exit code 3"));
        assert!(message.contains("broken"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("sleep", ["5"]);
        let err = run(&spec, dir.path(), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
