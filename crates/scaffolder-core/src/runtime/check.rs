//! Environment detection: package manager and git identity

use crate::config::PackageManager;
use std::process::Command;

/// Set by npm, pnpm, yarn and bun when they launch a `create` initializer
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Probe order when no user agent is present
const PROBE_ORDER: [PackageManager; 4] = [
    PackageManager::Bun,
    PackageManager::Pnpm,
    PackageManager::Yarn,
    PackageManager::Npm,
];

/// Parse a user agent such as `pnpm/9.12.0 npm/? node/v22.11.0 linux x64`
pub fn from_user_agent(agent: &str) -> Option<PackageManager> {
    let first = agent.split_whitespace().next()?;
    let name = first.split('/').next()?;
    PackageManager::from_name(name)
}

/// Whether `binary --version` runs successfully
pub fn is_installed(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn probe_installed() -> Option<PackageManager> {
    PROBE_ORDER.into_iter().find(|pm| is_installed(pm.name()))
}

/// The package manager that launched us, else the first one installed,
/// else npm
pub fn detect_package_manager() -> PackageManager {
    if let Some(pm) = std::env::var(USER_AGENT_ENV)
        .ok()
        .as_deref()
        .and_then(from_user_agent)
    {
        tracing::debug!(package_manager = %pm, "detected from user agent");
        return pm;
    }

    let pm = probe_installed().unwrap_or(PackageManager::Npm);
    tracing::debug!(package_manager = %pm, "detected by probing");
    pm
}

/// Author identity from the user's git configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GitIdentity {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn git_config(key: &str) -> Option<String> {
    Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read `user.name` and `user.email`; missing git yields an empty identity
pub fn git_identity() -> GitIdentity {
    GitIdentity {
        name: git_config("user.name"),
        email: git_config("user.email"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_parsing() {
        assert_eq!(
            from_user_agent("pnpm/9.12.0 npm/? node/v22.11.0 linux x64"),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(
            from_user_agent("yarn/1.22.22 npm/? node/v20.18.0 darwin arm64"),
            Some(PackageManager::Yarn)
        );
        assert_eq!(
            from_user_agent("bun/1.1.34 npm/? node/v22.6.0 linux x64"),
            Some(PackageManager::Bun)
        );
        assert_eq!(
            from_user_agent("npm/10.9.0 node/v22.11.0 linux x64 workspaces/false"),
            Some(PackageManager::Npm)
        );
    }

    #[test]
    fn test_unknown_user_agent() {
        assert_eq!(from_user_agent(""), None);
        assert_eq!(from_user_agent("deno/2.0.0"), None);
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        assert!(!is_installed("pkgsmith-definitely-not-a-binary"));
    }

    #[test]
    fn test_empty_identity() {
        assert!(GitIdentity::default().is_empty());
        assert!(!GitIdentity {
            name: Some("Ada".to_string()),
            email: None
        }
        .is_empty());
    }
}
