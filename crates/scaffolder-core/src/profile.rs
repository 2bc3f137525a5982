//! Saved author profile
//!
//! Author name, email and GitHub handle are remembered between runs in
//! `<config dir>/pkgsmith/profile.json` so they only have to be typed once.

use crate::config::Metadata;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "PKGSMITH_CONFIG_DIR";
const APP_DIR: &str = "pkgsmith";
const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl UserProfile {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            author: metadata.author_name.clone(),
            email: metadata.author_email.clone(),
            github: metadata.github_username.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.email.is_none() && self.github.is_none()
    }
}

/// Platform configuration directory, before the app subdirectory
fn base_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }

    if cfg!(windows) {
        return std::env::var_os("APPDATA").map(PathBuf::from);
    }

    let home = std::env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from);
    if cfg!(target_os = "macos") {
        return home.map(|h| h.join("Library").join("Application Support"));
    }

    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
}

/// Reads and writes the profile file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store under the per-user configuration directory
    pub fn locate() -> Result<Self> {
        let base = base_config_dir()
            .context("Could not determine a configuration directory (set PKGSMITH_CONFIG_DIR)")?;
        Ok(Self::in_dir(&base))
    }

    /// Store under `base/pkgsmith`
    pub fn in_dir(base: &Path) -> Self {
        Self {
            path: base.join(APP_DIR).join(PROFILE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved profile; `None` when nothing is saved. An unreadable file
    /// counts as nothing saved.
    pub fn load(&self) -> Option<UserProfile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no saved profile");
                return None;
            }
        };

        match serde_json::from_str::<UserProfile>(&content) {
            Ok(profile) if !profile.is_empty() => Some(profile),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt profile");
                None
            }
        }
    }

    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let mut json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
        json.push('\n');
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))
    }

    /// Delete the saved profile. Returns whether there was one.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}
