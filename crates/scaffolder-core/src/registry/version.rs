//! Version parsing for registry and release-feed data

use anyhow::Result;
use semver::Version;

/// Parse version string, handling a leading `v` (`v22.11.0`)
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Caret range accepting compatible updates of `version_str`
pub fn caret_range(version_str: &str) -> Result<String> {
    let version = parse_version(version_str)?;
    Ok(format!("^{}", version))
}
