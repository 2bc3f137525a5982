//! Node.js release index (`https://nodejs.org/dist/index.json`)

use super::version::parse_version;
use serde::Deserialize;
use serde_json::Value;

pub const NODE_INDEX_URL: &str = "https://nodejs.org/dist/index.json";

/// How many LTS lines count as supported
const SUPPORTED_LTS_LINES: usize = 3;

/// One entry of the release index
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    /// `false`, or the LTS codename
    #[serde(default)]
    pub lts: Value,
}

impl ReleaseEntry {
    fn is_lts(&self) -> bool {
        matches!(self.lts, Value::String(_))
    }
}

/// `engines.node` range whose floor is the oldest of the newest LTS lines.
pub fn engine_range(entries: &[ReleaseEntry]) -> Option<String> {
    let mut majors: Vec<u64> = entries
        .iter()
        .filter(|e| e.is_lts())
        .filter_map(|e| parse_version(&e.version).ok())
        .map(|v| v.major)
        .collect();
    majors.sort_unstable_by(|a, b| b.cmp(a));
    majors.dedup();

    majors
        .into_iter()
        .take(SUPPORTED_LTS_LINES)
        .min()
        .map(|floor| format!(">={}", floor))
}
