//! Advisory lookups against the package registry and the Node.js release feed
//!
//! Nothing here is fatal: a failed lookup becomes a [`LookupWarning`] and the
//! manifest is assembled without the missing piece.

pub mod node;
pub mod npm;
pub mod version;

use crate::config::ProjectConfig;
use crate::generators::manifest::{required_dev_dependencies, DEFAULT_NODE_ENGINE};
use crate::generators::ResolvedDependencies;
use anyhow::Result;
use futures_util::future::join_all;
use std::fmt;
use std::future::Future;

pub use npm::NpmRegistry;
pub use version::caret_range;

/// Result of checking whether a package name is already published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAvailability {
    Available,
    Taken,
    /// The check itself failed; callers treat this as available
    Unknown(String),
}

/// Source of package versions, name availability and the engine range
pub trait PackageRegistry: Sync {
    /// Latest published version of `package`, without a range operator
    fn latest_version(&self, package: &str) -> impl Future<Output = Result<String>> + Send;

    fn name_availability(&self, name: &str) -> impl Future<Output = NameAvailability> + Send;

    /// `engines.node` range for currently supported Node.js lines
    fn node_engine(&self) -> impl Future<Output = Result<String>> + Send;
}

/// A lookup that failed and what was used instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupWarning {
    pub subject: String,
    pub message: String,
}

impl fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Looked-up versions plus every lookup that failed
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub dependencies: ResolvedDependencies,
    pub warnings: Vec<LookupWarning>,
}

/// Resolve every dev dependency of `config` and the engine range.
///
/// All lookups run concurrently and each settles on its own; one failure
/// never cancels the others.
pub async fn resolve<R: PackageRegistry>(registry: &R, config: &ProjectConfig) -> Resolution {
    let packages = required_dev_dependencies(config);
    tracing::debug!(count = packages.len(), "resolving dev dependency versions");

    let lookups = packages.iter().map(|&name| async move {
        let pinned = registry
            .latest_version(name)
            .await
            .and_then(|version| caret_range(&version));
        (name, pinned)
    });
    let (versions, engine) = tokio::join!(join_all(lookups), registry.node_engine());

    let mut resolution = Resolution::default();

    for (name, pinned) in versions {
        match pinned {
            Ok(range) => {
                resolution.dependencies.versions.insert(name.to_string(), range);
            }
            Err(e) => {
                tracing::warn!(package = name, error = %e, "version lookup failed");
                resolution.warnings.push(LookupWarning {
                    subject: name.to_string(),
                    message: format!("left out of devDependencies ({:#})", e),
                });
            }
        }
    }

    match engine {
        Ok(range) => resolution.dependencies.node_engine = Some(range),
        Err(e) => {
            tracing::warn!(error = %e, "engine range lookup failed");
            resolution.warnings.push(LookupWarning {
                subject: "engines.node".to_string(),
                message: format!("using {} ({:#})", DEFAULT_NODE_ENGINE, e),
            });
        }
    }

    resolution
}
