//! HTTP client for the npm registry and the Node.js release index

use super::node::{engine_range, ReleaseEntry, NODE_INDEX_URL};
use super::{NameAvailability, PackageRegistry};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const REGISTRY_URL_ENV: &str = "PKGSMITH_REGISTRY_URL";
pub const NODE_INDEX_URL_ENV: &str = "PKGSMITH_NODE_INDEX_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `GET /<name>/latest` response; only the version is needed
#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

fn url_from_env(var: &str, default: &str) -> Result<Url> {
    let url_str = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&url_str).with_context(|| format!("Invalid URL in {}: {}", var, url_str))
}

/// Registry client - handles version and availability lookups over HTTP
pub struct NpmRegistry {
    base: Url,
    node_index: Url,
    client: reqwest::Client,
}

impl NpmRegistry {
    /// Create a new client with a custom user agent
    pub fn new(base: Url, node_index: Url, user_agent: &str) -> Self {
        Self {
            base,
            node_index,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from `PKGSMITH_REGISTRY_URL` and
    /// `PKGSMITH_NODE_INDEX_URL`, falling back to the public endpoints
    pub fn from_env(user_agent: &str) -> Result<Self> {
        let base = url_from_env(REGISTRY_URL_ENV, DEFAULT_REGISTRY_URL)?;
        let node_index = url_from_env(NODE_INDEX_URL_ENV, NODE_INDEX_URL)?;
        Ok(Self::new(base, node_index, user_agent))
    }

    /// Build a package URL, preserving query parameters. Scoped names keep
    /// their `@scope/name` shape as two path segments.
    fn build_url(base: &Url, package: &str, suffix: Option<&str>) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?;
            segments.pop_if_empty();
            segments.extend(package.split('/'));
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }
}

impl PackageRegistry for NpmRegistry {
    async fn latest_version(&self, package: &str) -> Result<String> {
        let url = Self::build_url(&self.base, package, Some("latest"))?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {} from {}: HTTP {}", package, url, response.status());
        }

        let latest: LatestManifest = response
            .json()
            .await
            .with_context(|| format!("Failed to parse registry response for {}", package))?;
        Ok(latest.version)
    }

    async fn name_availability(&self, name: &str) -> NameAvailability {
        let url = match Self::build_url(&self.base, name, None) {
            Ok(url) => url,
            Err(e) => return NameAvailability::Unknown(e.to_string()),
        };

        match self.client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                NameAvailability::Available
            }
            Ok(response) if response.status().is_success() => NameAvailability::Taken,
            Ok(response) => NameAvailability::Unknown(format!("HTTP {}", response.status())),
            Err(e) => NameAvailability::Unknown(e.to_string()),
        }
    }

    async fn node_engine(&self) -> Result<String> {
        let response = self
            .client
            .get(self.node_index.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.node_index))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch release index from {}: HTTP {}",
                self.node_index,
                response.status()
            );
        }

        let entries: Vec<ReleaseEntry> = response
            .json()
            .await
            .context("Failed to parse release index")?;
        engine_range(&entries).ok_or_else(|| anyhow::anyhow!("Release index lists no LTS lines"))
    }
}
