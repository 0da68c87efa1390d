//! PyPI JSON API oracle
//!
//! Fetches the release list from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::domain::Version;
use crate::error::OracleError;
use crate::registry::{HttpClient, VersionOracle};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI oracle
pub struct PypiJsonOracle {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
pub struct PyPIResponse {
    /// Release files keyed by version
    releases: HashMap<String, Vec<ReleaseFile>>,
}

/// Release file information
#[derive(Debug, Deserialize)]
struct ReleaseFile {
    /// Whether the file was yanked
    #[serde(default)]
    yanked: bool,
}

impl PyPIResponse {
    /// Installable versions, sorted ascending
    ///
    /// Releases without files or with every file yanked are dropped, as are
    /// legacy version strings that are not PEP 440.
    pub fn versions(&self, package: &str) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .releases
            .iter()
            .filter(|(_, files)| files.iter().any(|f| !f.yanked))
            .filter_map(|(raw, _)| match Version::from_str(raw) {
                Ok(version) => Some(version),
                Err(e) => {
                    warn!(package, version = %raw, "ignoring non-PEP 440 release: {}", e);
                    None
                }
            })
            .collect();
        versions.sort();
        versions
    }
}

impl PypiJsonOracle {
    /// Create a new PyPI oracle
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: PYPI_API_URL.to_string(),
        }
    }

    /// Use another JSON API root (a mirror)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl VersionOracle for PypiJsonOracle {
    fn name(&self) -> &'static str {
        "PyPI"
    }

    async fn lookup_versions(&self, package: &str) -> Result<Vec<Version>, OracleError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self.client.get_json(&url, package, self.name()).await?;
        Ok(response.versions(package))
    }
}
