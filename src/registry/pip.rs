//! `pip index versions` oracle
//!
//! Runs `<python> -m pip index versions <package>` and reads the
//! `Available versions: a, b, c` line from its output.

use crate::domain::Version;
use crate::error::OracleError;
use crate::registry::VersionOracle;
use async_trait::async_trait;
use std::str::FromStr;
use tokio::process::Command;
use tracing::debug;

/// Marker preceding the comma-separated version list
const AVAILABLE_MARKER: &str = "Available versions:";

/// Oracle backed by a pip subprocess
#[derive(Debug, Clone)]
pub struct PipIndexOracle {
    /// Interpreter that has pip installed
    python: String,
    /// Passed as `--index-url`
    index_url: Option<String>,
    /// Passed as `--pre`
    pre: bool,
}

impl PipIndexOracle {
    /// Create an oracle running pip through `python`
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            index_url: None,
            pre: false,
        }
    }

    /// Query an alternate index
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = Some(url.into());
        self
    }

    /// Include pre-releases in the listing
    pub fn with_pre(mut self, pre: bool) -> Self {
        self.pre = pre;
        self
    }

    /// Arguments passed to the interpreter
    fn args(&self, package: &str) -> Vec<String> {
        let mut args: Vec<String> = ["-m", "pip", "index", "versions", package]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if self.pre {
            args.push("--pre".to_string());
        }
        if let Some(url) = &self.index_url {
            args.push("--index-url".to_string());
            args.push(url.clone());
        }
        args
    }

    /// Command line for messages
    fn command_line(&self, package: &str) -> String {
        let mut parts = vec![self.python.clone()];
        parts.extend(self.args(package));
        parts.join(" ")
    }
}

#[async_trait]
impl VersionOracle for PipIndexOracle {
    fn name(&self) -> &'static str {
        "pip"
    }

    async fn lookup_versions(&self, package: &str) -> Result<Vec<Version>, OracleError> {
        let command = self.command_line(package);
        debug!(%command, "running index query");

        let output = Command::new(&self.python)
            .args(self.args(package))
            .env("PIP_DISABLE_PIP_VERSION_CHECK", "1")
            .output()
            .await
            .map_err(|source| OracleError::Spawn {
                package: package.to_string(),
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OracleError::CommandFailed {
                package: package.to_string(),
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_pip_output(package, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract and sort the versions listed by `pip index versions`
pub fn parse_pip_output(package: &str, stdout: &str) -> Result<Vec<Version>, OracleError> {
    let Some((_, rest)) = stdout.split_once(AVAILABLE_MARKER) else {
        return Err(OracleError::unexpected_output(
            package,
            format!("no '{}' line", AVAILABLE_MARKER),
        ));
    };

    let list = rest.lines().next().unwrap_or_default().trim();
    if list.is_empty() {
        return Err(OracleError::unexpected_output(
            package,
            "empty version list",
        ));
    }

    let mut versions = list
        .split(',')
        .map(str::trim)
        .map(|v| {
            Version::from_str(v)
                .map_err(|e| OracleError::invalid_version(package, v, e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    versions.sort();
    Ok(versions)
}
