//! Version oracles: where the list of published versions comes from
//!
//! This module provides:
//! - The `VersionOracle` capability trait
//! - `pip index versions` subprocess oracle
//! - PyPI JSON API oracle on a shared retrying HTTP client
//! - A per-run cache guaranteeing one lookup per package

mod cache;
mod client;
mod pip;
mod pypi;

pub use cache::VersionCache;
pub use client::HttpClient;
pub use pip::{parse_pip_output, PipIndexOracle};
pub use pypi::{PyPIResponse, PypiJsonOracle};

use crate::domain::Version;
use crate::error::OracleError;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Source of published versions for a package
#[async_trait]
pub trait VersionOracle: Send + Sync {
    /// Short name used in messages
    fn name(&self) -> &'static str;

    /// All known versions of `package`, sorted ascending by PEP 440 precedence
    async fn lookup_versions(&self, package: &str) -> Result<Vec<Version>, OracleError>;
}

/// Which oracle implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// `python -m pip index versions <name>`
    #[default]
    Pip,
    /// PyPI JSON API over HTTPS
    Pypi,
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Pip => write!(f, "pip"),
            OracleKind::Pypi => write!(f, "pypi"),
        }
    }
}

/// Options needed to build an oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleOptions {
    /// Implementation to use
    pub kind: OracleKind,
    /// Interpreter running pip
    pub python: String,
    /// Alternate index location
    pub index_url: Option<String>,
    /// Ask the index for pre-releases too
    pub pre: bool,
}

/// Create the configured oracle
pub fn create_oracle(options: &OracleOptions) -> Result<Box<dyn VersionOracle>, OracleError> {
    match options.kind {
        OracleKind::Pip => {
            let mut oracle = PipIndexOracle::new(&options.python).with_pre(options.pre);
            if let Some(url) = &options.index_url {
                oracle = oracle.with_index_url(url);
            }
            Ok(Box::new(oracle))
        }
        OracleKind::Pypi => {
            let mut oracle = PypiJsonOracle::new(HttpClient::new()?);
            if let Some(url) = &options.index_url {
                oracle = oracle.with_base_url(url);
            }
            Ok(Box::new(oracle))
        }
    }
}
