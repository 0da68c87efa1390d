//! Configuration file support
//!
//! Settings are read from (in priority order):
//! - command-line flags
//! - the file given with `--config`, or `./requp.toml` when present
//! - built-in defaults

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::registry::{OracleKind, OracleOptions};
use crate::update::UpdateFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const CONFIG_FILENAME: &str = "requp.toml";

/// Interpreter used for the pip oracle when nothing else is configured
pub const DEFAULT_PYTHON: &str = "python3";

/// Contents of `requp.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub oracle: Option<OracleKind>,
    pub python: Option<String>,
    pub index_url: Option<String>,
    pub pre: Option<bool>,
    pub write: Option<bool>,
    pub exclude: Vec<String>,
    pub only: Vec<String>,
}

impl FileConfig {
    /// Parse config text; `path` is only used for error messages
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Load the explicit config file, or `dir/requp.toml` when it exists
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Manifests in processing order
    pub files: Vec<PathBuf>,
    /// Oracle construction options
    pub oracle: OracleOptions,
    /// Persist rewritten manifests
    pub write: bool,
    /// Packages to skip
    pub exclude: Vec<String>,
    /// Packages to check exclusively
    pub only: Vec<String>,
    /// JSON output instead of text
    pub json: bool,
    /// No progress spinner
    pub quiet: bool,
    /// Debug logging
    pub verbose: bool,
    /// Colored text output
    pub color: bool,
}

impl Settings {
    /// Merge command-line arguments over file configuration
    pub fn resolve(args: &CliArgs, file: FileConfig) -> Self {
        let mut exclude = file.exclude;
        exclude.extend(args.exclude.iter().cloned());
        let mut only = file.only;
        only.extend(args.only.iter().cloned());

        Self {
            files: args.manifest_paths(),
            oracle: OracleOptions {
                kind: args.oracle.or(file.oracle).unwrap_or_default(),
                python: args
                    .python
                    .clone()
                    .or(file.python)
                    .unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
                index_url: args.index_url.clone().or(file.index_url),
                pre: args.pre || file.pre.unwrap_or(false),
            },
            write: args.write || file.write.unwrap_or(false),
            exclude,
            only,
            json: args.json,
            quiet: args.quiet || args.json,
            verbose: args.verbose,
            color: !args.no_color,
        }
    }

    /// Update filter derived from these settings
    pub fn update_filter(&self) -> UpdateFilter {
        UpdateFilter::new()
            .with_exclude(self.exclude.clone())
            .with_only(self.only.clone())
            .with_prereleases(self.oracle.pre)
    }
}
