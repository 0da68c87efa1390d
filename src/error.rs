//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing a requirements file
//! - OracleError: Issues querying the package index for versions
//! - ConfigError: Issues with the configuration file

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version oracle related errors
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A requirement line carries a version that is not PEP 440
    #[error("invalid version '{version}' on line {line} of {path}: {message}")]
    InvalidVersion {
        path: PathBuf,
        /// 1-based line number
        line: usize,
        version: String,
        message: String,
    },
}

/// Errors related to looking up available versions
#[derive(Error, Debug)]
pub enum OracleError {
    /// The index query command could not be started
    #[error("failed to run `{command}` for '{package}': {source}")]
    Spawn {
        package: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The index query command exited unsuccessfully
    #[error("`{command}` failed for '{package}' ({status}): {stderr}")]
    CommandFailed {
        package: String,
        command: String,
        status: String,
        stderr: String,
    },

    /// The index query output did not have the expected shape
    #[error("unexpected output while looking up '{package}': {message}")]
    UnexpectedOutput { package: String, message: String },

    /// The index reported a version that does not parse
    #[error("index reported invalid version '{version}' for '{package}': {message}")]
    InvalidVersion {
        package: String,
        version: String,
        message: String,
    },

    /// Package not found in the index
    #[error("package '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from the index
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown values
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new InvalidVersion error from a 0-based line index
    pub fn invalid_version(
        path: impl Into<PathBuf>,
        line_index: usize,
        version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::InvalidVersion {
            path: path.into(),
            line: line_index + 1,
            version: version.into(),
            message: message.into(),
        }
    }
}

impl OracleError {
    /// Creates a new UnexpectedOutput error
    pub fn unexpected_output(package: impl Into<String>, message: impl Into<String>) -> Self {
        OracleError::UnexpectedOutput {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(
        package: impl Into<String>,
        version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        OracleError::InvalidVersion {
            package: package.into(),
            version: version.into(),
            message: message.into(),
        }
    }

    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        OracleError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        OracleError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        OracleError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
