//! CLI argument parsing module for requp

use crate::manifest::DEFAULT_MANIFEST;
use crate::registry::OracleKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Find newer releases for packages pinned in requirements files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "requp",
    version,
    about = "Find newer releases for packages pinned in requirements files"
)]
pub struct CliArgs {
    /// Requirements files to check (default: requirements.txt)
    pub files: Vec<PathBuf>,

    /// Write the rewritten requirements back to each file
    #[arg(short, long)]
    pub write: bool,

    // Version source
    /// Where to look up available versions
    #[arg(long, value_enum)]
    pub oracle: Option<OracleKind>,

    /// Python interpreter used to run pip (pip oracle)
    #[arg(long)]
    pub python: Option<String>,

    /// Alternate package index (simple index for pip, JSON API root for pypi)
    #[arg(long)]
    pub index_url: Option<String>,

    /// Consider pre-release and development versions
    #[arg(long)]
    pub pre: bool,

    // Package filters
    /// Check only these packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Skip these packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Configuration file (default: ./requp.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - no progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Manifest files to process, in order
    pub fn manifest_paths(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from(DEFAULT_MANIFEST)]
        } else {
            self.files.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["requp"]);
        assert_eq!(
            args.manifest_paths(),
            vec![PathBuf::from("requirements.txt")]
        );
        assert!(!args.write);
        assert!(args.oracle.is_none());
        assert!(args.python.is_none());
        assert!(args.index_url.is_none());
        assert!(!args.pre);
        assert!(args.only.is_empty());
        assert!(args.exclude.is_empty());
        assert!(!args.json);
        assert!(!args.quiet);
        assert!(!args.verbose);
        assert!(!args.no_color);
    }

    #[test]
    fn test_multiple_files_keep_order() {
        let args = CliArgs::parse_from(["requp", "dev.txt", "requirements.txt"]);
        assert_eq!(
            args.manifest_paths(),
            vec![PathBuf::from("dev.txt"), PathBuf::from("requirements.txt")]
        );
    }

    #[test]
    fn test_write_flags() {
        assert!(CliArgs::parse_from(["requp", "-w"]).write);
        assert!(CliArgs::parse_from(["requp", "--write"]).write);
    }

    #[test]
    fn test_oracle_values() {
        let args = CliArgs::parse_from(["requp", "--oracle", "pypi"]);
        assert_eq!(args.oracle, Some(OracleKind::Pypi));

        let args = CliArgs::parse_from(["requp", "--oracle", "pip"]);
        assert_eq!(args.oracle, Some(OracleKind::Pip));

        assert!(CliArgs::try_parse_from(["requp", "--oracle", "npm"]).is_err());
    }

    #[test]
    fn test_filters_multiple() {
        let args = CliArgs::parse_from([
            "requp",
            "--exclude",
            "django",
            "--exclude",
            "flask",
            "--only",
            "requests",
        ]);
        assert_eq!(args.exclude, vec!["django", "flask"]);
        assert_eq!(args.only, vec!["requests"]);
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "requp",
            "reqs/base.txt",
            "--python",
            "/usr/bin/python3.12",
            "--index-url",
            "https://example.org/simple",
            "--pre",
            "--json",
            "-q",
            "--no-color",
        ]);
        assert_eq!(args.files, vec![PathBuf::from("reqs/base.txt")]);
        assert_eq!(args.python.as_deref(), Some("/usr/bin/python3.12"));
        assert_eq!(
            args.index_url.as_deref(),
            Some("https://example.org/simple")
        );
        assert!(args.pre);
        assert!(args.json);
        assert!(args.quiet);
        assert!(args.no_color);
    }
}
