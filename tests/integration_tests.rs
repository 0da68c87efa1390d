//! Integration tests for requp
//!
//! These tests verify:
//! - The whole pipeline against a fake version oracle
//! - Rewrites preserve everything but the version text
//! - Settings resolution from config files and flags

use async_trait::async_trait;
use requp::domain::{SkipReason, UpdateResult, Version};
use requp::error::OracleError;
use requp::orchestrator::Orchestrator;
use requp::progress::NoProgress;
use requp::registry::VersionOracle;
use requp::update::UpdateFilter;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Oracle answering from a fixed table and recording every query
struct TableOracle {
    table: HashMap<&'static str, Vec<&'static str>>,
    queries: Mutex<Vec<String>>,
}

impl TableOracle {
    fn new(entries: &[(&'static str, &[&'static str])]) -> Self {
        Self {
            table: entries.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VersionOracle for TableOracle {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn lookup_versions(&self, package: &str) -> Result<Vec<Version>, OracleError> {
        self.queries.lock().unwrap().push(package.to_string());
        let list = self
            .table
            .get(package.to_lowercase().as_str())
            .ok_or_else(|| OracleError::package_not_found(package, "table"))?;
        let mut versions: Vec<Version> = list.iter().map(|v| v.parse().unwrap()).collect();
        versions.sort();
        Ok(versions)
    }
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn table() -> TableOracle {
    TableOracle::new(&[
        ("requests", &["2.0.0", "2.5.0", "3.0.0a1"]),
        ("flask", &["1.1.4", "2.3.3", "3.0.0"]),
        ("django", &["4.2", "5.0"]),
        ("web3", &["3", "6.15.1"]),
        ("numpy", &["1.26.4", "2.0.0rc1"]),
    ])
}

mod pipeline {
    use super::*;

    #[tokio::test]
    async fn test_realistic_manifest_preview() {
        let dir = TempDir::new().unwrap();
        let content = "\
# Web stack
requests>=2.0.0  # http client
Flask == 2.3.3
django<5.0
-r dev.txt
web3==3
numpy~=1.26.4 \\
    # trailing continuation
git+https://github.com/psf/black
";
        let path = write_manifest(&dir, "requirements.txt", content);
        let mut orch = Orchestrator::with_oracle(Box::new(table()), UpdateFilter::new(), false);

        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();

        let updated: Vec<(String, String)> = report
            .updates()
            .map(|r| {
                (
                    r.requirement().name.clone(),
                    r.new_version().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            updated,
            vec![
                ("requests".to_string(), "2.5.0".to_string()),
                ("Flask".to_string(), "3.0.0".to_string()),
                ("web3".to_string(), "6.15.1".to_string()),
            ]
        );

        let rewrite = report.rewrite.as_ref().unwrap();
        assert_eq!(rewrite.failed, 0);
        assert_eq!(
            rewrite.contents(),
            "\
# Web stack
requests>=2.5.0  # http client
Flask == 3.0.0
django<5.0
-r dev.txt
web3==6.15.1
numpy~=1.26.4 \\
    # trailing continuation
git+https://github.com/psf/black
"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[tokio::test]
    async fn test_write_then_rerun_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let content = "requests>=2.0.0\r\nflask==1.1.4\r\n";
        let path = write_manifest(&dir, "requirements.txt", content);

        let mut orch = Orchestrator::with_oracle(Box::new(table()), UpdateFilter::new(), true);
        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();
        assert!(report.written());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "requests>=2.5.0\r\nflask==3.0.0\r\n"
        );

        let mut orch = Orchestrator::with_oracle(Box::new(table()), UpdateFilter::new(), true);
        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();
        assert!(!report.has_updates());
        assert_eq!(report.skips().count(), 2);
        for result in report.skips() {
            let UpdateResult::Skip { reason, .. } = result else {
                panic!("expected a skip, got {result:?}");
            };
            assert_eq!(*reason, SkipReason::AlreadyLatest);
        }
    }

    #[tokio::test]
    async fn test_prereleases_follow_filter() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requirements.txt", "numpy>=1.26.4\n");

        let mut orch = Orchestrator::with_oracle(Box::new(table()), UpdateFilter::new(), false);
        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();
        assert!(!report.has_updates());

        let filter = UpdateFilter::new().with_prereleases(true);
        let mut orch = Orchestrator::with_oracle(Box::new(table()), filter, false);
        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();
        assert_eq!(
            report.results[0].new_version().map(|v| v.to_string()),
            Some("2.0.0rc1".to_string())
        );
    }

    #[tokio::test]
    async fn test_only_filter_limits_queries() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "requirements.txt",
            "requests>=2.0.0\nflask==1.1.4\ndjango>=4.2\n",
        );
        let oracle = table();
        let filter = UpdateFilter::new().with_only(vec!["Flask".to_string()]);
        let mut orch = Orchestrator::with_oracle(Box::new(oracle), filter, false);

        let report = orch.run_file(&path, &mut NoProgress).await.unwrap();

        assert_eq!(report.update_count(), 1);
        assert_eq!(orch.lookups(), 1);
        assert_eq!(
            report.rewrite.unwrap().contents(),
            "requests>=2.0.0\nflask==3.0.0\ndjango>=4.2\n"
        );
    }

    #[tokio::test]
    async fn test_invalid_pinned_version_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requirements.txt", "requests>=2.0\nflask==latest\n");
        let mut orch = Orchestrator::with_oracle(Box::new(table()), UpdateFilter::new(), false);

        let err = orch.run_file(&path, &mut NoProgress).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'latest'"));
        assert!(msg.contains("line 2"));
    }

    #[tokio::test]
    async fn test_run_stops_at_first_failing_file() {
        let dir = TempDir::new().unwrap();
        let good = write_manifest(&dir, "a.txt", "requests>=2.0.0\n");
        let bad = write_manifest(&dir, "b.txt", "left-pad>=1.0\n");
        let never = write_manifest(&dir, "c.txt", "django>=4.2\n");
        let oracle = TableOracle::new(&[("requests", &["2.0.0"]), ("django", &["5.0"])]);
        let mut orch = Orchestrator::with_oracle(Box::new(oracle), UpdateFilter::new(), false);

        let err = orch
            .run(&[good, bad, never], &mut NoProgress)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("left-pad"));
        assert_eq!(orch.lookups(), 1);
    }
}

mod settings {
    use super::*;
    use clap::Parser;
    use requp::cli::CliArgs;
    use requp::config::{FileConfig, Settings};
    use requp::registry::OracleKind;

    #[test]
    fn test_config_file_in_directory_is_merged() {
        let dir = TempDir::new().unwrap();
        let contents = "\
oracle = \"pypi\"
index_url = \"https://pypi.example.org/pypi\"
exclude = [\"Django\"]
";
        write_manifest(&dir, "requp.toml", contents);

        let args = CliArgs::parse_from(["requp", "--exclude", "flask", "-w"]);
        let config = FileConfig::discover(args.config.as_deref(), dir.path()).unwrap();
        let settings = Settings::resolve(&args, config);

        assert_eq!(settings.oracle.kind, OracleKind::Pypi);
        assert_eq!(
            settings.oracle.index_url.as_deref(),
            Some("https://pypi.example.org/pypi")
        );
        assert!(settings.write);

        let filter = settings.update_filter();
        assert!(!filter.should_process_package("django"));
        assert!(!filter.should_process_package("Flask"));
        assert!(filter.should_process_package("requests"));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "custom.toml", "pre = \"yes\"\n");
        assert!(FileConfig::discover(Some(&path), dir.path()).is_err());
    }
}
