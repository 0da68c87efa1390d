//! requp - find newer releases for packages pinned in requirements files
//!
//! For each requirements file, prints the outdated requirements followed by
//! the file with the new versions substituted, and optionally writes it back.

use anyhow::Context;
use clap::Parser;
use requp::cli::CliArgs;
use requp::config::{FileConfig, Settings};
use requp::domain::RunSummary;
use requp::orchestrator::Orchestrator;
use requp::output::{create_formatter, OutputConfig};
use requp::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "requp=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let file_config = FileConfig::discover(args.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(&args, file_config);

    if !settings.color {
        colored::control::set_override(false);
    }

    tracing::debug!(
        oracle = %settings.oracle.kind,
        write = settings.write,
        files = settings.files.len(),
        "starting"
    );

    let mut orchestrator = Orchestrator::new(&settings)?;
    let formatter = create_formatter(OutputConfig::from_flags(
        settings.json,
        settings.verbose,
        settings.quiet,
        settings.color,
    ));
    let mut progress = Progress::new(!settings.quiet);
    let mut summary = RunSummary::new(settings.write);

    for path in &settings.files {
        let report = orchestrator.run_file(path, &mut progress).await;
        progress.finish_and_clear();
        let report = report?;

        let mut stdout = io::stdout().lock();
        formatter.format_manifest(&report, &mut stdout)?;
        stdout.flush()?;

        summary.add_manifest(report);
    }

    let mut stdout = io::stdout().lock();
    formatter.finish(&summary, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
