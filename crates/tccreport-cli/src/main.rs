use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tccreport_core::config::{self, AppConfig};
use tccreport_core::{OutputFormat, ReportOutcome};

mod output;

#[derive(Parser, Debug)]
#[command(
    name = "tccreport",
    about = "List TCC permission grants, denials and prompts for security triage"
)]
#[command(version)]
struct Cli {
    /// Permission store to read (default: the current user's TCC.db)
    db_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (default: ~/.config/tccreport/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_error_exit_code(&e));
        }
    };

    match run(cli) {
        Ok((path, ReportOutcome::NoRecords)) => {
            output::print_no_records(&path);
            ExitCode::SUCCESS
        }
        Ok((_, ReportOutcome::Rendered(report))) => {
            output::print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` succeed; every other parse error exits 1.
fn parse_error_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn run(cli: Cli) -> Result<(PathBuf, ReportOutcome)> {
    let app_config: AppConfig = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    let path = config::resolve_store_path(cli.db_path, &app_config);
    let format = cli.format.or(app_config.format).unwrap_or_default();
    log::info!("Using permission store: {}", path.display());

    check_store_readable(&path)?;

    let outcome = tccreport_core::generate_report(&path, format)?;
    Ok((path, outcome))
}

/// Fail early with a readable message when the store is missing or unreadable.
fn check_store_readable(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("permission store not found at {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!(
            "permission store at {} is not a regular file",
            path.display()
        ));
    }
    std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot read permission store at {}: {e}", path.display()))?;
    Ok(())
}
