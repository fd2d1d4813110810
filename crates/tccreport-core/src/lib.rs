//! Extract, classify and report macOS TCC permission records.
//!
//! The pipeline is [`store::read_rows`] → [`classify::classify`] →
//! [`report::render_table`] (or [`report::render_json`]). [`generate_report`]
//! runs all three.

pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod report;
pub mod store;

use std::path::Path;

use serde::Deserialize;

pub use error::{ReportError, StoreError};
pub use models::{AuthState, PermissionRecord, RawRow};

/// How the report is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width text table.
    #[default]
    Table,
    /// Pretty-printed JSON array.
    Json,
}

/// Result of a successful store read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The store opened but holds no rows.
    NoRecords,
    Rendered(String),
}

/// Read and normalize every record in the store.
pub fn load_records(path: &Path) -> Result<Vec<PermissionRecord>, StoreError> {
    let rows = store::read_rows(path)?;
    Ok(rows.into_iter().map(classify::classify).collect())
}

/// Read the store at `path` and render it in `format`.
pub fn generate_report(path: &Path, format: OutputFormat) -> Result<ReportOutcome, ReportError> {
    let records = load_records(path)?;
    if records.is_empty() {
        log::info!("no permission records in {}", path.display());
        return Ok(ReportOutcome::NoRecords);
    }

    let high_impact = records.iter().filter(|r| classify::is_high_impact(r)).count();
    log::debug!("{} records, {high_impact} high-impact", records.len());

    let text = match format {
        OutputFormat::Table => report::render_table(&records),
        OutputFormat::Json => {
            let mut json = report::render_json(&records)?;
            json.push('\n');
            json
        }
    };
    Ok(ReportOutcome::Rendered(text))
}
