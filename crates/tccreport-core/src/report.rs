//! Fixed-width and JSON rendering of permission records.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::classify::is_high_impact;
use crate::models::{AuthState, PermissionRecord};

const SERVICE_WIDTH: usize = 40;
const CLIENT_WIDTH: usize = 40;
const AUTH_WIDTH: usize = 12;
const PROMPTS_WIDTH: usize = 8;
const MODIFIED_WIDTH: usize = 19;

const HIGH_IMPACT_MARKER: &str = "* ";
const NO_MARKER: &str = "  ";

/// Records sorted by service. Equal services keep their input order.
pub fn sorted(records: &[PermissionRecord]) -> Vec<&PermissionRecord> {
    let mut sorted: Vec<&PermissionRecord> = records.iter().collect();
    // slice::sort_by is stable.
    sorted.sort_by(|a, b| a.service.cmp(&b.service));
    sorted
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Falls back to the raw number when chrono cannot place the instant.
pub fn format_timestamp(epoch_secs: i64) -> String {
    match Local.timestamp_opt(epoch_secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        chrono::LocalResult::Ambiguous(earliest, _) => {
            earliest.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        chrono::LocalResult::None => epoch_secs.to_string(),
    }
}

fn row_line(
    marker: &str,
    service: &str,
    client: &str,
    auth: &str,
    prompts: &str,
    modified: &str,
    sandbox: &str,
) -> String {
    let line = format!(
        "{marker}{service:<SERVICE_WIDTH$} {client:<CLIENT_WIDTH$} {auth:<AUTH_WIDTH$} \
         {prompts:<PROMPTS_WIDTH$} {modified:<MODIFIED_WIDTH$} {sandbox}"
    );
    // An empty sandbox would otherwise leave the padding of earlier columns.
    line.trim_end().to_string()
}

/// Render the fixed-width report: header, separator, one line per record.
pub fn render_table(records: &[PermissionRecord]) -> String {
    let header = row_line(
        NO_MARKER,
        "SERVICE",
        "CLIENT",
        "AUTH",
        "PROMPTS",
        "LAST MODIFIED",
        "SANDBOX",
    );
    let rule = "-".repeat(header.chars().count());

    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{rule}");

    for record in sorted(records) {
        let marker = if is_high_impact(record) {
            HIGH_IMPACT_MARKER
        } else {
            NO_MARKER
        };
        let line = row_line(
            marker,
            &record.service,
            &record.client,
            &record.auth_state.to_string(),
            &record.prompt_count.to_string(),
            &format_timestamp(record.last_modified),
            &record.sandbox_id,
        );
        let _ = writeln!(out, "{line}");
    }

    out
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    service: &'a str,
    client: &'a str,
    auth_state: AuthState,
    auth_code: i64,
    prompt_count: u32,
    last_modified: i64,
    sandbox_id: &'a str,
    high_impact: bool,
}

/// Render the records as a pretty-printed JSON array, in report order.
pub fn render_json(records: &[PermissionRecord]) -> serde_json::Result<String> {
    let rows: Vec<JsonRecord<'_>> = sorted(records)
        .into_iter()
        .map(|r| JsonRecord {
            service: &r.service,
            client: &r.client,
            auth_state: r.auth_state,
            auth_code: r.auth_state.code(),
            prompt_count: r.prompt_count,
            last_modified: r.last_modified,
            sandbox_id: &r.sandbox_id,
            high_impact: is_high_impact(r),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
