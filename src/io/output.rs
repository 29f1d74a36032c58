use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{stdout, Write};
use std::path::PathBuf;

/// Where JSON output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Resolve the `--out [FILE]` flag.
///
/// * flag absent or `.` -> stdout
/// * bare flag -> the default file name
/// * anything else -> that path
pub fn resolve_target(
    out: Option<Option<String>>,
    default_name: impl FnOnce() -> String,
) -> OutputTarget {
    match out {
        None => OutputTarget::Stdout,
        Some(None) => OutputTarget::File(PathBuf::from(default_name())),
        Some(Some(path)) => {
            let path = path.trim();
            if path.is_empty() {
                OutputTarget::File(PathBuf::from(default_name()))
            } else if path == "." {
                OutputTarget::Stdout
            } else {
                OutputTarget::File(PathBuf::from(path))
            }
        }
    }
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Emit `value` as JSON to the target. Returns the file path when one was
/// written.
pub fn emit_json<T: Serialize>(value: &T, target: &OutputTarget) -> Result<Option<PathBuf>> {
    match target {
        OutputTarget::Stdout => {
            write_json(value, stdout().lock())?;
            Ok(None)
        }
        OutputTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(value, file)?;
            Ok(Some(path.clone()))
        }
    }
}

/// File-name safe timestamp, e.g. "2024-05-01T10-20-30.123Z".
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
}

pub fn default_account_filename(account: &str, now: DateTime<Utc>) -> String {
    format!(
        "account_{}...{}_{}.json",
        head(account, 4),
        tail(account, 4),
        file_timestamp(now)
    )
}

pub fn default_transaction_filename(hash: &str, now: DateTime<Utc>) -> String {
    format!("transaction_{}_{}.json", head(hash, 6), file_timestamp(now))
}

pub fn default_trustlines_filename(account: &str, now: DateTime<Utc>) -> String {
    format!("trustlines_{}_{}.json", head(account, 4), file_timestamp(now))
}

pub fn default_public_key_filename(public_key: &str, now: DateTime<Utc>) -> String {
    format!("public_key_{}_{}.json", head(public_key, 4), file_timestamp(now))
}

fn head(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(i, _)| &s[..i])
}

fn tail(s: &str, n: usize) -> &str {
    let len = s.chars().count();
    if len <= n {
        return s;
    }
    s.char_indices().nth(len - n).map_or(s, |(i, _)| &s[i..])
}
