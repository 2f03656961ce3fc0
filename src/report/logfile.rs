//! Full search log written after every run.

use crate::report::ReportError;
use crate::search::{SearchConfig, SearchOutcome};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// `kraiz_log_YYYYmmdd_HHMMSS.txt` in the current directory.
pub fn default_log_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("kraiz_log_{}.txt", now.format("%Y%m%d_%H%M%S")))
}

/// Write the log for `outcome` to `path`, replacing any existing file.
pub fn write_log(
    path: &Path,
    config: &SearchConfig,
    outcome: &SearchOutcome,
    generated: DateTime<Local>,
) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_log_to(&mut writer, config, outcome, generated)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}

/// Write the log body to any writer.
///
/// Layout: header, JSON configuration, exact solutions grouped by triple,
/// then near misses if there are any.
pub fn write_log_to<W: Write>(
    out: &mut W,
    config: &SearchConfig,
    outcome: &SearchOutcome,
    generated: DateTime<Local>,
) -> Result<(), ReportError> {
    writeln!(out, "# Kraiz checker full log")?;
    writeln!(out, "Generated: {}", generated.format("%Y-%m-%d %H:%M:%S%.6f"))?;
    let json = serde_json::to_string_pretty(config)?;
    for line in json.lines() {
        writeln!(out, "  {}", line)?;
    }
    if !outcome.scan.completed {
        writeln!(
            out,
            "  (scan stopped after {} of {} bases)",
            outcome.scan.statistics.bases_completed, outcome.scan.statistics.admissible_bases
        )?;
    }

    writeln!(out)?;
    writeln!(out, "== Exact solutions ==")?;
    for (triple, keys) in &outcome.analysis.all {
        writeln!(out, "{}", triple)?;
        for key in keys {
            writeln!(out, "  {}", key)?;
        }
    }

    if !outcome.scan.near_misses.is_empty() {
        writeln!(out)?;
        writeln!(out, "== Near-miss (|Δ|≤δ) ==")?;
        for near in &outcome.scan.near_misses {
            writeln!(out, "{}", near)?;
        }
    }

    Ok(())
}
