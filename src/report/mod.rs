//! Human-readable output of a search: the full log file, the console
//! summary, and the process exit status.

pub mod logfile;
pub mod summary;

#[allow(unused_imports)]
pub use logfile::{default_log_path, write_log, write_log_to};
pub use summary::render_summary;

use crate::search::SearchOutcome;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Final judgement of a search run, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every base was scanned and no triple has two distinct solutions
    Held,
    /// At least one triple has two or more distinct solutions
    CounterexampleFound,
    /// The scan stopped early without finding a counterexample
    Incomplete,
}

impl Verdict {
    pub fn of(outcome: &SearchOutcome) -> Self {
        if outcome.counterexample_found() {
            Verdict::CounterexampleFound
        } else if outcome.scan.completed {
            Verdict::Held
        } else {
            Verdict::Incomplete
        }
    }

    /// 0 when the conjecture held, 1 on a counterexample, 2 if the range was not fully checked.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Held => 0,
            Verdict::CounterexampleFound => 1,
            Verdict::Incomplete => 2,
        }
    }
}
