//! Console summary printed at the end of a search.

use crate::report::Verdict;
use crate::search::{SearchConfig, SearchOutcome};
use std::fmt::Write;
use std::path::Path;

/// Near misses listed on the console when the conjecture held.
const NEAR_MISS_PREVIEW: usize = 10;

/// Format `n` with `,` between groups of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render the end-of-run summary.
pub fn render_summary(
    config: &SearchConfig,
    outcome: &SearchOutcome,
    log_path: Option<&Path>,
) -> String {
    let mut s = String::new();
    let stats = &outcome.scan.statistics;
    let analysis = &outcome.analysis;

    // Writing to a String cannot fail
    let _ = writeln!(s, "── SUMMARY ─────────────────────────────────────────");
    let _ = writeln!(s, "range A,B,C : {} … {}", config.min_base, config.max_base);
    let _ = writeln!(s, "range x,y   : 2 … {}", config.max_exponent);
    match config.fixed_z {
        Some(z) => {
            let _ = writeln!(s, "fixed z     : {}", z);
        }
        None => {
            let _ = writeln!(s, "range z     : 2 … {}", config.effective_z_limit());
        }
    }
    if let Some(window) = &config.ratio_window {
        let _ = writeln!(s, "log-window  : {}", window);
    }
    let _ = writeln!(
        s,
        "checked (ordered) combos : {}",
        group_thousands(stats.nominal_combinations)
    );
    let _ = writeln!(
        s,
        "evaluated combos         : {}",
        group_thousands(stats.combinations_evaluated)
    );
    let _ = writeln!(
        s,
        "unique {{A,B,C}} triples  : {}",
        group_thousands(analysis.all.len() as u64)
    );
    let _ = writeln!(
        s,
        "triples with >1 solution : {}",
        group_thousands(analysis.multi.len() as u64)
    );
    if let Some(path) = log_path {
        let _ = writeln!(s, "log written to           : {}", path.display());
    }

    let _ = writeln!(s);
    match Verdict::of(outcome) {
        Verdict::CounterexampleFound => {
            let _ = writeln!(s, "‼ counter-example(s) found!");
            for (triple, keys) in &analysis.multi {
                let _ = writeln!(s, "  {}", triple);
                for key in keys {
                    let _ = writeln!(s, "    {}", key);
                }
            }
        }
        Verdict::Held | Verdict::Incomplete => {
            if outcome.scan.completed {
                let _ = writeln!(s, "✅ Kraiz conjecture holds in searched range.");
            } else {
                let _ = writeln!(
                    s,
                    "⚠ scan stopped after {} of {} bases; no counter-example in the scanned part.",
                    stats.bases_completed, stats.admissible_bases
                );
            }
            if !outcome.scan.near_misses.is_empty() {
                let _ = writeln!(s, "near-miss (first {}):", NEAR_MISS_PREVIEW);
                for near in outcome.scan.near_misses.iter().take(NEAR_MISS_PREVIEW) {
                    let _ = writeln!(s, "  {}", near);
                }
            }
        }
    }

    s
}
