use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn kraiz(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kraiz"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute kraiz")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_search_small_range_holds() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["search", "--min-base", "2", "--max-base", "50", "--max-exp", "3", "--no-log"],
    );

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = stdout_of(&output);
    assert!(stdout.contains("range A,B,C : 2 … 50"));
    assert!(stdout.contains("unique {A,B,C} triples  : 21"));
    assert!(stdout.contains("triples with >1 solution : 0"));
    assert!(stdout.contains("Kraiz conjecture holds in searched range."));

    // --no-log leaves the working directory untouched
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_search_writes_log_with_near_misses() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.txt");
    let output = kraiz(
        dir.path(),
        &[
            "search",
            "-m",
            "2",
            "-B",
            "10",
            "-E",
            "4",
            "-d",
            "1",
            "--jobs",
            "1",
            "--output",
            log.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("log written to"));
    assert!(stdout.contains("near-miss (first 10):"));
    assert!(stdout.contains("  2^3 + 3^3 = 6^2 -1"));

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.starts_with("# Kraiz checker full log\n"));
    assert!(text.contains("\"delta\": 1"));
    assert!(text.contains("== Exact solutions ==\n[2, 3, 5]\n  2^4 + 3^2 = 5^2\n"));
    assert!(text.contains("== Near-miss (|Δ|≤δ) ==\n2^3 + 3^3 = 6^2 -1\n3^3 + 2^3 = 6^2 -1\n"));
}

#[test]
fn test_search_default_log_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(dir.path(), &["search", "-m", "2", "-B", "12", "-E", "3"]);

    assert_eq!(output.status.code(), Some(0));
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("kraiz_log_"));
    assert!(names[0].ends_with(".txt"));
}

#[test]
fn test_search_parallel_output_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let base = ["search", "-m", "2", "-B", "40", "-E", "4", "-d", "2", "--no-log"];

    let sequential = kraiz(dir.path(), &[&base[..], &["-j", "1"]].concat());
    let parallel = kraiz(dir.path(), &[&base[..], &["-j", "4"]].concat());

    assert_eq!(sequential.status.code(), Some(0));
    assert_eq!(parallel.status.code(), Some(0));
    assert_eq!(stdout_of(&sequential), stdout_of(&parallel));
}

#[test]
fn test_search_fixed_z() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("squares.txt");
    let output = kraiz(
        dir.path(),
        &[
            "search",
            "-m",
            "2",
            "-B",
            "30",
            "-E",
            "4",
            "--filter-z",
            "2",
            "--output",
            log.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("fixed z     : 2"));
    let text = fs::read_to_string(&log).unwrap();
    for line in text.lines().filter(|line| line.starts_with("  ") && line.contains(" = ")) {
        assert!(line.ends_with("^2"), "unexpected solution: {}", line);
    }
}

#[test]
fn test_search_ratio_window() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &[
            "search",
            "-m",
            "2",
            "-B",
            "30",
            "-E",
            "3",
            "--ratio-window",
            "0.5",
            "2.0",
            "--no-log",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("log-window  : 0.5 … 2"));
}

#[test]
fn test_search_invalid_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["search", "--min-base", "1", "--max-base", "10", "--max-exp", "3", "--no-log"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("min_base must be at least 2"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_search_inverted_ratio_window_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["search", "-m", "2", "-B", "10", "-E", "3", "--ratio-window", "2", "0.5", "--no-log"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("inverted"));
}

#[test]
fn test_search_negative_delta_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["search", "-m", "2", "-B", "10", "-E", "3", "--delta=-1", "--no-log"],
    );

    assert!(!output.status.success());
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_search_requires_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(dir.path(), &["search", "--max-exp", "3"]);
    assert!(!output.status.success());
}

#[test]
fn test_degenerate_range_holds_trivially() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["search", "-m", "40", "-B", "10", "-E", "3", "--no-log"],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("unique {A,B,C} triples  : 0"));
    assert!(stdout.contains("Kraiz conjecture holds"));
}

#[test]
fn test_bases_lists_admissible_values() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(
        dir.path(),
        &["bases", "--min-base", "2", "--max-base", "20", "--show-excluded"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("15 admissible bases in 2 … 20"));
    assert!(stdout.contains("2 3 5 6 7 10 11 12 13 14 15 17 18 19 20\n"));
    assert!(stdout.contains("  4 = 2^2\n"));
    assert!(stdout.contains("  8 = 2^3\n"));
    assert!(stdout.contains("  16 = 4^2\n"));
}

#[test]
fn test_classify() {
    let dir = tempfile::tempdir().unwrap();
    let output = kraiz(dir.path(), &["classify", "12", "27", "1024", "1"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("12: not a perfect power\n"));
    assert!(stdout.contains("27: perfect power (3^3)\n"));
    assert!(stdout.contains("1024: perfect power (32^2)\n"));
    assert!(stdout.contains("1: not a perfect power\n"));
}
