use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod arith;
mod report;
mod search;

use arith::{admissible_bases, perfect_power_decomposition};
use report::{Verdict, default_log_path, render_summary, write_log};
use search::{
    ConsoleProgress, NoProgress, ParallelConfig, ProgressSink, RatioWindow, ScanDriver,
    SearchConfig, SequentialScan, run_search,
};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "kraiz")]
#[command(about = "kraiz - counterexample search for A^x + B^y = C^z")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Enable progress display and debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a bounded range for triples with more than one distinct solution
    Search {
        /// Smallest base A, B, C
        #[arg(long, short = 'm', default_value = "12")]
        min_base: u64,
        /// Largest base A, B, C
        #[arg(long, short = 'B')]
        max_base: u64,
        /// Largest summand exponent x, y
        #[arg(long, short = 'E')]
        max_exp: u32,
        /// Largest result exponent z (defaults to --max-exp)
        #[arg(long)]
        z_max: Option<u32>,
        /// Only report solutions with exactly this z
        #[arg(long)]
        filter_z: Option<u32>,
        /// Also report sums within this distance of a power
        #[arg(long, short = 'd', value_name = "Δ")]
        delta: Option<u64>,
        /// Restrict B so that LOW <= log(B)/log(A) <= HIGH
        #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
        ratio_window: Option<Vec<f64>>,
        /// File for the full log (default: kraiz_log_<timestamp>.txt)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Do not write the log file
        #[arg(long, conflicts_with = "output")]
        no_log: bool,
        /// Number of worker threads (1 = sequential; default: all cores)
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
        /// Stop starting new bases after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// List the admissible (non perfect power) bases in a range
    Bases {
        /// Smallest base
        #[arg(long, short = 'm', default_value = "2")]
        min_base: u64,
        /// Largest base
        #[arg(long, short = 'B')]
        max_base: u64,
        /// Also list the excluded perfect powers
        #[arg(long)]
        show_excluded: bool,
    },
    /// Report whether integers are perfect powers
    Classify {
        /// Integers to classify
        #[arg(required = true)]
        numbers: Vec<u64>,
    },
}

/// Options for the search command that are not part of the search itself
struct RunOptions {
    jobs: Option<usize>,
    timeout: Option<Duration>,
    log_path: Option<PathBuf>,
    verbose: bool,
}

// --- Search ---

fn search_command(config: &SearchConfig, options: &RunOptions) -> Result<Verdict> {
    let driver: Box<dyn ScanDriver> = match options.jobs {
        Some(1) => Box::new(SequentialScan::new().with_timeout_option(options.timeout)),
        jobs => {
            let parallel = ParallelConfig::default().with_timeout_option(options.timeout);
            Box::new(match jobs {
                Some(n) => parallel.with_workers(n),
                None => parallel,
            })
        }
    };

    let progress: Box<dyn ProgressSink> = if options.verbose {
        Box::new(ConsoleProgress::new(search::nominal_combinations(config)))
    } else {
        Box::new(NoProgress)
    };

    let outcome =
        run_search(config, driver.as_ref(), progress.as_ref()).context("invalid configuration")?;

    if let Some(path) = &options.log_path {
        write_log(path, config, &outcome, Local::now())?;
        info!(path = %path.display(), "log written");
    }

    print!(
        "{}",
        render_summary(config, &outcome, options.log_path.as_deref())
    );

    Ok(Verdict::of(&outcome))
}

// --- Bases & Classify ---

fn bases_command(min_base: u64, max_base: u64, show_excluded: bool) {
    let bases = admissible_bases(min_base, max_base);
    println!(
        "{} admissible bases in {} … {}",
        bases.len(),
        min_base,
        max_base
    );
    let listing: Vec<String> = bases.iter().map(u64::to_string).collect();
    println!("{}", listing.join(" "));

    if show_excluded && min_base <= max_base {
        println!("\nExcluded perfect powers:");
        for n in min_base..=max_base {
            if let Some((root, exponent)) = perfect_power_decomposition(n) {
                println!("  {} = {}^{}", n, root, exponent);
            }
        }
    }
}

fn classify_command(numbers: &[u64]) {
    for &n in numbers {
        match perfect_power_decomposition(n) {
            Some((root, exponent)) => println!("{}: perfect power ({}^{})", n, root, exponent),
            None => println!("{}: not a perfect power", n),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Search {
            min_base,
            max_base,
            max_exp,
            z_max,
            filter_z,
            delta,
            ratio_window,
            output,
            no_log,
            jobs,
            timeout,
        } => {
            let ratio_window = ratio_window.map(|bounds| RatioWindow::new(bounds[0], bounds[1]));

            let config = SearchConfig::default()
                .with_base_range(min_base, max_base)
                .with_max_exponent(max_exp)
                .with_z_limit_option(z_max)
                .with_fixed_z_option(filter_z)
                .with_delta(delta.unwrap_or(0))
                .with_ratio_window_option(ratio_window);

            let log_path = if no_log {
                None
            } else {
                Some(output.unwrap_or_else(|| default_log_path(Local::now())))
            };

            let options = RunOptions {
                jobs,
                timeout: timeout.map(Duration::from_secs),
                log_path,
                verbose: args.verbose,
            };

            match search_command(&config, &options) {
                Ok(verdict) => std::process::exit(verdict.exit_code()),
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    std::process::exit(2);
                }
            }
        }
        Commands::Bases {
            min_base,
            max_base,
            show_excluded,
        } => bases_command(min_base, max_base, show_excluded),
        Commands::Classify { numbers } => classify_command(&numbers),
    }
}
