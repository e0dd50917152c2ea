use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use xscalar_rs::{ReportConfig, ReportKind, ResultsParser, render_reports};

/// Results log written by the benchmark driver script
const DEFAULT_RESULTS_PATH: &str = "all_results.txt";

/// xscalar-report - xtensor vs xtensor_fixed benchmark tables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "xscalar-report")]
#[command(about = "Compare xtensor and xtensor_fixed CPU times across compilers and xsimd builds", long_about = None)]
struct Cli {
    /// Concatenated benchmark log with `=== build_<compiler>_<mode> ===` sections
    #[arg(value_name = "RESULTS_FILE", default_value = DEFAULT_RESULTS_PATH)]
    input: PathBuf,

    /// Which report to print
    #[arg(short, long, value_enum, default_value = "all")]
    report: ReportArg,

    /// Sizes to report on (comma-separated, e.g., "1,2,4,1024")
    /// If not specified, every size benchmarked by bench_xscalar is used
    #[arg(short, long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportArg {
    /// All three reports
    All,
    /// Per-compiler xtensor vs fixed tables
    Comparison,
    /// Best and worst configuration per size
    Extremes,
    /// Fixed win counts per compiler and mode
    Summary,
}

impl ReportArg {
    fn kinds(self) -> Vec<ReportKind> {
        match self {
            ReportArg::All => ReportKind::ALL.to_vec(),
            ReportArg::Comparison => vec![ReportKind::Comparison],
            ReportArg::Extremes => vec![ReportKind::Extremes],
            ReportArg::Summary => vec![ReportKind::Summary],
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout only carries the tables
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();

    let config = match args.sizes {
        Some(mut sizes) => {
            sizes.sort_unstable();
            sizes.dedup();
            ReportConfig { sizes }
        }
        None => ReportConfig::default(),
    };
    debug!("Reporting on sizes {:?}", config.sizes);

    let parser = ResultsParser::new()?;
    let outcome = parser
        .parse_file(&args.input)
        .with_context(|| format!("Failed to parse results file {}", args.input.display()))?;

    if outcome.table.is_empty() {
        warn!(
            "No xtensor/fixed measurements found in {}",
            args.input.display()
        );
    }

    let kinds = args.report.kinds();
    print!("{}", render_reports(&outcome.table, &kinds, &config));

    info!(
        "Reported {} builds in {:.2?}",
        outcome.table.n_builds(),
        start_time.elapsed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["xscalar-report"]).unwrap();
        assert_eq!(cli.input, PathBuf::from(DEFAULT_RESULTS_PATH));
        assert_eq!(cli.report.kinds(), ReportKind::ALL.to_vec());
        assert!(cli.sizes.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_report_and_sizes_flags() {
        let cli = Cli::try_parse_from([
            "xscalar-report",
            "results.txt",
            "--report",
            "summary",
            "--sizes",
            "4,1,16",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("results.txt"));
        assert_eq!(cli.report.kinds(), vec![ReportKind::Summary]);
        assert_eq!(cli.sizes, Some(vec![4, 1, 16]));
    }

    #[test]
    fn test_rejects_non_numeric_sizes() {
        assert!(Cli::try_parse_from(["xscalar-report", "--sizes", "1,big"]).is_err());
    }
}
