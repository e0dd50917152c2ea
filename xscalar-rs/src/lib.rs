//! Reports for the xtensor vs xtensor_fixed scalar-add benchmarks
//!
//! `bench_xscalar` is built once per compiler, with and without xsimd, and
//! every run's Google Benchmark CSV output is appended to a single log under a
//! `=== build_<compiler>_<mode> ===` banner. This crate parses that log into a
//! [`ResultTable`] and renders three reports from it:
//!
//! - [`ComparisonReport`]: xtensor vs fixed per size, for every compiler and mode
//! - [`ExtremesReport`]: fastest and slowest configuration per size
//! - [`SummaryReport`]: how many sizes fixed wins, and by how much
//!
//! # Quick Start
//!
//! ```no_run
//! use xscalar_rs::{ReportConfig, ReportKind, parse_results_file, render_reports};
//!
//! let outcome = parse_results_file("all_results.txt")?;
//! println!("{} rows ignored", outcome.stats.unmatched.len());
//!
//! let text = render_reports(&outcome.table, &ReportKind::ALL, &ReportConfig::default());
//! print!("{text}");
//! # Ok::<(), xscalar_rs::XScalarError>(())
//! ```

pub mod build_name;
pub mod error;
pub mod measurement;
pub mod parser;
pub mod report;
pub mod table;

pub use build_name::{AccelerationMode, BuildName};
pub use error::{Result, XScalarError};
pub use measurement::{ContainerType, Measurement, NameMatch, NamePattern};
pub use parser::{ParseOutcome, ParseStats, ResultsParser, UnmatchedRow, parse_results_file};
pub use report::{
    ComparisonReport, DEFAULT_SIZES, ExtremesReport, ReportConfig, ReportKind, SummaryReport,
    TimingPair, render_reports,
};
pub use table::{BuildResults, CompilerGroup, ResultTable, ResultTableBuilder, SizeEntry};
