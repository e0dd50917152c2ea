//! Line-oriented parser for concatenated benchmark logs.
//!
//! The log is the output of several Google Benchmark runs in CSV mode, each
//! preceded by a `=== build_<compiler>_<mode> ===` banner:
//!
//! ```text
//! === build_gcc14_xsimd ===
//! name,iterations,real_time,cpu_time,time_unit,...
//! "xtensor_double_1",1000000,1.52,1.51,ns,...
//! "fixed_double_1",1000000,0.91,0.90,ns,...
//! ```

use crate::error::{Result, XScalarError};
use crate::measurement::{Measurement, NameMatch, NamePattern};
use crate::table::{ResultTable, ResultTableBuilder};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Lines starting with this open a new build section
pub const HEADER_MARKER: &str = "=== build_";

/// Zero-based index of the CPU time column in a data row
pub const CPU_TIME_FIELD: usize = 3;

/// A data row whose benchmark name did not classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedRow {
    /// 1-based line number
    pub line: usize,
    pub build: String,
    pub name: String,
}

/// Counters collected while parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub headers: usize,
    pub recorded: usize,
    /// Data rows seen before any build header
    pub skipped_before_header: usize,
    /// Recorded rows that replaced an earlier value for the same key
    pub overwritten: usize,
    pub unmatched: Vec<UnmatchedRow>,
}

/// Finished table plus what happened to every row
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub table: ResultTable,
    pub stats: ParseStats,
}

#[derive(Debug, Clone)]
pub struct ResultsParser {
    pattern: NamePattern,
}

impl ResultsParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: NamePattern::new()?,
        })
    }

    /// Open `path` and parse it; the file handle is released when parsing ends
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseOutcome> {
        let path = path.as_ref();
        debug!("Opening results file {}", path.display());
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }

    pub fn parse_str(&self, text: &str) -> Result<ParseOutcome> {
        self.parse(text.as_bytes())
    }

    /// Parse a whole log in a single pass
    ///
    /// # Errors
    /// Fails on I/O errors, on a data row with fewer than four fields and on a
    /// CPU time that is not a number. Rows whose name does not classify are
    /// recorded in [`ParseStats::unmatched`] instead.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<ParseOutcome> {
        let mut builder = ResultTableBuilder::new();
        let mut stats = ParseStats::default();
        let mut current_build: Option<String> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;
            let line = line.trim();
            stats.lines += 1;

            if line.starts_with(HEADER_MARKER) {
                let build = line.replace("=== ", "").replace(" ===", "");
                debug!("Line {line_number}: entering build section {build}");
                stats.headers += 1;
                current_build = Some(build);
                continue;
            }

            if !line.starts_with('"') {
                continue;
            }

            let Some(build) = current_build.as_deref() else {
                stats.skipped_before_header += 1;
                continue;
            };

            let (name, cpu_time) = split_data_row(line, line_number)?;
            match self.pattern.classify(name) {
                NameMatch::Matched { container, size } => {
                    let previous = builder.insert(Measurement {
                        build: build.to_string(),
                        container,
                        size,
                        cpu_time,
                    });
                    stats.recorded += 1;
                    if previous.is_some() {
                        stats.overwritten += 1;
                    }
                }
                NameMatch::Unmatched => {
                    debug!("Line {line_number}: ignoring benchmark '{name}' in {build}");
                    stats.unmatched.push(UnmatchedRow {
                        line: line_number,
                        build: build.to_string(),
                        name: name.to_string(),
                    });
                }
            }
        }

        let table = builder.build();

        info!(
            "Parsed {} lines: {} builds, {} measurements ({} rows recorded)",
            stats.lines,
            table.n_builds(),
            table.n_measurements(),
            stats.recorded
        );
        if stats.skipped_before_header > 0 {
            warn!(
                "Skipped {} data rows appearing before the first build header",
                stats.skipped_before_header
            );
        }
        if !stats.unmatched.is_empty() {
            warn!(
                "Ignored {} rows with unrecognised benchmark names",
                stats.unmatched.len()
            );
            debug!(
                "Unrecognised names: {}",
                stats.unmatched.iter().map(|row| &row.name).unique().join(", ")
            );
        }

        Ok(ParseOutcome { table, stats })
    }
}

/// Split a quoted CSV data row into its benchmark name and CPU time
fn split_data_row(line: &str, line_number: usize) -> Result<(&str, f64)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= CPU_TIME_FIELD {
        return Err(XScalarError::missing_field(
            line_number,
            fields.len(),
            CPU_TIME_FIELD + 1,
        ));
    }

    let name = fields[0].trim_matches('"');
    let raw = fields[CPU_TIME_FIELD].trim();
    let cpu_time = raw
        .parse::<f64>()
        .map_err(|e| XScalarError::invalid_cpu_time(line_number, raw, e))?;

    Ok((name, cpu_time))
}

/// Parse the file at `path` with the default name pattern
pub fn parse_results_file(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    ResultsParser::new()?.parse_file(path)
}
