//! Plain-text reports built from a [`ResultTable`].
//!
//! Each report is computed into plain data first and rendered through
//! `Display`, so the numbers can be checked without parsing text.

pub mod comparison;
pub mod extremes;
pub mod summary;

pub use comparison::{ComparisonReport, ComparisonRow, CompilerComparison, ModeComparison};
pub use extremes::{ConfigTime, ExtremesReport, ExtremesRow};
pub use summary::{CompilerSummary, ModeSummary, SummaryReport, WinSummary};

use crate::measurement::ContainerType;
use crate::table::{BuildResults, ResultTable, SizeEntry};
use std::fmt::{self, Write};

/// Sizes benchmarked by `bench_xscalar`, in report order
pub const DEFAULT_SIZES: [usize; 17] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 16, 32, 64, 128, 256, 512, 1024,
];

pub(crate) const WIDE_RULE: usize = 120;
pub(crate) const RULE: usize = 100;

/// Options shared by every report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Sizes to report on, in output order
    pub sizes: Vec<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Comparison,
    Extremes,
    Summary,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Comparison,
        ReportKind::Extremes,
        ReportKind::Summary,
    ];
}

/// xtensor and fixed CPU times for one size of one build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPair {
    pub xtensor: f64,
    pub fixed: f64,
}

impl TimingPair {
    /// Both containers must have a strictly positive time; a zero counts as
    /// not measured.
    pub fn from_entry(entry: &SizeEntry) -> Option<Self> {
        let xtensor = entry.get(&ContainerType::Xtensor).copied()?;
        let fixed = entry.get(&ContainerType::Fixed).copied()?;
        (xtensor > 0.0 && fixed > 0.0).then_some(Self { xtensor, fixed })
    }

    pub fn lookup(results: &BuildResults, size: usize) -> Option<Self> {
        results.get(&size).and_then(Self::from_entry)
    }

    /// xtensor time over fixed time; above 1 means fixed is faster
    pub fn ratio(&self) -> f64 {
        self.xtensor / self.fixed
    }

    pub fn winner(&self) -> ContainerType {
        if self.ratio() > 1.0 {
            ContainerType::Fixed
        } else {
            ContainerType::Xtensor
        }
    }

    /// How many times faster the winner is (always >= 1)
    pub fn speedup(&self) -> f64 {
        let ratio = self.ratio();
        if ratio > 1.0 { ratio } else { 1.0 / ratio }
    }

    pub fn swapped(&self) -> Self {
        Self {
            xtensor: self.fixed,
            fixed: self.xtensor,
        }
    }
}

pub(crate) fn rule(f: &mut fmt::Formatter<'_>, ch: char, width: usize) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(width))
}

/// Render the selected reports in order, separated by blank lines
pub fn render_reports(
    table: &ResultTable,
    kinds: &[ReportKind],
    config: &ReportConfig,
) -> String {
    let group = table.group_by_compiler();
    let mut out = String::new();

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n\n");
        }
        // Writing into a String cannot fail
        let _ = match kind {
            ReportKind::Comparison => {
                write!(out, "{}", ComparisonReport::build(&group, &config.sizes))
            }
            ReportKind::Extremes => write!(out, "{}", ExtremesReport::build(table, &config.sizes)),
            ReportKind::Summary => write!(out, "{}", SummaryReport::build(&group, &config.sizes)),
        };
    }

    out
}
