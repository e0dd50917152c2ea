//! Per-compiler xtensor vs fixed tables.

use super::{RULE, TimingPair, WIDE_RULE, rule};
use crate::build_name::AccelerationMode;
use crate::measurement::ContainerType;
use crate::table::CompilerGroup;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub size: usize,
    pub timing: TimingPair,
}

impl ComparisonRow {
    pub fn ratio(&self) -> f64 {
        self.timing.ratio()
    }

    pub fn winner(&self) -> ContainerType {
        self.timing.winner()
    }

    /// e.g. `fixed (1.4x)`
    pub fn winner_label(&self) -> String {
        format!("{} ({:.1}x)", self.winner(), self.timing.speedup())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeComparison {
    pub mode: AccelerationMode,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerComparison {
    pub compiler: String,
    pub modes: Vec<ModeComparison>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    pub compilers: Vec<CompilerComparison>,
}

impl ComparisonReport {
    /// Sizes missing either container are left out of the table
    pub fn build(group: &CompilerGroup<'_>, sizes: &[usize]) -> Self {
        let compilers = group
            .compilers()
            .map(|compiler| CompilerComparison {
                compiler: compiler.to_string(),
                modes: group
                    .modes(compiler)
                    .into_iter()
                    .map(|(mode, results)| ModeComparison {
                        mode,
                        rows: sizes
                            .iter()
                            .filter_map(|&size| {
                                TimingPair::lookup(results, size)
                                    .map(|timing| ComparisonRow { size, timing })
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self { compilers }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=', WIDE_RULE)?;
        writeln!(
            f,
            "XTENSOR vs XTENSOR_FIXED - Performance Comparison (CPU time in ns, lower is better)"
        )?;
        rule(f, '=', WIDE_RULE)?;
        writeln!(f)?;

        for compiler in &self.compilers {
            writeln!(f)?;
            rule(f, '=', RULE)?;
            writeln!(f, "COMPILER: {}", compiler.compiler.to_uppercase())?;
            rule(f, '=', RULE)?;

            for mode in &compiler.modes {
                writeln!(f)?;
                writeln!(f, "--- {} ---", mode.mode.to_string().to_uppercase())?;
                writeln!(
                    f,
                    "{:>6} | {:>10} | {:>10} | {:>8} | {:>10}",
                    "Size", "xtensor", "fixed", "ratio", "Winner"
                )?;
                rule(f, '-', 60)?;
                for row in &mode.rows {
                    writeln!(
                        f,
                        "{:>6} | {:>10.2} | {:>10.2} | {:>8.2} | {:>10}",
                        row.size,
                        row.timing.xtensor,
                        row.timing.fixed,
                        row.ratio(),
                        row.winner_label()
                    )?;
                }
            }
        }

        Ok(())
    }
}
