//! How often fixed beats xtensor, per compiler and mode.

use super::{TimingPair, WIDE_RULE, rule};
use crate::build_name::AccelerationMode;
use crate::table::{BuildResults, CompilerGroup};
use std::fmt;

/// Win counts for one build
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WinSummary {
    pub fixed_wins: usize,
    pub xtensor_wins: usize,
    /// Sum of xtensor/fixed ratios over the sizes fixed won
    pub total_fixed_speedup: f64,
}

impl WinSummary {
    pub fn tally(results: &BuildResults, sizes: &[usize]) -> Self {
        let mut summary = Self::default();
        for timing in sizes
            .iter()
            .filter_map(|&size| TimingPair::lookup(results, size))
        {
            summary.record(timing);
        }
        summary
    }

    pub fn record(&mut self, timing: TimingPair) {
        if timing.fixed < timing.xtensor {
            self.fixed_wins += 1;
            self.total_fixed_speedup += timing.ratio();
        } else {
            self.xtensor_wins += 1;
        }
    }

    /// Sizes where both containers were measured
    pub fn compared(&self) -> usize {
        self.fixed_wins + self.xtensor_wins
    }

    /// Mean speedup over the sizes fixed won, 0 when it never won
    pub fn average_fixed_speedup(&self) -> f64 {
        if self.fixed_wins > 0 {
            self.total_fixed_speedup / self.fixed_wins as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeSummary {
    pub mode: AccelerationMode,
    pub wins: WinSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSummary {
    pub compiler: String,
    pub modes: Vec<ModeSummary>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryReport {
    pub compilers: Vec<CompilerSummary>,
}

impl SummaryReport {
    pub fn build(group: &CompilerGroup<'_>, sizes: &[usize]) -> Self {
        let compilers = group
            .compilers()
            .map(|compiler| CompilerSummary {
                compiler: compiler.to_string(),
                modes: group
                    .modes(compiler)
                    .into_iter()
                    .map(|(mode, results)| ModeSummary {
                        mode,
                        wins: WinSummary::tally(results, sizes),
                    })
                    .collect(),
            })
            .collect();

        Self { compilers }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=', WIDE_RULE)?;
        writeln!(f, "SUMMARY: FIXED vs XTENSOR wins by compiler and xsimd status")?;
        rule(f, '=', WIDE_RULE)?;

        for compiler in &self.compilers {
            writeln!(f)?;
            writeln!(f, "{}:", compiler.compiler.to_uppercase())?;
            for mode in &compiler.modes {
                writeln!(
                    f,
                    "  {}: fixed wins {}/{} sizes (avg speedup when fixed wins: {:.2}x)",
                    mode.mode,
                    mode.wins.fixed_wins,
                    mode.wins.compared(),
                    mode.wins.average_fixed_speedup()
                )?;
            }
        }

        Ok(())
    }
}
