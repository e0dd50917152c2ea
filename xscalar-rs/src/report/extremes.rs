//! Fastest and slowest configuration for each size across all builds.

use super::{RULE, WIDE_RULE, rule};
use crate::build_name::BuildName;
use crate::measurement::ContainerType;
use crate::table::ResultTable;
use std::fmt;
use strum::IntoEnumIterator;

/// A `<compiler>_<mode>_<container>` label and its CPU time
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTime {
    pub label: String,
    pub cpu_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremesRow {
    pub size: usize,
    pub best: ConfigTime,
    /// `None` when every time recorded for the size is zero
    pub worst: Option<ConfigTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremesReport {
    pub rows: Vec<ExtremesRow>,
}

impl ExtremesReport {
    /// Builds are scanned in ascending identifier order and containers
    /// xtensor first; comparisons are strict, so the first value in that
    /// order wins a tie.
    pub fn build(table: &ResultTable, sizes: &[usize]) -> Self {
        let rows = sizes
            .iter()
            .filter_map(|&size| Self::scan_size(table, size))
            .collect();
        Self { rows }
    }

    fn scan_size(table: &ResultTable, size: usize) -> Option<ExtremesRow> {
        let mut best: Option<ConfigTime> = None;
        let mut best_time = f64::INFINITY;
        let mut worst: Option<ConfigTime> = None;
        let mut worst_time = 0.0;

        for (identifier, results) in table.builds() {
            let Some(entry) = results.get(&size) else {
                continue;
            };
            let build = BuildName::parse(identifier);

            for container in ContainerType::iter() {
                let Some(&time) = entry.get(&container) else {
                    continue;
                };
                if time < best_time {
                    best_time = time;
                    best = Some(ConfigTime {
                        label: format!("{build}_{container}"),
                        cpu_time: time,
                    });
                }
                if time > worst_time {
                    worst_time = time;
                    worst = Some(ConfigTime {
                        label: format!("{build}_{container}"),
                        cpu_time: time,
                    });
                }
            }
        }

        best.map(|best| ExtremesRow { size, best, worst })
    }
}

impl fmt::Display for ExtremesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=', WIDE_RULE)?;
        writeln!(f, "BEST CONFIGURATIONS PER SIZE (minimum CPU time)")?;
        rule(f, '=', WIDE_RULE)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:>6} | {:>30} | {:>10} | {:>30} | {:>10}",
            "Size", "Best Config", "Time (ns)", "Worst Config", "Time (ns)"
        )?;
        rule(f, '-', RULE)?;

        for row in &self.rows {
            let (worst_label, worst_time) = row
                .worst
                .as_ref()
                .map_or(("", 0.0), |w| (w.label.as_str(), w.cpu_time));
            writeln!(
                f,
                "{:>6} | {:>30} | {:>10.2} | {:>30} | {:>10.2}",
                row.size, row.best.label, row.best.cpu_time, worst_label, worst_time
            )?;
        }

        Ok(())
    }
}
