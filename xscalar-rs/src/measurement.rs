//! Benchmark measurements and classification of benchmark row names.
//!
//! Every benchmark in the log is named `<container>_double_<size>`, where the
//! container is either `xtensor` (runtime-sized) or `fixed` (compile-time sized).

use crate::error::Result;
use regex::Regex;
use strum_macros::{Display, EnumIter, EnumString};

/// The two container implementations compared at every size
///
/// `Xtensor` is the primary (reference) container, `Fixed` the alternate one
/// whose speedup the reports are about.
#[derive(
    Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerType {
    /// `xt::xtensor<T, 1>` with a runtime shape
    Xtensor,
    /// `xt::xtensor_fixed<T, xshape<N>>` with a compile-time shape
    Fixed,
}

/// A single CPU-time measurement parsed from the log
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub build: String,
    pub container: ContainerType,
    pub size: usize,
    /// CPU time in nanoseconds
    pub cpu_time: f64,
}

/// Outcome of classifying a benchmark row name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Matched { container: ContainerType, size: usize },
    Unmatched,
}

/// Compiled `(xtensor|fixed)_double_<digits>` pattern
///
/// Only the start of the name is anchored, so trailing decorations such as
/// `xtensor_double_8/iterations:100` still classify as size 8.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    pub const PATTERN: &'static str = r"^(xtensor|fixed)_double_(\d+)";

    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: Regex::new(Self::PATTERN)?,
        })
    }

    /// Classify a raw (unquoted) benchmark name
    pub fn classify(&self, name: &str) -> NameMatch {
        let Some(caps) = self.regex.captures(name) else {
            return NameMatch::Unmatched;
        };

        let container = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<ContainerType>().ok());
        // A size too large for usize cannot be one of ours
        let size = caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok());

        match (container, size) {
            (Some(container), Some(size)) => NameMatch::Matched { container, size },
            _ => NameMatch::Unmatched,
        }
    }
}
