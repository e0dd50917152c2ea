//! Aggregated results: build → size → container → CPU time.
//!
//! [`ResultTableBuilder`] accumulates measurements while the log is parsed and
//! is frozen into a read-only [`ResultTable`]. [`CompilerGroup`] re-keys the
//! table by compiler and acceleration mode for the per-compiler reports.

use crate::build_name::{AccelerationMode, BuildName};
use crate::measurement::{ContainerType, Measurement};
use std::collections::BTreeMap;
use tracing::debug;

/// CPU times recorded for one size of one build
pub type SizeEntry = BTreeMap<ContainerType, f64>;

/// All sizes recorded for one build
pub type BuildResults = BTreeMap<usize, SizeEntry>;

/// Read-only view of every parsed measurement
///
/// Builds iterate in ascending identifier order, sizes ascending, and
/// containers primary first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    builds: BTreeMap<String, BuildResults>,
}

impl ResultTable {
    pub fn builds(&self) -> impl Iterator<Item = (&str, &BuildResults)> {
        self.builds.iter().map(|(name, results)| (name.as_str(), results))
    }

    pub fn build(&self, build: &str) -> Option<&BuildResults> {
        self.builds.get(build)
    }

    pub fn cpu_time(&self, build: &str, size: usize, container: ContainerType) -> Option<f64> {
        self.builds
            .get(build)?
            .get(&size)?
            .get(&container)
            .copied()
    }

    /// Number of builds that recorded at least one measurement
    pub fn n_builds(&self) -> usize {
        self.builds.len()
    }

    /// Total number of (build, size, container) entries
    pub fn n_measurements(&self) -> usize {
        self.builds
            .values()
            .flat_map(|sizes| sizes.values())
            .map(|entry| entry.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    /// Flatten back into individual measurements
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.builds.iter().flat_map(|(build, sizes)| {
            sizes.iter().flat_map(move |(&size, entry)| {
                entry.iter().map(move |(&container, &cpu_time)| Measurement {
                    build: build.clone(),
                    container,
                    size,
                    cpu_time,
                })
            })
        })
    }

    pub fn group_by_compiler(&self) -> CompilerGroup<'_> {
        CompilerGroup::from_table(self)
    }
}

/// Mutable accumulator used while parsing
#[derive(Debug, Default)]
pub struct ResultTableBuilder {
    builds: BTreeMap<String, BuildResults>,
    overwritten: usize,
}

impl ResultTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement, returning the CPU time it replaced, if any
    ///
    /// A repeated (build, size, container) triple keeps the last value.
    pub fn insert(&mut self, measurement: Measurement) -> Option<f64> {
        let previous = self
            .builds
            .entry(measurement.build.clone())
            .or_default()
            .entry(measurement.size)
            .or_default()
            .insert(measurement.container, measurement.cpu_time);

        if let Some(previous) = previous {
            self.overwritten += 1;
            debug!(
                "Overwriting {} size {} {}: {} -> {}",
                measurement.build,
                measurement.size,
                measurement.container,
                previous,
                measurement.cpu_time
            );
        }
        previous
    }

    /// Number of inserts that replaced an earlier value
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn build(self) -> ResultTable {
        ResultTable {
            builds: self.builds,
        }
    }
}

/// Results re-keyed by compiler id, then acceleration mode
#[derive(Debug, Clone, Default)]
pub struct CompilerGroup<'a> {
    compilers: BTreeMap<String, BTreeMap<AccelerationMode, &'a BuildResults>>,
}

impl<'a> CompilerGroup<'a> {
    /// Builds are visited in ascending identifier order; two identifiers
    /// decomposing to the same (compiler, mode) keep the later one.
    pub fn from_table(table: &'a ResultTable) -> Self {
        let mut compilers: BTreeMap<String, BTreeMap<AccelerationMode, &'a BuildResults>> =
            BTreeMap::new();

        for (identifier, results) in table.builds() {
            let BuildName { compiler, mode } = BuildName::parse(identifier);
            let replaced = compilers
                .entry(compiler.clone())
                .or_default()
                .insert(mode, results);
            if replaced.is_some() {
                debug!("Build {identifier} replaces an earlier {compiler} {mode} build");
            }
        }

        Self { compilers }
    }

    /// Compiler ids in ascending order
    pub fn compilers(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }

    /// Modes recorded for `compiler`, in [`AccelerationMode::PREFERRED_ORDER`]
    pub fn modes(&self, compiler: &str) -> Vec<(AccelerationMode, &'a BuildResults)> {
        let Some(modes) = self.compilers.get(compiler) else {
            return Vec::new();
        };
        AccelerationMode::PREFERRED_ORDER
            .iter()
            .filter_map(|mode| modes.get(mode).map(|&results| (*mode, results)))
            .collect()
    }

    pub fn get(&self, compiler: &str, mode: AccelerationMode) -> Option<&'a BuildResults> {
        self.compilers.get(compiler)?.get(&mode).copied()
    }

    pub fn len(&self) -> usize {
        self.compilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(build: &str, container: ContainerType, size: usize, cpu_time: f64) -> Measurement {
        Measurement {
            build: build.to_string(),
            container,
            size,
            cpu_time,
        }
    }

    #[test]
    fn test_builder_nests_by_build_size_container() {
        let mut builder = ResultTableBuilder::new();
        builder.insert(measurement("build_gcc14_xsimd", ContainerType::Xtensor, 4, 250.5));
        builder.insert(measurement("build_gcc14_xsimd", ContainerType::Fixed, 4, 180.0));
        let table = builder.build();

        assert_eq!(table.n_builds(), 1);
        assert_eq!(table.n_measurements(), 2);
        assert_eq!(
            table.cpu_time("build_gcc14_xsimd", 4, ContainerType::Xtensor),
            Some(250.5)
        );
        assert_eq!(
            table.cpu_time("build_gcc14_xsimd", 4, ContainerType::Fixed),
            Some(180.0)
        );
        assert_eq!(table.cpu_time("build_gcc14_xsimd", 8, ContainerType::Fixed), None);
    }

    #[test]
    fn test_builder_last_write_wins() {
        let mut builder = ResultTableBuilder::new();
        assert_eq!(
            builder.insert(measurement("build_a_xsimd", ContainerType::Fixed, 1, 10.0)),
            None
        );
        assert_eq!(
            builder.insert(measurement("build_a_xsimd", ContainerType::Fixed, 1, 12.0)),
            Some(10.0)
        );
        assert_eq!(builder.overwritten(), 1);

        let table = builder.build();
        assert_eq!(table.cpu_time("build_a_xsimd", 1, ContainerType::Fixed), Some(12.0));
        assert_eq!(table.n_measurements(), 1);
    }

    #[test]
    fn test_measurements_flatten_in_order() {
        let mut builder = ResultTableBuilder::new();
        builder.insert(measurement("build_b_xsimd", ContainerType::Fixed, 2, 3.0));
        builder.insert(measurement("build_a_xsimd", ContainerType::Fixed, 1, 2.0));
        builder.insert(measurement("build_a_xsimd", ContainerType::Xtensor, 1, 1.0));
        let table = builder.build();

        let flat: Vec<_> = table.measurements().collect();
        assert_eq!(
            flat,
            vec![
                measurement("build_a_xsimd", ContainerType::Xtensor, 1, 1.0),
                measurement("build_a_xsimd", ContainerType::Fixed, 1, 2.0),
                measurement("build_b_xsimd", ContainerType::Fixed, 2, 3.0),
            ]
        );
    }

    #[test]
    fn test_group_by_compiler_splits_modes() {
        let mut builder = ResultTableBuilder::new();
        builder.insert(measurement("build_gcc14_xsimd", ContainerType::Fixed, 1, 1.0));
        builder.insert(measurement("build_gcc14_noxsimd", ContainerType::Fixed, 1, 2.0));
        builder.insert(measurement("build_clang18_noxsimd", ContainerType::Fixed, 1, 3.0));
        let table = builder.build();
        let group = table.group_by_compiler();

        assert_eq!(group.len(), 2);
        assert_eq!(group.compilers().collect::<Vec<_>>(), vec!["clang18", "gcc14"]);

        let gcc_modes: Vec<_> = group.modes("gcc14").into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            gcc_modes,
            vec![AccelerationMode::Xsimd, AccelerationMode::Noxsimd]
        );

        let clang_modes: Vec<_> = group.modes("clang18").into_iter().map(|(m, _)| m).collect();
        assert_eq!(clang_modes, vec![AccelerationMode::Noxsimd]);

        let gcc_noxsimd = group.get("gcc14", AccelerationMode::Noxsimd).unwrap();
        assert_eq!(gcc_noxsimd[&1][&ContainerType::Fixed], 2.0);
        assert!(group.modes("icx").is_empty());
    }

    #[test]
    fn test_group_collision_keeps_later_build() {
        // Both decompose to (gcc14, noxsimd); "build_gcc14_noxsimd" sorts last
        let mut builder = ResultTableBuilder::new();
        builder.insert(measurement("build_gcc14", ContainerType::Fixed, 1, 1.0));
        builder.insert(measurement("build_gcc14_noxsimd", ContainerType::Fixed, 1, 2.0));
        let table = builder.build();
        let group = table.group_by_compiler();

        let results = group.get("gcc14", AccelerationMode::Noxsimd).unwrap();
        assert_eq!(results[&1][&ContainerType::Fixed], 2.0);
    }
}
