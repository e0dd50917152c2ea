use std::fmt;
use strum_macros::Display;

/// Whether the build was compiled with xsimd vectorization enabled
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum AccelerationMode {
    Xsimd,
    Noxsimd,
}

impl AccelerationMode {
    /// Order in which modes are listed for a compiler
    pub const PREFERRED_ORDER: [AccelerationMode; 2] =
        [AccelerationMode::Xsimd, AccelerationMode::Noxsimd];

    /// Suffix marker appended to the compiler id in a build identifier
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Xsimd => BuildName::XSIMD_MARKER,
            Self::Noxsimd => BuildName::NOXSIMD_MARKER,
        }
    }
}

/// A build identifier split into compiler and acceleration mode
///
/// `build_gcc14_xsimd` decomposes into (`gcc14`, `xsimd`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildName {
    pub compiler: String,
    pub mode: AccelerationMode,
}

impl BuildName {
    pub const PREFIX: &'static str = "build_";
    pub const XSIMD_MARKER: &'static str = "_xsimd";
    pub const NOXSIMD_MARKER: &'static str = "_noxsimd";

    /// Decompose a build identifier
    ///
    /// There is no validation: an identifier carrying neither marker is
    /// reported as `noxsimd` with the whole (prefix-stripped) remainder as
    /// the compiler id.
    pub fn parse(identifier: &str) -> Self {
        let remainder = identifier.replace(Self::PREFIX, "");
        if remainder.contains(Self::XSIMD_MARKER) {
            Self {
                compiler: remainder.replace(Self::XSIMD_MARKER, ""),
                mode: AccelerationMode::Xsimd,
            }
        } else {
            Self {
                compiler: remainder.replace(Self::NOXSIMD_MARKER, ""),
                mode: AccelerationMode::Noxsimd,
            }
        }
    }

    /// Recombine into `build_<compiler>_<mode>`
    pub fn identifier(&self) -> String {
        format!("{}{}{}", Self::PREFIX, self.compiler, self.mode.marker())
    }
}

impl fmt::Display for BuildName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.compiler, self.mode)
    }
}
