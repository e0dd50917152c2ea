use thiserror::Error;

#[derive(Error, Debug)]
pub enum XScalarError {
    #[error("I/O error while reading results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: data row has {found} comma-separated fields, expected at least {expected}")]
    MissingField {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("Line {line}: could not parse CPU time '{value}': {source}")]
    InvalidCpuTime {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Invalid benchmark name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl XScalarError {
    /// Create a MissingField error for a row that is too short
    pub fn missing_field(line: usize, found: usize, expected: usize) -> Self {
        Self::MissingField {
            line,
            found,
            expected,
        }
    }

    /// Create an InvalidCpuTime error from the raw field text
    pub fn invalid_cpu_time(
        line: usize,
        value: impl Into<String>,
        source: std::num::ParseFloatError,
    ) -> Self {
        Self::InvalidCpuTime {
            line,
            value: value.into(),
            source,
        }
    }

    /// Line number the error refers to, when it came from a specific row
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingField { line, .. } | Self::InvalidCpuTime { line, .. } => Some(*line),
            Self::Io(_) | Self::Pattern(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, XScalarError>;
