use std::fmt;

/// All errors that can occur while building, training or persisting a network.
#[derive(Debug)]
pub enum MlpError {
    /// Invalid layer structure or run parameters, caught before any work starts.
    Config(String),
    /// Underlying file or stream failure.
    Io(std::io::Error),
    /// Malformed input data: pattern lines, weight files, JSON, or vectors of
    /// the wrong length.
    Format(String),
    /// A value does not fit the fixed-width field it is written to.
    Overflow(String),
    /// A weight accessor was called with an index outside the matrix.
    IndexOutOfRange {
        transition: usize,
        input: usize,
        output: usize,
    },
}

impl fmt::Display for MlpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Overflow(msg) => write!(f, "overflow: {msg}"),
            Self::IndexOutOfRange {
                transition,
                input,
                output,
            } => write!(
                f,
                "weight index out of range: transition={transition} input={input} output={output}"
            ),
        }
    }
}

impl std::error::Error for MlpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MlpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MlpError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(format!("invalid json: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, MlpError>;
