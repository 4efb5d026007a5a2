use std::{error::Error, fmt, io};

/// The model crate's result type.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// Failures while loading artifacts or running inference.
#[derive(Debug)]
pub enum ModelErr {
    Io(io::Error),
    /// An artifact file could not be opened.
    Artifact {
        path: String,
        source: io::Error,
    },
    /// An artifact parsed but violates a structural invariant.
    Malformed(String),
    /// A shape invariant was violated (e.g. mismatched lengths).
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
}

impl fmt::Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::Io(e) => write!(f, "io error: {e}"),
            ModelErr::Artifact { path, source } => {
                write!(f, "failed to open artifact {path}: {source}")
            }
            ModelErr::Malformed(msg) => write!(f, "malformed artifact: {msg}"),
            ModelErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Io(e) => Some(e),
            ModelErr::Artifact { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<ModelErr> for io::Error {
    fn from(value: ModelErr) -> Self {
        match value {
            ModelErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
