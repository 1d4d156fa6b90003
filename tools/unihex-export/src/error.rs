//! Error taxonomy for the export pipeline

use std::path::PathBuf;

/// Every failure is fatal: the run aborts before any artifact is written.
#[derive(Debug, thiserror::Error)]
pub enum UnihexError {
    /// The source font cannot be opened
    #[error("cannot open input {path:?}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the hex font is malformed
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// Reading the input or writing an artifact failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value does not fit the signed 32-bit table layout
    #[error("{field} value {value} does not fit in a 32-bit table field")]
    Overflow { field: &'static str, value: u64 },

    /// A `.dat` image is truncated or inconsistent
    #[error("corrupt table image: {0}")]
    Corrupt(String),
}

impl UnihexError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = UnihexError> = std::result::Result<T, E>;
