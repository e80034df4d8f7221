use core::fmt;
use std::path::PathBuf;

/// Result alias for `gridload`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the dataset reader, the result writers and the k-means driver.
///
/// Nothing inside the crate recovers from these; callers decide whether to abort.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The flat value array could not be allocated.
    AllocationFailed {
        /// Requested size in bytes (saturated on overflow).
        bytes: usize,
    },

    /// The first line of the input holds no parseable number.
    EmptyHeader,

    /// Total token count is not a multiple of the inferred dimensionality.
    NonRectangular {
        /// Number of numeric tokens found in the whole input.
        tokens: usize,
        /// Columns inferred from the first line.
        n_dims: usize,
    },

    /// The load pass produced fewer values than the counting pass.
    Truncated {
        /// Values expected from the counting pass.
        expected: usize,
        /// Values actually loaded.
        found: usize,
    },

    /// A scanned token could not be converted to a float.
    Parse {
        /// Byte offset of the token in the input.
        offset: usize,
    },

    /// Shape mismatch between collaborating structures.
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Input was empty.
    EmptyInput,

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of points.
        n_items: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A snapshot file could not be created.
    SnapshotOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },

    /// Reading from or writing to a stream failed.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {bytes} bytes for the dataset")
            }
            Error::EmptyHeader => write!(f, "first line of input contains no numbers"),
            Error::NonRectangular { tokens, n_dims } => write!(
                f,
                "{tokens} values cannot be split into rows of {n_dims} columns"
            ),
            Error::Truncated { expected, found } => {
                write!(f, "input truncated: expected {expected} values, read {found}")
            }
            Error::Parse { offset } => write!(f, "malformed number at byte {offset}"),
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::SnapshotOpen { path, message } => write!(
                f,
                "can not open file \"{}\" for writing: {message}",
                path.display()
            ),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
