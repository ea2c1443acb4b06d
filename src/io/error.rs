//! Error types and context management for crossword generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all crossword generation operations
#[derive(Debug)]
pub enum CrosswordError {
    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Grid input is empty, ragged, or contains values other than 0 and 1
    MalformedGrid {
        /// Description of what's wrong with the grid
        reason: String,
    },

    /// A constraint index build received words of more than one length
    MixedWordLengths {
        /// Length established by the first word
        expected: usize,
        /// Length of the offending word
        found: usize,
        /// The offending word
        word: String,
    },

    /// Source data doesn't meet generator requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Generator parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Constraint index blob could not be encoded or decoded
    CacheSerialization {
        /// Cache file involved
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Every permitted attempt timed out before finding a fill
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// A filled board violates a crossing, word or reuse rule
    InvalidBoard {
        /// Description of the violation
        reason: String,
    },

    /// The worker pool could not be created
    WorkerPool {
        /// Description of the failure
        reason: String,
    },

    /// Failed to encode the search animation
    GifExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },
}

impl fmt::Display for CrosswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MalformedGrid { reason } => {
                write!(f, "Malformed grid: {reason}")
            }
            Self::MixedWordLengths {
                expected,
                found,
                word,
            } => {
                write!(
                    f,
                    "All words must share one length: expected {expected}, found '{word}' with length {found}"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CacheSerialization { path, source } => {
                write!(
                    f,
                    "Constraint cache '{}' could not be serialized: {source}",
                    path.display()
                )
            }
            Self::AttemptsExhausted { attempts } => {
                write!(f, "No fill found: all {attempts} attempts timed out")
            }
            Self::InvalidBoard { reason } => {
                write!(f, "Invalid board: {reason}")
            }
            Self::WorkerPool { reason } => {
                write!(f, "Worker pool error: {reason}")
            }
            Self::GifExport { path, source } => {
                write!(
                    f,
                    "Failed to export animation to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CrosswordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::CacheSerialization { source, .. } => Some(source),
            Self::GifExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crossword results
pub type Result<T> = std::result::Result<T, CrosswordError>;

impl From<std::io::Error> for CrosswordError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for CrosswordError {
    fn from(err: serde_json::Error) -> Self {
        Self::CacheSerialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Attach a path and operation to a raw I/O failure
pub trait WithPath<T> {
    /// Convert an I/O error into a [`CrosswordError::FileSystem`] naming the path
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| CrosswordError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CrosswordError {
    CrosswordError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed grid error
pub fn malformed_grid(reason: &impl ToString) -> CrosswordError {
    CrosswordError::MalformedGrid {
        reason: reason.to_string(),
    }
}

/// Create an invalid board error
pub fn invalid_board(reason: &impl ToString) -> CrosswordError {
    CrosswordError::InvalidBoard {
        reason: reason.to_string(),
    }
}
