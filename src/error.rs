//! Error types shared by the criterion engine and the search functions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or evaluating criteria.
///
/// A criterion that simply does not hold is *not* an error: `test` returns a
/// result with `result == false`. Errors are reserved for configuration
/// mistakes and for faults of the environment.
#[derive(Error, Debug)]
pub enum CriterionError {
    /// The start path of a search does not exist.
    #[error("`{}` does not exist.", path.display())]
    NotFound { path: PathBuf },

    /// The ancestor chain was exhausted without any criterion matching.
    #[error("No root directory found in {} or its parent directories.", start.display())]
    NoRootFound { start: PathBuf },

    /// Reading a directory or a file failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A regular expression did not compile.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A glob pattern did not compile.
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    /// A name template could not be expanded with the given captures.
    #[error("Cannot expand template `{template}`: {reason}")]
    Template { template: String, reason: String },

    /// The input cannot be turned into a criterion.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CriterionError {
    /// Wrap an I/O error together with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CriterionError>;
