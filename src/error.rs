//! Error types for scaffold operations.
//!
//! Errors fall in two groups:
//! - Policy rejections (exit code 2): a catalog entry that must never be
//!   written (escaping, absolute or duplicate paths) or a template value
//!   that cannot be inserted into the files as-is
//! - Runtime errors (exit code 1): filesystem and manifest failures

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while validating or writing a single artifact.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Directory creation or file write failed.
    #[error("failed to write {}", .path.display())]
    Io {
        /// Absolute path of the filesystem entry that could not be created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The relative path resolves outside the project root.
    #[error("path escapes project root: {path}")]
    PathEscape { path: String },

    /// The relative path is empty or absolute.
    #[error("invalid artifact path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Two artifacts resolve to the same target.
    #[error("duplicate artifact path: {path}")]
    DuplicatePath { path: String },

    /// A `--name` or `--package` value that would corrupt the rendered files.
    #[error("invalid {var} {value:?}: {reason}")]
    InvalidTemplateVar {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A declarative catalog could not be read or is malformed.
    #[error("invalid manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error is about, as shown to users.
    pub fn subject(&self) -> String {
        match self {
            ScaffoldError::Io { path, .. } | ScaffoldError::Manifest { path, .. } => {
                path.display().to_string()
            }
            ScaffoldError::PathEscape { path }
            | ScaffoldError::InvalidPath { path, .. }
            | ScaffoldError::DuplicatePath { path } => path.clone(),
            ScaffoldError::InvalidTemplateVar { var, .. } => format!("--{}", var),
        }
    }

    /// Returns true for errors raised by path policy rather than the environment.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            ScaffoldError::PathEscape { .. }
                | ScaffoldError::InvalidPath { .. }
                | ScaffoldError::DuplicatePath { .. }
                | ScaffoldError::InvalidTemplateVar { .. }
        )
    }

    /// Returns the recommended process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_policy_rejection() {
            2
        } else {
            1
        }
    }
}

/// First error of a fail-fast catalog run.
///
/// `written` counts the artifacts that landed on disk before the failure;
/// nothing after `path` was attempted.
#[derive(Debug, Error)]
#[error("scaffold aborted at {path} after {written} artifact(s)")]
pub struct WriteFailure {
    pub written: usize,
    pub path: String,
    #[source]
    pub source: ScaffoldError,
}

impl WriteFailure {
    pub fn exit_code(&self) -> u8 {
        self.source.exit_code()
    }
}

/// Result type alias using ScaffoldError.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
