//! Error types for normalization runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NormalizeConfigBuilderError;
use crate::report::RunReport;

/// Fatal errors that abort a normalization run.
///
/// Per-file failures are not errors at this level; they are recorded in the
/// [`RunReport`] as [`ResetFailure`]s.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Root path is missing or is not a directory. Nothing was touched.
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The directory walk could not proceed.
    ///
    /// `partial` holds every outcome recorded before the walk stopped; those
    /// files keep their new attributes.
    #[error("Cannot enumerate {path}: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        partial: Box<RunReport>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl NormalizeError {
    /// Create an enumeration error carrying the report built so far.
    pub fn enumeration(
        path: impl Into<PathBuf>,
        source: std::io::Error,
        partial: RunReport,
    ) -> Self {
        Self::Enumeration {
            path: path.into(),
            source,
            partial: Box::new(partial),
        }
    }

    /// The partial report attached to the error, if the walk had started.
    pub fn partial_report(&self) -> Option<&RunReport> {
        match self {
            Self::Enumeration { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

impl From<NormalizeConfigBuilderError> for NormalizeError {
    fn from(err: NormalizeConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

/// Kind of per-file reset failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The current user may not change the file's attributes.
    PermissionDenied,
    /// The file vanished between enumeration and reset.
    NotFound,
    /// Any other I/O failure (path too long, sharing violation, ...).
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "Permission denied"),
            Self::NotFound => write!(f, "Not found"),
            Self::Other => write!(f, "I/O error"),
        }
    }
}

/// A non-fatal failure to reset one file's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetFailure {
    /// Kind of failure.
    pub kind: FailureKind,
    /// Human-readable reason.
    pub message: String,
}

impl ResetFailure {
    /// Create a new reset failure.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify an I/O error from an attribute change.
    pub fn from_io(error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            std::io::ErrorKind::NotFound => FailureKind::NotFound,
            _ => FailureKind::Other,
        };
        Self::new(kind, error.to_string())
    }
}

impl std::fmt::Display for ResetFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
