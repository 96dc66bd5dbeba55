//! Run report built during a normalization walk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ResetFailure;

/// Result of one attribute-reset attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Attributes are now normal.
    Success,
    /// Attributes could not be reset.
    Failure(ResetFailure),
}

impl Outcome {
    /// Check if this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Outcome for a single discovered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// A directory that could not be read and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDirectory {
    pub path: PathBuf,
    pub message: String,
}

/// Ordered record of every attempt made during one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Root directory of the run.
    pub root: PathBuf,
    /// One entry per discovered file, in visit order.
    pub outcomes: Vec<FileOutcome>,
    /// Directories skipped because they could not be read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDirectory>,
    /// Wall time spent on the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Create an empty report for a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Record a successful reset.
    pub fn record_success(&mut self, path: impl Into<PathBuf>) {
        self.outcomes.push(FileOutcome {
            path: path.into(),
            outcome: Outcome::Success,
        });
    }

    /// Record a failed reset.
    pub fn record_failure(&mut self, path: impl Into<PathBuf>, failure: ResetFailure) {
        self.outcomes.push(FileOutcome {
            path: path.into(),
            outcome: Outcome::Failure(failure),
        });
    }

    /// Record a directory that was skipped.
    pub fn record_skipped(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.skipped.push(SkippedDirectory {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Number of files attempted.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no files were attempted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of files whose attributes were reset.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Iterate over failed files and their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ResetFailure)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failure(failure) => Some((o.path.as_path(), failure)),
            Outcome::Success => None,
        })
    }

    /// Look up the outcome recorded for a path.
    pub fn outcome_for(&self, path: impl AsRef<Path>) -> Option<&Outcome> {
        let path = path.as_ref();
        self.outcomes
            .iter()
            .find(|o| o.path == path)
            .map(|o| &o.outcome)
    }

    /// Check if every file was reset and nothing was skipped.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped.is_empty()
    }

    /// Get a human-readable summary of the run.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Done: {} files processed, {} failed",
            self.len(),
            self.failed()
        );
        if !self.skipped.is_empty() {
            summary.push_str(&format!(", {} directories skipped", self.skipped.len()));
        }
        summary
    }
}
