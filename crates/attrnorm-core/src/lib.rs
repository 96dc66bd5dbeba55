//! Core types for attrnorm.
//!
//! This crate provides the data structures shared by the walker and the
//! command-line front end: run configuration, error types, and the
//! per-file run report.

mod config;
mod error;
mod report;

pub use config::{NormalizeConfig, NormalizeConfigBuilder, NormalizeConfigBuilderError};
pub use error::{FailureKind, NormalizeError, ResetFailure};
pub use report::{FileOutcome, Outcome, RunReport, SkippedDirectory};
