//! Attribute normalization walker for attrnorm.
//!
//! This crate walks a directory tree with jwalk and resets every file it
//! finds to the platform's normal attributes (no read-only, hidden, system
//! or archive flags), collecting one outcome per file.
//!
//! # Example
//!
//! ```rust,no_run
//! use attrnorm_walk::{NormalizeConfig, Normalizer};
//!
//! let config = NormalizeConfig::new("/path/to/solution");
//! let report = Normalizer::new().normalize(&config).unwrap();
//!
//! println!("{}", report.summary());
//! for (path, failure) in report.failures() {
//!     println!("{}: {failure}", path.display());
//! }
//! ```
//!
//! # Failures
//!
//! A file that cannot be reset is recorded and the walk moves on. Only a
//! missing root or an unreadable directory stops the run; in the second
//! case the outcomes gathered so far travel with the error.

mod attributes;
mod normalizer;

pub use attributes::{AttributeReset, PlatformAttributes, is_normal};
pub use normalizer::{Normalizer, normalize};

// Re-export core types for convenience
pub use attrnorm_core::{
    FailureKind, FileOutcome, NormalizeConfig, NormalizeError, Outcome, ResetFailure, RunReport,
    SkippedDirectory,
};
