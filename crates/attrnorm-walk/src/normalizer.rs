//! JWalk-based attribute normalizer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::{debug, info, warn};

use attrnorm_core::{NormalizeConfig, NormalizeError, ResetFailure, RunReport};

use crate::attributes::{AttributeReset, PlatformAttributes};

/// Walks a directory tree and resets every file's attributes.
///
/// The walk is serial and visits entries in file-name order, so the report
/// order is stable between runs over the same tree.
pub struct Normalizer<R = PlatformAttributes> {
    backend: R,
}

impl Normalizer {
    /// Create a normalizer using the platform attribute backend.
    pub fn new() -> Self {
        Self {
            backend: PlatformAttributes,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AttributeReset> Normalizer<R> {
    /// Create a normalizer with a custom attribute backend.
    pub fn with_backend(backend: R) -> Self {
        Self { backend }
    }

    /// Reset the attributes of every file under `config.root`.
    ///
    /// Per-file failures are recorded in the report and never abort the
    /// walk. A missing root fails before anything is touched; a directory
    /// that cannot be read aborts the walk with the partial report attached,
    /// unless `skip_unreadable_dirs` is set and it is not the root.
    pub fn normalize(&self, config: &NormalizeConfig) -> Result<RunReport, NormalizeError> {
        let start = Instant::now();
        let root = config.root.as_path();

        match fs::metadata(root) {
            Ok(metadata) if metadata.is_dir() => {}
            _ => {
                return Err(NormalizeError::RootNotFound {
                    path: root.to_path_buf(),
                });
            }
        }

        info!(root = %root.display(), "normalizing file attributes");

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false);

        let mut report = RunReport::new(root);

        for entry_result in walker {
            // jwalk reports a failed read_dir on the directory's own entry
            let (fallback_path, err) = match entry_result {
                Ok(mut entry) => match entry.read_children_error.take() {
                    Some(err) => (entry.path(), err),
                    None => {
                        if is_file_entry(&entry) {
                            self.reset_file(entry.path(), &mut report);
                        }
                        continue;
                    }
                },
                Err(err) => (root.to_path_buf(), err),
            };

            let path = err.path().map(Path::to_path_buf).unwrap_or(fallback_path);
            let message = err.to_string();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::other(message.clone()));

            if config.skip_unreadable_dirs && path != root {
                warn!(path = %path.display(), error = %source, "skipping unreadable directory");
                report.record_skipped(path, message);
                continue;
            }

            report.elapsed = start.elapsed();
            warn!(
                path = %path.display(),
                error = %source,
                processed = report.len(),
                "directory walk aborted"
            );
            return Err(NormalizeError::enumeration(path, source, report));
        }

        report.elapsed = start.elapsed();

        info!(
            files = report.len(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "normalization complete"
        );

        Ok(report)
    }

    /// Reset one file and record the outcome.
    fn reset_file(&self, path: PathBuf, report: &mut RunReport) {
        match self.backend.reset(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "attributes reset");
                report.record_success(path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to reset attributes");
                report.record_failure(path, ResetFailure::from_io(&err));
            }
        }
    }
}

/// Reset the attributes of every file under `root` with default settings.
pub fn normalize(root: impl Into<PathBuf>) -> Result<RunReport, NormalizeError> {
    Normalizer::new().normalize(&NormalizeConfig::new(root))
}

/// Whether a walk entry is a file to reset.
///
/// Anything that is not a directory counts. Symlinks are resolved so that
/// links to directories are neither reset nor descended; broken links are
/// kept and fail at reset time.
fn is_file_entry(entry: &DirEntry<((), ())>) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        return !fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
    }
    true
}
