//! Catalog loading service
//!
//! Reads a comma-separated catalog file and feeds each course to the index in file order.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseIndex, CourseLineError, DomainError};
use crate::infrastructure::traits::FileSystem;

/// Outcome of loading one catalog file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Courses inserted into the index
    pub loaded: usize,
    /// Non-empty lines that did not parse into a course
    pub skipped: usize,
}

/// Service for loading catalog files into a `CourseIndex`.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load every well-formed line of `path` into `index`.
    ///
    /// Existing courses are kept; malformed lines are skipped. Bytes that are
    /// not valid UTF-8 are replaced with U+FFFD instead of failing the file.
    /// Nothing is inserted when the file cannot be read.
    #[instrument(level = "debug", skip(self, index))]
    pub fn load(&self, path: &Path, index: &mut CourseIndex) -> ApplicationResult<LoadReport> {
        let bytes = self.fs.read(path).with_path_context("read catalog", path)?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{}: invalid UTF-8 replaced", path.display());
        }

        let mut report = LoadReport::default();
        for (i, line) in content.lines().enumerate() {
            match Course::parse_line(line) {
                Ok(course) => {
                    index.insert(course);
                    report.loaded += 1;
                }
                Err(CourseLineError::Empty) => {}
                Err(source) => {
                    let skipped = DomainError::MalformedLine {
                        line_no: i + 1,
                        source,
                    };
                    debug!("{}: {}", path.display(), skipped);
                    report.skipped += 1;
                }
            }
        }

        info!(
            "loaded {} courses from {} ({} lines skipped)",
            report.loaded,
            path.display(),
            report.skipped
        );
        Ok(report)
    }

    /// Load a catalog into a fresh index.
    pub fn load_new(&self, path: &Path) -> ApplicationResult<(CourseIndex, LoadReport)> {
        let mut index = CourseIndex::new();
        let report = self.load(path, &mut index)?;
        Ok((index, report))
    }
}
