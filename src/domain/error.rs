//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Why a catalog line did not produce a course.
///
/// The loader skips such lines and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseLineError {
    #[error("empty line")]
    Empty,

    #[error("missing title for course: {0}")]
    MissingTitle(String),
}

/// Domain errors represent business logic violations.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed catalog line {line_no}: {source}")]
    MalformedLine {
        line_no: usize,
        #[source]
        source: CourseLineError,
    },
}
