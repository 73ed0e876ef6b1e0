//! Domain entities: core data structures

use std::fmt;

use crate::domain::CourseLineError;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course identifier, e.g. "CSCI100" (uppercase once ingested)
    pub identifier: String,
    /// Free text title, never normalized
    pub title: String,
    /// Prerequisite identifiers in file order
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            prerequisites,
        }
    }

    /// Parse one catalog line: `identifier,title[,prerequisite]*`.
    ///
    /// Identifier and prerequisites are upper-cased, the title is kept verbatim.
    /// Empty prerequisite tokens (`A,Title,,B`) are dropped.
    ///
    /// # Errors
    /// * `CourseLineError::Empty` for an empty line
    /// * `CourseLineError::MissingTitle` when the line has fewer than two fields,
    ///   or ends right after the identifier's comma (`CSCI100,`)
    pub fn parse_line(line: &str) -> Result<Self, CourseLineError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Err(CourseLineError::Empty);
        }

        let mut fields = line.split(',');
        let identifier = match fields.next() {
            Some(field) => normalize_identifier(field),
            None => return Err(CourseLineError::Empty),
        };
        // `ID,` has no title field at all; `ID,,X` has an empty one
        let title = match fields.next() {
            Some("") if fields.clone().next().is_none() => None,
            field => field,
        }
        .ok_or_else(|| CourseLineError::MissingTitle(identifier.clone()))?
        .to_string();

        let prerequisites = fields
            .filter(|token| !token.is_empty())
            .map(normalize_identifier)
            .collect();

        Ok(Self {
            identifier,
            title,
            prerequisites,
        })
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

/// List line: `IDENT, Title`
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.identifier, self.title)
    }
}

/// Upper-case an identifier the way catalog files and user queries are keyed.
///
/// Only ASCII letters change; other bytes pass through untouched.
pub fn normalize_identifier(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
