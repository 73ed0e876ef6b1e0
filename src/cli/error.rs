//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("course not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::NotFound(_) => crate::exitcode::NOT_FOUND,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } | InfraError::Session { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                },
            },
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn given_broken_session_when_mapping_exit_code_then_reports_io_error() {
        let err = CliError::from(InfraError::session(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "closed",
        )));

        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
        assert_eq!(err.to_string(), "interactive session on stdin/stdout failed");
    }

    #[test]
    fn given_each_error_kind_when_mapping_exit_code_then_uses_sysexits() {
        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        let missing = CliError::from(ApplicationError::OperationFailed {
            context: "read catalog x.csv".into(),
            source: Box::new(io::Error::from(io::ErrorKind::NotFound)),
        });

        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);
        assert_eq!(CliError::NotFound("CSCI999".into()).exit_code(), crate::exitcode::NOT_FOUND);
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
    }
}
