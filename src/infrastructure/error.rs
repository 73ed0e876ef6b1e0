//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add terminal and process I/O.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the menu input or writing the transcript failed mid-session.
    #[error("interactive session on {terminal} failed")]
    Session {
        terminal: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a session error for the standard input/output terminal.
    pub fn session(source: std::io::Error) -> Self {
        Self::Session {
            terminal: "stdin/stdout",
            source,
        }
    }
}
