//! Error types for the critpath crate

use std::path::PathBuf;

use thiserror::Error;

use crate::artifact::ArtifactKind;

/// Main error type for the critpath crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("{artifact} artifact not found at {}", path.display())]
    MissingArtifact { artifact: ArtifactKind, path: PathBuf },

    #[error(
        "malformed {artifact} row at line {line} in '{origin}': expected {expected} fields, got {got}"
    )]
    MalformedRow {
        artifact: ArtifactKind,
        origin: String,
        line: u64,
        expected: usize,
        got: usize,
    },

    #[error("invalid {field} '{value}' at line {line} of {artifact} artifact '{origin}'")]
    InvalidField {
        artifact: ArtifactKind,
        origin: String,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("state '{state}' is terminal and has no next states")]
    TerminalState { state: String },

    #[error(
        "agent {agent} has no learned value for any of the {successors} next states of '{state}'"
    )]
    UnreachableValue {
        agent: String,
        state: String,
        successors: usize,
    },

    #[error("walk exceeded {limit} steps without reaching a terminal state (stopped at '{state}')")]
    StepLimitExceeded { limit: usize, state: String },

    #[error("invalid game side code {code} (expected 1 or 2)")]
    InvalidSide { code: u8 },

    #[error("unknown agent kind '{input}'. Expected one of: {expected}")]
    ParseAgentKind { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for failures raised while reading an artifact: missing files,
    /// unreadable content and rows that do not match the expected shape.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::MissingArtifact { .. }
                | Error::MalformedRow { .. }
                | Error::InvalidField { .. }
                | Error::Csv(_)
                | Error::Io { .. }
        )
    }

    /// True when a terminal state was handed to `best_next_state`.
    pub fn is_precondition_error(&self) -> bool {
        matches!(self, Error::TerminalState { .. })
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_are_classified() {
        let missing = Error::MissingArtifact {
            artifact: ArtifactKind::Transitions,
            path: PathBuf::from("transitions.csv"),
        };
        assert!(missing.is_load_error());
        assert!(!missing.is_precondition_error());

        let terminal = Error::TerminalState {
            state: "BAUAAAAAAA==".to_string(),
        };
        assert!(terminal.is_precondition_error());
        assert!(!terminal.is_load_error());
    }

    #[test]
    fn malformed_row_message_names_the_shape() {
        let err = Error::MalformedRow {
            artifact: ArtifactKind::Values,
            origin: "a.csv".to_string(),
            line: 3,
            expected: 5,
            got: 4,
        };
        assert_eq!(
            err.to_string(),
            "malformed value row at line 3 in 'a.csv': expected 5 fields, got 4"
        );
    }
}
