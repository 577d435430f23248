//! Error type shared by the solver, the input parser and the CLI.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TspError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The caller supplied something the solver cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A DP lookup missed. Indicates an enumeration-order bug.
    #[error("internal error: {0}")]
    InternalError(String),

    #[error("cancelled after {completed_layers} subset layers")]
    Cancelled { completed_layers: usize },

    #[error("time limit exceeded after {elapsed_ms} ms")]
    TimeLimit { elapsed_ms: u64 },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TspError::invalid_input("no cities").to_string(),
            "invalid input: no cities"
        );
        assert_eq!(
            TspError::Cancelled { completed_layers: 3 }.to_string(),
            "cancelled after 3 subset layers"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TspError = io.into();
        assert!(matches!(err, TspError::Io(_)));
    }
}
