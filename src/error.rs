//! Error types for ShortSQL.

use thiserror::Error;

/// Violations of the where-chain ordering rule.
///
/// A where chain starts with a bare condition and every later condition
/// names the connector that links it to the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The first where condition carried a connector.
    #[error("No connector is allowed on the first where condition (got '{connector}')")]
    UnexpectedConnector { connector: String },

    /// A where condition after the first one had no connector.
    #[error("Connector is required on where condition #{index}")]
    MissingConnector { index: usize },
}

/// The main error type for ShortSQL operations.
#[derive(Debug, Error)]
pub enum ShortSqlError {
    /// Where conditions were appended out of sequence.
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON query description.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML query description or config file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShortSqlError {
    /// Returns true when the error came from the where-chain rule.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

/// Result type alias for ShortSQL operations.
pub type ShortSqlResult<T> = Result<T, ShortSqlError>;
