//! Error types for the report-retrieval boundary

use thiserror::Error;

/// Result type for report parsing
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while reading inclusion reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input is not JSON or does not have the shape of a report
    #[error("malformed inclusion report: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// A report without a device address cannot be linked to anything
    #[error("inclusion report has no device address")]
    MissingDeviceAddress,

    /// Envelope carried an unexpected message type
    #[error("unexpected message type '{msg_type}', expected '{expected}'")]
    UnexpectedMessageType {
        msg_type: String,
        expected: &'static str,
    },
}

impl From<serde_json::Error> for ReportError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed { source }
    }
}
