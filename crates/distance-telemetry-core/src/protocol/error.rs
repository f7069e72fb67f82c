//! Protocol errors

use thiserror::Error;

/// Errors that can occur while configuring the sender or decoding records
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Destination host is empty or whitespace
    #[error("Invalid host: destination host is empty")]
    InvalidHost,

    /// Destination port outside 1..=65535
    #[error("Invalid port: {0} is outside 1..=65535")]
    InvalidPort(i32),

    /// Host name resolution failed
    #[error("Failed to resolve {host}: {source}")]
    Resolve {
        /// Host that failed to resolve
        host: String,
        /// Resolver error
        #[source]
        source: std::io::Error,
    },

    /// Host resolved to no addresses
    #[error("No address found for {0}")]
    NoAddress(String),

    /// Decoded buffer is not exactly one record long
    #[error("Invalid record length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length received
        actual: usize,
    },

    /// Socket setup failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TelemetryError {
    /// Whether this error comes from the endpoint configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TelemetryError::InvalidHost
                | TelemetryError::InvalidPort(_)
                | TelemetryError::Resolve { .. }
                | TelemetryError::NoAddress(_)
        )
    }
}
