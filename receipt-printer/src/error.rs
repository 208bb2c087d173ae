//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// QR code payload exceeds what a single symbol can store
    #[error("Payload too long: {len} bytes (max {max})")]
    PayloadTooLong { len: usize, max: usize },

    /// Parameter the wire format cannot carry
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Write to the transport failed
    ///
    /// `written` is the number of bytes of the current operation that
    /// reached the transport before the failure.
    #[error("Transport write failed after {written} bytes: {source}")]
    TransportWrite {
        written: usize,
        #[source]
        source: std::io::Error,
    },

    /// Read from the transport failed
    #[error("Transport read failed: {0}")]
    TransportRead(#[source] std::io::Error),

    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
