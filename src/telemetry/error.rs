//! Telemetry transport error types

use std::fmt;

/// Error types for the outbound feedback path
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The underlying send failed
    SendFailed { message: String },
    /// The non-blocking socket could not accept the datagram; it was
    /// dropped rather than stalling the update loop
    Saturated { dropped_bytes: usize },
    /// The transport is not connected
    Disconnected,
    /// A local socket could not be created or configured
    SocketUnavailable { message: String },
    /// An OSC address that does not start with '/' or contains NUL
    InvalidAddress { address: String },
    /// A datagram larger than the configured limit
    PayloadTooLarge { size: usize, limit: usize },
    /// Invalid transport configuration
    ConfigurationError { parameter: String, value: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::SendFailed { message } => {
                write!(f, "Telemetry send failed: {}", message)
            }
            TransportError::Saturated { dropped_bytes } => {
                write!(f, "Transport saturated, dropped {} byte datagram", dropped_bytes)
            }
            TransportError::Disconnected => {
                write!(f, "Telemetry transport is disconnected")
            }
            TransportError::SocketUnavailable { message } => {
                write!(f, "Could not set up telemetry socket: {}", message)
            }
            TransportError::InvalidAddress { address } => {
                write!(f, "Invalid OSC address: {:?}", address)
            }
            TransportError::PayloadTooLarge { size, limit } => {
                write!(f, "Datagram of {} bytes exceeds limit of {}", size, limit)
            }
            TransportError::ConfigurationError { parameter, value } => {
                write!(f, "Configuration error: invalid {} = {}", parameter, value)
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Result type for telemetry operations
pub type TransportResult<T> = Result<T, TransportError>;
