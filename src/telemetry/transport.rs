//! Transport interface trait and configuration

use serde::{Deserialize, Serialize};

use crate::telemetry::{TransportError, TransportResult};

/// Abstraction over the outbound datagram path.
///
/// Implementations are send-and-forget: no acknowledgement, no retry.
/// A failed send is reported upward and the next one proceeds
/// independently. `Send` is required so a multi-threaded host can own
/// the session behind a mutex.
pub trait TelemetryTransport: Send {
    /// Hand one encoded datagram to the transport.
    fn send(&mut self, datagram: &[u8]) -> TransportResult<()>;

    /// Human-readable destination, for logs and status displays.
    fn destination(&self) -> String;

    /// Whether the transport can currently accept datagrams.
    fn is_ready(&self) -> bool;
}

/// Telemetry destination and message parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Feedback receiver host
    pub host: String,
    /// Feedback receiver UDP port
    pub port: u16,
    /// OSC address the normalized distance is published on
    pub distance_address: String,
    /// Upper bound on a single datagram (bytes)
    pub max_datagram_bytes: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            host: "192.168.0.68".to_string(),
            port: 7400,
            distance_address: "/dumpOSC/0/0".to_string(),
            max_datagram_bytes: 512,
        }
    }
}

impl TelemetryConfig {
    /// Destination on the local machine, for development setups.
    pub fn localhost(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TransportResult<()> {
        if self.host.is_empty() {
            return Err(TransportError::ConfigurationError {
                parameter: "host".to_string(),
                value: "<empty>".to_string(),
            });
        }

        if self.port == 0 {
            return Err(TransportError::ConfigurationError {
                parameter: "port".to_string(),
                value: self.port.to_string(),
            });
        }

        if !self.distance_address.starts_with('/') {
            return Err(TransportError::ConfigurationError {
                parameter: "distance_address".to_string(),
                value: self.distance_address.clone(),
            });
        }

        if self.max_datagram_bytes == 0 || self.max_datagram_bytes > 4096 {
            return Err(TransportError::ConfigurationError {
                parameter: "max_datagram_bytes".to_string(),
                value: self.max_datagram_bytes.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TelemetryConfig::default().validate().is_ok());
        assert_eq!(TelemetryConfig::default().distance_address, "/dumpOSC/0/0");
    }

    #[test]
    fn test_localhost_config() {
        let config = TelemetryConfig::localhost(9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = TelemetryConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TransportError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_bad_address_rejected() {
        let config = TelemetryConfig {
            distance_address: "dumpOSC/0/0".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_datagram_limit_rejected() {
        let config = TelemetryConfig {
            max_datagram_bytes: 65536,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
