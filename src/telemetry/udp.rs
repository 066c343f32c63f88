//! Non-blocking UDP transport
//!
//! Connectionless, send-and-forget datagrams to the fixed feedback
//! receiver. The socket is non-blocking so a slow or unreachable
//! endpoint can never stall the pose-processing loop; a datagram the
//! kernel will not take right now is dropped and reported.

use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::telemetry::{TelemetryConfig, TelemetryTransport, TransportError, TransportResult};

/// UDP implementation of `TelemetryTransport`.
pub struct UdpTelemetryTransport {
    socket: UdpSocket,
    destination: SocketAddr,
    max_datagram_bytes: usize,
}

impl UdpTelemetryTransport {
    /// Bind an ephemeral local socket aimed at the configured receiver.
    pub fn connect(config: &TelemetryConfig) -> TransportResult<Self> {
        config.validate()?;

        let destination = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| TransportError::ConfigurationError {
                parameter: "host".to_string(),
                value: format!("{}: {}", config.host, e),
            })?
            .next()
            .ok_or_else(|| TransportError::ConfigurationError {
                parameter: "host".to_string(),
                value: config.host.clone(),
            })?;

        let socket = UdpSocket::bind(("0.0.0.0", 0)).map_err(|e| {
            TransportError::SocketUnavailable {
                message: e.to_string(),
            }
        })?;
        socket
            .set_nonblocking(true)
            .map_err(|e| TransportError::SocketUnavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            socket,
            destination,
            max_datagram_bytes: config.max_datagram_bytes,
        })
    }
}

impl TelemetryTransport for UdpTelemetryTransport {
    fn send(&mut self, datagram: &[u8]) -> TransportResult<()> {
        if datagram.len() > self.max_datagram_bytes {
            return Err(TransportError::PayloadTooLarge {
                size: datagram.len(),
                limit: self.max_datagram_bytes,
            });
        }

        match self.socket.send_to(datagram, self.destination) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Err(TransportError::Saturated {
                dropped_bytes: datagram.len(),
            }),
            Err(e) => Err(TransportError::SendFailed {
                message: e.to_string(),
            }),
        }
    }

    fn destination(&self) -> String {
        self.destination.to_string()
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_localhost() {
        let transport = UdpTelemetryTransport::connect(&TelemetryConfig::localhost(7400)).unwrap();
        assert!(transport.is_ready());
        assert_eq!(transport.destination(), "127.0.0.1:7400");
    }

    #[test]
    fn test_send_to_bound_receiver() {
        let receiver = UdpSocket::bind(("127.0.0.1", 0)).unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport =
            UdpTelemetryTransport::connect(&TelemetryConfig::localhost(port)).unwrap();
        transport.send(b"/test\0\0\0,f\0\0\0\0\0\0").unwrap();

        let mut buffer = [0u8; 64];
        let (received, _) = receiver.recv_from(&mut buffer).unwrap();
        assert_eq!(received, 16);
    }

    #[test]
    fn test_oversized_datagram_rejected() {
        let mut transport =
            UdpTelemetryTransport::connect(&TelemetryConfig::localhost(7400)).unwrap();
        let oversized = vec![0u8; 1024];
        assert!(matches!(
            transport.send(&oversized),
            Err(TransportError::PayloadTooLarge { size: 1024, limit: 512 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TelemetryConfig {
            port: 0,
            ..Default::default()
        };
        assert!(UdpTelemetryTransport::connect(&config).is_err());
    }
}
