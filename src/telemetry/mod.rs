//! Outbound feedback path: OSC encoding, transports, and the
//! streaming-gated emitter

pub mod emitter;
pub mod error;
pub mod message;
pub mod mock;
pub mod transport;
pub mod udp;

pub use emitter::TelemetryEmitter;
pub use error::{TransportError, TransportResult};
pub use message::OscMessage;
pub use mock::MockTransport;
pub use transport::{TelemetryConfig, TelemetryTransport};
pub use udp::UdpTelemetryTransport;
