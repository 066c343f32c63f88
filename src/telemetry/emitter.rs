//! Streaming-gated feedback emission
//!
//! Formats distance values as OSC messages and hands them to the
//! injected transport. Streaming is off by default and toggled by an
//! external command; while it is off no datagram leaves the emitter.
//! Each send is independent and stateless: a failure is counted and
//! reported upward, and the next update sends again with no backoff.

use log::warn;

use crate::core::Point3;
use crate::telemetry::{
    OscMessage, TelemetryConfig, TelemetryTransport, TransportResult,
};

/// OSC address for the raw tip-to-target distance (mm).
pub const RAW_DISTANCE_ADDRESS: &str = "/dumpOSC/DistanceTipTarget";

/// OSC addresses for the needle tip position components. The spelling
/// matches what the deployed feedback receivers already subscribe to.
pub const TIP_X_ADDRESS: &str = "/dumpOSC/needltip/x";
pub const TIP_Y_ADDRESS: &str = "/dumpOSC/needltip/y";
pub const TIP_Z_ADDRESS: &str = "/dumpOSC/needltip/z";

/// Emits normalized-distance feedback over an injected transport.
pub struct TelemetryEmitter {
    transport: Box<dyn TelemetryTransport>,
    config: TelemetryConfig,
    streaming: bool,
    sent_count: u32,
    error_count: u32,
}

impl TelemetryEmitter {
    /// Streaming starts disabled.
    pub fn new(transport: Box<dyn TelemetryTransport>, config: TelemetryConfig) -> Self {
        Self {
            transport,
            config,
            streaming: false,
            sent_count: 0,
            error_count: 0,
        }
    }

    /// Toggle streaming; returns the previous state. Idempotent.
    pub fn set_streaming(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.streaming, enabled)
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Publish the normalized distance on the configured address.
    ///
    /// A no-op returning `Ok` while streaming is disabled.
    pub fn emit_distance(&mut self, normalized_distance: f64) -> TransportResult<()> {
        if !self.streaming {
            return Ok(());
        }
        let address = self.config.distance_address.clone();
        self.send_float(&address, normalized_distance as f32)
    }

    /// Publish the raw distance in millimetres.
    pub fn emit_raw_distance(&mut self, distance_mm: f64) -> TransportResult<()> {
        if !self.streaming {
            return Ok(());
        }
        self.send_float(RAW_DISTANCE_ADDRESS, distance_mm as f32)
    }

    /// Publish the needle tip position as three component messages.
    pub fn emit_tip_position(&mut self, tip: &Point3) -> TransportResult<()> {
        if !self.streaming {
            return Ok(());
        }
        self.send_float(TIP_X_ADDRESS, tip.x as f32)?;
        self.send_float(TIP_Y_ADDRESS, tip.y as f32)?;
        self.send_float(TIP_Z_ADDRESS, tip.z as f32)
    }

    /// Datagrams successfully handed to the transport.
    pub fn sent_count(&self) -> u32 {
        self.sent_count
    }

    /// Sends that failed at the transport.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn destination(&self) -> String {
        self.transport.destination()
    }

    fn send_float(&mut self, address: &str, value: f32) -> TransportResult<()> {
        let datagram = OscMessage::with_float(address, value)?.encode();
        match self.transport.send(&datagram) {
            Ok(()) => {
                self.sent_count += 1;
                Ok(())
            }
            Err(error) => {
                self.error_count += 1;
                warn!(
                    "telemetry send to {} failed: {}",
                    self.transport.destination(),
                    error
                );
                Err(error)
            }
        }
    }
}
