//! Mock transport for testing and development

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::telemetry::{TelemetryTransport, TransportError, TransportResult};

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    scripted_failures: VecDeque<TransportError>,
    disconnected: bool,
}

/// Recording transport double.
///
/// Clones share state, so a test can keep one handle while the emitter
/// owns another, then assert on what was sent. Failures are scripted
/// per-send rather than randomized, keeping tests deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Datagrams successfully handed to this transport, oldest first.
    pub fn sent_datagrams(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    pub fn clear_sent(&self) {
        self.state.lock().unwrap().sent.clear();
    }

    /// Queue an error for the next send; queued errors are consumed in
    /// order before sends succeed again.
    pub fn fail_next_send(&self, error: TransportError) {
        self.state
            .lock()
            .unwrap()
            .scripted_failures
            .push_back(error);
    }

    /// Simulate connection loss: every send fails until `reconnect`.
    pub fn disconnect(&self) {
        self.state.lock().unwrap().disconnected = true;
    }

    pub fn reconnect(&self) {
        self.state.lock().unwrap().disconnected = false;
    }
}

impl TelemetryTransport for MockTransport {
    fn send(&mut self, datagram: &[u8]) -> TransportResult<()> {
        let mut state = self.state.lock().unwrap();

        if state.disconnected {
            return Err(TransportError::Disconnected);
        }

        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }

        state.sent.push(datagram.to_vec());
        Ok(())
    }

    fn destination(&self) -> String {
        "mock".to_string()
    }

    fn is_ready(&self) -> bool {
        !self.state.lock().unwrap().disconnected
    }
}
