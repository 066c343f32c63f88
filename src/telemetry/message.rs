//! OSC datagram encoding
//!
//! The feedback consumer speaks OSC: an address pattern, a type-tag
//! string, then big-endian arguments, each section padded with NULs to a
//! four-byte boundary. Only the single-float message the guidance loop
//! emits is implemented here.

use crate::telemetry::{TransportError, TransportResult};

/// An address-tagged single-float OSC message.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    address: String,
    value: f32,
}

impl OscMessage {
    /// Create a message carrying one float argument.
    ///
    /// The address must start with `/` and contain no NUL bytes.
    pub fn with_float(address: &str, value: f32) -> TransportResult<Self> {
        if !address.starts_with('/') || address.contains('\0') {
            return Err(TransportError::InvalidAddress {
                address: address.to_string(),
            });
        }
        Ok(Self {
            address: address.to_string(),
            value,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Serialize to OSC wire bytes: padded address, `,f` type tag,
    /// big-endian float.
    pub fn encode(&self) -> Vec<u8> {
        let address_len = padded_len(self.address.len());
        let mut datagram = Vec::with_capacity(address_len + 8);

        datagram.extend_from_slice(self.address.as_bytes());
        datagram.resize(address_len, 0);
        datagram.extend_from_slice(b",f\0\0");
        datagram.extend_from_slice(&self.value.to_be_bytes());
        datagram
    }
}

/// OSC strings are NUL-terminated, then padded to a four-byte boundary.
fn padded_len(len: usize) -> usize {
    (len + 4) & !3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_distance_message() {
        let message = OscMessage::with_float("/dumpOSC/0/0", 0.5).unwrap();
        let datagram = message.encode();

        // 12-byte address pads to 16, 4 bytes of type tag, 4 of payload
        assert_eq!(datagram.len(), 24);
        assert_eq!(&datagram[..12], b"/dumpOSC/0/0");
        assert_eq!(&datagram[12..16], &[0, 0, 0, 0]);
        assert_eq!(&datagram[16..20], b",f\0\0");
        assert_eq!(&datagram[20..24], &0.5_f32.to_be_bytes());
    }

    #[test]
    fn test_padding_always_terminates_address() {
        // A 7-byte address pads to 8: one NUL terminator
        let datagram = OscMessage::with_float("/a/b/cd", 1.0).unwrap().encode();
        assert_eq!(datagram[7], 0);
        assert_eq!(&datagram[8..12], b",f\0\0");

        // An 8-byte address pads to 12: OSC strings always gain at least
        // one NUL
        let datagram = OscMessage::with_float("/a/b/cde", 1.0).unwrap().encode();
        assert_eq!(&datagram[8..12], &[0, 0, 0, 0]);
        assert_eq!(&datagram[12..16], b",f\0\0");
    }

    #[test]
    fn test_rejects_address_without_slash() {
        assert!(matches!(
            OscMessage::with_float("dumpOSC", 0.0),
            Err(TransportError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_embedded_nul() {
        assert!(matches!(
            OscMessage::with_float("/dump\0OSC", 0.0),
            Err(TransportError::InvalidAddress { .. })
        ));
    }
}
