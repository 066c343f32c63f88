//! Telemetry path demonstration
//!
//! This example stands up a local UDP receiver, points the emitter at
//! it, and streams a ramp of normalized distances, decoding each OSC
//! datagram as it arrives.

use std::net::UdpSocket;

use needle_guidance::{TelemetryConfig, TelemetryEmitter, UdpTelemetryTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Needle Guidance - Telemetry Demo ===\n");

    // A stand-in for the auditory feedback receiver
    let receiver = UdpSocket::bind(("127.0.0.1", 0))?;
    let port = receiver.local_addr()?.port();
    println!("Feedback receiver listening on 127.0.0.1:{}", port);

    let config = TelemetryConfig::localhost(port);
    let transport = UdpTelemetryTransport::connect(&config)?;
    let mut emitter = TelemetryEmitter::new(Box::new(transport), config);

    // Nothing leaves the emitter until streaming is enabled
    emitter.emit_distance(0.5)?;
    println!("Streaming off: {} datagrams sent", emitter.sent_count());

    emitter.set_streaming(true);
    for step in 0..5 {
        let normalized = 1.0 - step as f64 * 0.2;
        emitter.emit_distance(normalized)?;

        let mut buffer = [0u8; 64];
        let (received, _) = receiver.recv_from(&mut buffer)?;
        let address_end = buffer
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(received);
        let address = std::str::from_utf8(&buffer[..address_end])?;
        let payload = f32::from_be_bytes([
            buffer[received - 4],
            buffer[received - 3],
            buffer[received - 2],
            buffer[received - 1],
        ]);
        println!("  {} -> {:.2} ({} bytes)", address, payload, received);
    }

    println!(
        "\nStreaming on: {} datagrams sent, {} errors",
        emitter.sent_count(),
        emitter.error_count()
    );
    println!("\nTelemetry demo completed successfully!");
    Ok(())
}
