//! End-to-end guidance session demonstration
//!
//! This example wires up two tracked tools, runs the distance monitor
//! through a series of pose updates, installs a landmark-anchored local
//! frame, and streams feedback through a mock transport.

use needle_guidance::{
    AxisConvention, DistanceMonitor, DistanceSource, FiducialPoint, GuidanceConfig,
    GuidanceSession, MockTransport, Point3, RigidTransform, SampleFormatter, TrackedTool,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Needle Guidance - Session Demo ===\n");

    // Tool chains are innermost first: tip-to-tool, then tool-to-tracker
    let needle = TrackedTool::new(
        "needle",
        vec![
            RigidTransform::from_translation(Point3::new(0.0, 0.0, 2.5)),
            RigidTransform::from_translation(Point3::new(120.0, 40.0, 60.0)),
        ],
    );
    let pointer = TrackedTool::new(
        "pointer",
        vec![
            RigidTransform::from_translation(Point3::new(0.0, 0.0, 1.0)),
            RigidTransform::from_translation(Point3::new(40.0, 40.0, 60.0)),
        ],
    );

    let monitor = DistanceMonitor::new(
        DistanceSource::Tool(needle),
        DistanceSource::Tool(pointer),
    );

    let transport = MockTransport::new();
    let mut session = GuidanceSession::new(
        GuidanceConfig::default(),
        monitor,
        Box::new(transport.clone()),
    );

    let formatter = SampleFormatter::new();
    session.register_sample_callback(Box::new(move |sample| {
        println!("  callback: {}", SampleFormatter::new().text(sample));
    }));

    // Compute and start monitoring
    let initial = session.arm()?.expect("first arm runs an update");
    println!("Armed. {}", formatter.text(&initial));

    // The pointer approaches the needle; streaming starts midway
    println!("\nApproach with streaming off:");
    session.handle_pose_update(
        "pointer",
        1,
        RigidTransform::from_translation(Point3::new(70.0, 40.0, 60.0)),
    )?;

    println!("\nStreaming on:");
    session.set_streaming(true);
    session.handle_pose_update(
        "pointer",
        1,
        RigidTransform::from_translation(Point3::new(100.0, 40.0, 60.0)),
    )?;
    session.handle_pose_update(
        "pointer",
        1,
        RigidTransform::from_translation(Point3::new(115.0, 40.0, 60.0)),
    )?;

    println!(
        "\nTelemetry: {} datagrams sent to {}, {} errors",
        session.emitter().sent_count(),
        session.emitter().destination(),
        session.emitter().error_count()
    );
    println!("Mock transport captured {} datagrams", transport.sent_count());

    // Landmark-anchored local frame around the entry point
    let entry = FiducialPoint::new("entry", Point3::new(120.0, 40.0, 50.0));
    let target = FiducialPoint::new("target", Point3::new(120.0, 40.0, 90.0));
    let lateral = FiducialPoint::new("lateral", Point3::new(150.0, 40.0, 50.0));

    session.build_local_frame(&entry.position, &target.position, &lateral.position)?;
    let plane = session.guide_plane().expect("frame installed");
    println!(
        "\nGuide plane at ({:.1}, {:.1}, {:.1}), normal ({:.1}, {:.1}, {:.1})",
        plane.origin.x, plane.origin.y, plane.origin.z,
        plane.normal.x, plane.normal.y, plane.normal.z
    );

    if let Some(local) = session.sample_in_local_frame() {
        println!(
            "Needle tip in local frame: ({:.1}, {:.1}, {:.1}) mm",
            local.position_a.x, local.position_a.y, local.position_a.z
        );
    }

    println!(
        "\nAxis convention in use: {:?}",
        AxisConvention::default()
    );
    println!("\nSession demo completed successfully!");
    Ok(())
}
