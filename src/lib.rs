//! Needle Guidance Core
//!
//! Tracks a needle and a pointer tool in 3D space relative to a
//! patient-fixed reference frame, computes the live distance between the
//! instrument tip and a target, exposes guide-line geometry for an
//! external renderer, and optionally streams the normalized distance
//! over UDP for auditory feedback.

pub mod core;
pub mod format;
pub mod geometry;
pub mod telemetry;
pub mod tracking;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    DistanceSample, FiducialPoint, GuidePlane, LineSegment, Point3, DISTANCE_CEILING_MM,
};
pub use format::{FormattedSample, SampleFormatter};
pub use geometry::{
    AxisConvention, FrameBuilder, GeometryError, GeometryResult, LocalFrame, RigidTransform,
};
pub use telemetry::{
    MockTransport, OscMessage, TelemetryConfig, TelemetryEmitter, TelemetryTransport,
    TransportError, TransportResult, UdpTelemetryTransport,
};
pub use tracking::{
    CallbackHandle, DistanceMonitor, DistanceSource, GuidanceError, GuidanceResult,
    GuidanceSession, TrackedTool,
};
pub use utils::{ConfigError, FrameConfig, GuidanceConfig};
