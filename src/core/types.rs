//! Core data types for the guidance system

use nalgebra::Vector3;

/// 3D point or direction in millimetres. The coordinate frame (world,
/// tracker, or local) is stated by each function that consumes one.
pub type Point3 = Vector3<f64>;

/// A named, persistent landmark point in world coordinates.
///
/// Fiducials are placed once at setup (target, surface entry, axis
/// reference) and are not expected to move during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct FiducialPoint {
    pub name: String,
    /// Position in world coordinates (mm).
    pub position: Point3,
}

impl FiducialPoint {
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Two endpoints of the guide line drawn between the monitored tips (mm,
/// world frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point3,
    pub end: Point3,
}

impl LineSegment {
    /// Length of the segment (mm).
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// A plane through a landmark, exposed as plain data for an external
/// renderer. The core does no drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidePlane {
    /// Point on the plane (mm, world frame).
    pub origin: Point3,
    /// Unit normal of the plane (world frame).
    pub normal: Point3,
}

/// One distance measurement between the two monitored endpoints.
///
/// Recomputed on every pose update; ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSample {
    /// First endpoint position (mm, world frame).
    pub position_a: Point3,
    /// Second endpoint position (mm, world frame).
    pub position_b: Point3,
    /// Euclidean distance between the endpoints (mm). Never negative;
    /// zero is a valid contact state.
    pub raw_distance_mm: f64,
    /// Distance divided by the 200 mm ceiling, clamped to [0, 1].
    pub normalized_distance: f64,
    /// Guide line between the endpoints for external rendering.
    pub line: LineSegment,
    /// Monotonically increasing update counter.
    pub sequence_number: u32,
}
