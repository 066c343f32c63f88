//! Tip-to-target distance monitoring

use log::debug;

use crate::core::{
    DistanceSample, FiducialPoint, LineSegment, Point3, DISTANCE_CEILING_MM,
};
use crate::geometry::GeometryResult;
use crate::tracking::TrackedTool;

/// One endpoint of the monitored distance.
///
/// Both deployment variants are supported: two live tool tips, or one
/// tool tip against a fixed fiducial target.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceSource {
    /// A tracked tool; the endpoint is its extracted tip position.
    Tool(TrackedTool),
    /// A static landmark; the endpoint never moves.
    Fiducial(FiducialPoint),
}

impl DistanceSource {
    pub fn name(&self) -> &str {
        match self {
            DistanceSource::Tool(tool) => tool.name(),
            DistanceSource::Fiducial(fiducial) => &fiducial.name,
        }
    }

    /// Current world position of the endpoint (mm).
    pub fn resolve(&self) -> GeometryResult<Point3> {
        match self {
            DistanceSource::Tool(tool) => tool.tip_world_position(),
            DistanceSource::Fiducial(fiducial) => Ok(fiducial.position),
        }
    }

    /// Mutable access to the underlying tool, if this endpoint is one.
    pub fn tool_mut(&mut self) -> Option<&mut TrackedTool> {
        match self {
            DistanceSource::Tool(tool) => Some(tool),
            DistanceSource::Fiducial(_) => None,
        }
    }
}

/// Computes the live distance between two endpoints and keeps the latest
/// sample plus the guide-line geometry for external rendering.
///
/// State is explicit and caller-owned; there are no globals. A failed
/// update leaves the previous sample untouched (last known good).
#[derive(Debug)]
pub struct DistanceMonitor {
    source_a: DistanceSource,
    source_b: DistanceSource,
    last_sample: Option<DistanceSample>,
    sequence: u32,
}

impl DistanceMonitor {
    pub fn new(source_a: DistanceSource, source_b: DistanceSource) -> Self {
        Self {
            source_a,
            source_b,
            last_sample: None,
            sequence: 0,
        }
    }

    /// Re-extract both endpoint positions and produce a fresh sample.
    ///
    /// `normalized = clamp(d / 200.0, 0, 1)`. Never fails on well-formed
    /// chains; an `EmptyChain` from either endpoint aborts the update and
    /// retains the previous sample. A zero distance is a valid contact
    /// state, not an error.
    pub fn update(&mut self) -> GeometryResult<DistanceSample> {
        let position_a = self.source_a.resolve()?;
        let position_b = self.source_b.resolve()?;

        let raw_distance_mm = (position_a - position_b).norm();
        let normalized_distance = (raw_distance_mm / DISTANCE_CEILING_MM).clamp(0.0, 1.0);

        self.sequence = self.sequence.wrapping_add(1);
        let sample = DistanceSample {
            position_a,
            position_b,
            raw_distance_mm,
            normalized_distance,
            line: LineSegment {
                start: position_a,
                end: position_b,
            },
            sequence_number: self.sequence,
        };

        debug!(
            "distance update #{}: {:.2} mm (normalized {:.3})",
            sample.sequence_number, raw_distance_mm, normalized_distance
        );

        self.last_sample = Some(sample.clone());
        Ok(sample)
    }

    /// The most recent successful sample, if any.
    pub fn last_sample(&self) -> Option<&DistanceSample> {
        self.last_sample.as_ref()
    }

    /// Guide-line geometry from the most recent successful sample.
    pub fn line_segment(&self) -> Option<LineSegment> {
        self.last_sample.as_ref().map(|sample| sample.line)
    }

    pub fn source_a(&self) -> &DistanceSource {
        &self.source_a
    }

    pub fn source_b(&self) -> &DistanceSource {
        &self.source_b
    }

    /// Mutable access to the endpoint tool with the given name, for pose
    /// delivery.
    pub fn tool_mut(&mut self, name: &str) -> Option<&mut TrackedTool> {
        if self.source_a.name() == name {
            return self.source_a.tool_mut();
        }
        if self.source_b.name() == name {
            return self.source_b.tool_mut();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryError, RigidTransform};

    fn tool_at(name: &str, position: Point3) -> DistanceSource {
        DistanceSource::Tool(TrackedTool::new(
            name,
            vec![RigidTransform::from_translation(position)],
        ))
    }

    #[test]
    fn test_scenario_100mm_apart() {
        let mut monitor = DistanceMonitor::new(
            tool_at("needle", Point3::new(0.0, 0.0, 0.0)),
            tool_at("pointer", Point3::new(0.0, 0.0, 100.0)),
        );

        let sample = monitor.update().unwrap();
        assert!((sample.raw_distance_mm - 100.0).abs() < 1e-12);
        assert!((sample.normalized_distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point3::new(3.0, -7.0, 12.0);
        let b = Point3::new(-5.0, 20.0, 1.0);

        let mut forward = DistanceMonitor::new(tool_at("needle", a), tool_at("pointer", b));
        let mut reversed = DistanceMonitor::new(tool_at("pointer", b), tool_at("needle", a));

        let d1 = forward.update().unwrap().raw_distance_mm;
        let d2 = reversed.update().unwrap().raw_distance_mm;
        assert!((d1 - d2).abs() < 1e-12);
    }

    #[test]
    fn test_normalization_boundaries() {
        for (distance, expected) in [(0.0, 0.0), (200.0, 1.0), (400.0, 1.0)] {
            let mut monitor = DistanceMonitor::new(
                tool_at("needle", Point3::new(0.0, 0.0, 0.0)),
                tool_at("pointer", Point3::new(0.0, 0.0, distance)),
            );
            let sample = monitor.update().unwrap();
            assert!((sample.normalized_distance - expected).abs() < 1e-12);
            assert!(sample.normalized_distance >= 0.0);
            assert!(sample.normalized_distance <= 1.0);
        }
    }

    #[test]
    fn test_zero_distance_is_contact_not_error() {
        let position = Point3::new(4.0, 4.0, 4.0);
        let mut monitor =
            DistanceMonitor::new(tool_at("needle", position), tool_at("pointer", position));
        let sample = monitor.update().unwrap();
        assert_eq!(sample.raw_distance_mm, 0.0);
        assert_eq!(sample.normalized_distance, 0.0);
    }

    #[test]
    fn test_fiducial_endpoint() {
        let target = FiducialPoint::new("target", Point3::new(0.0, 0.0, 50.0));
        let mut monitor = DistanceMonitor::new(
            tool_at("needle", Point3::new(0.0, 0.0, 0.0)),
            DistanceSource::Fiducial(target),
        );
        let sample = monitor.update().unwrap();
        assert!((sample.raw_distance_mm - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_failed_update_retains_last_sample() {
        let mut monitor = DistanceMonitor::new(
            tool_at("needle", Point3::new(0.0, 0.0, 0.0)),
            tool_at("pointer", Point3::new(0.0, 0.0, 60.0)),
        );
        let first = monitor.update().unwrap();

        // Wipe the pointer chain so the next update fails
        monitor
            .tool_mut("pointer")
            .unwrap()
            .set_chain(Vec::new());
        let result = monitor.update();
        assert!(matches!(result, Err(GeometryError::EmptyChain)));

        // Previous sample survives untouched
        assert_eq!(monitor.last_sample(), Some(&first));
    }

    #[test]
    fn test_line_segment_tracks_endpoints() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 2.0, 0.0);
        let mut monitor = DistanceMonitor::new(tool_at("needle", a), tool_at("pointer", b));
        monitor.update().unwrap();

        let line = monitor.line_segment().unwrap();
        assert_eq!(line.start, a);
        assert_eq!(line.end, b);
    }

    #[test]
    fn test_sequence_number_increments() {
        let mut monitor = DistanceMonitor::new(
            tool_at("needle", Point3::new(0.0, 0.0, 0.0)),
            tool_at("pointer", Point3::new(0.0, 0.0, 10.0)),
        );
        assert_eq!(monitor.update().unwrap().sequence_number, 1);
        assert_eq!(monitor.update().unwrap().sequence_number, 2);
        assert_eq!(monitor.update().unwrap().sequence_number, 3);
    }
}
