//! Landmark-anchored local coordinate frames
//!
//! A local frame is built from three fiducials: an origin, a forward
//! point defining the z axis, and an in-plane point defining x. Distances
//! and tip positions can then be expressed independently of the
//! tracker's native frame.

use nalgebra::{Matrix3, RowVector3};
use serde::{Deserialize, Serialize};

use crate::core::{GuidePlane, Point3};
use crate::geometry::vector::{cross, normalize, subtract};
use crate::geometry::{GeometryResult, RigidTransform};

/// Policy for deriving the x axis from the in-plane landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisConvention {
    /// x is normalized straight from `in_plane - origin` without
    /// re-orthogonalization against z. Reproduces the legacy guidance
    /// system exactly: x is only orthogonal to z when the supplied
    /// landmarks already form a right angle.
    #[default]
    Measured,
    /// x is re-derived as `cross(y, z)`, yielding a fully orthonormal
    /// right-handed basis.
    Orthogonalized,
}

/// An orthonormal (or, under `Measured`, near-orthonormal) coordinate
/// system anchored to clinical landmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    origin: Point3,
    x_axis: Point3,
    y_axis: Point3,
    z_axis: Point3,
    to_local: RigidTransform,
}

impl LocalFrame {
    /// Frame origin in world coordinates (mm).
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Unit axes of the frame, expressed in world coordinates.
    pub fn axes(&self) -> (&Point3, &Point3, &Point3) {
        (&self.x_axis, &self.y_axis, &self.z_axis)
    }

    /// World-to-local change-of-basis transform. Maps the frame origin
    /// to `(0, 0, 0)`.
    pub fn to_local(&self) -> &RigidTransform {
        &self.to_local
    }

    /// Express a world-frame point in local coordinates (mm).
    pub fn point_to_local(&self, point: &Point3) -> Point3 {
        self.to_local.apply_to_point(point)
    }

    /// The visualization plane through the origin with the z axis as its
    /// normal, as plain data for an external renderer.
    pub fn guide_plane(&self) -> GuidePlane {
        GuidePlane {
            origin: self.origin,
            normal: self.z_axis,
        }
    }
}

/// Builds a `LocalFrame` from three landmark points.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameBuilder {
    convention: AxisConvention,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the x-axis derivation policy.
    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn convention(&self) -> AxisConvention {
        self.convention
    }

    /// Construct the frame.
    ///
    /// `z = normalize(forward - origin)`, `y = normalize(z x (in_plane -
    /// origin))`, x per the configured convention; the change-of-basis
    /// rotation has rows `(x, y, z)` and translation `-R * origin`.
    ///
    /// Fails with `DegenerateVector` when the landmarks are collinear or
    /// coincident; nothing is constructed in that case.
    pub fn build(
        &self,
        origin: &Point3,
        forward: &Point3,
        in_plane: &Point3,
    ) -> GeometryResult<LocalFrame> {
        let z_axis = normalize(&subtract(forward, origin))?;
        let x_raw = subtract(in_plane, origin);
        let y_axis = normalize(&cross(&z_axis, &x_raw))?;

        let x_axis = match self.convention {
            AxisConvention::Measured => normalize(&x_raw)?,
            AxisConvention::Orthogonalized => cross(&y_axis, &z_axis),
        };

        let rotation = Matrix3::from_rows(&[
            RowVector3::new(x_axis.x, x_axis.y, x_axis.z),
            RowVector3::new(y_axis.x, y_axis.y, y_axis.z),
            RowVector3::new(z_axis.x, z_axis.y, z_axis.z),
        ]);
        let translation = -(rotation * origin);

        Ok(LocalFrame {
            origin: *origin,
            x_axis,
            y_axis,
            z_axis,
            to_local: RigidTransform::from_parts(rotation, translation),
        })
    }
}
