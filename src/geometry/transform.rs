//! Rigid transforms and transform-chain composition
//!
//! A `RigidTransform` maps points from a child frame into its parent frame
//! (rotation followed by translation). Tool pose chains are ordered
//! innermost first, tip-side to world-side, and folded left to right, so
//! the composed transform takes the tip-local origin all the way to world
//! coordinates.

use nalgebra::{Matrix3, Matrix4, RowVector3};

use crate::core::{Point3, ORTHONORMALITY_DRIFT_TOLERANCE, RIGIDITY_REJECT_TOLERANCE};
use crate::geometry::{GeometryError, GeometryResult};

/// Rotation + translation mapping a child frame into its parent frame.
///
/// The rotation is expected to be orthonormal for all transforms used in
/// tip extraction; composition reconditions accumulated floating-point
/// drift. Each instance is an immutable snapshot of a pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    rotation: Matrix3<f64>,
    translation: Point3,
}

impl RigidTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Point3::zeros(),
        }
    }

    /// Build from a rotation matrix and a translation vector, as given.
    ///
    /// The caller is responsible for supplying an orthonormal rotation
    /// where one is required; no reconditioning happens here.
    pub fn from_parts(rotation: Matrix3<f64>, translation: Point3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pure translation.
    pub fn from_translation(translation: Point3) -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation,
        }
    }

    /// Extract rotation and translation from a 4x4 homogeneous matrix.
    ///
    /// Rejects matrices whose upper-left 3x3 deviates from orthonormality
    /// by more than `RIGIDITY_REJECT_TOLERANCE` (scale or shear present),
    /// and matrices whose bottom row is not `(0, 0, 0, 1)`.
    pub fn from_homogeneous(matrix: &Matrix4<f64>) -> GeometryResult<Self> {
        let bottom = matrix.row(3);
        let bottom_drift = (bottom[0].abs())
            .max(bottom[1].abs())
            .max(bottom[2].abs())
            .max((bottom[3] - 1.0).abs());
        if bottom_drift > RIGIDITY_REJECT_TOLERANCE {
            return Err(GeometryError::NonRigid {
                drift: bottom_drift,
            });
        }

        let rotation = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let drift = orthonormality_drift(&rotation);
        if drift > RIGIDITY_REJECT_TOLERANCE {
            return Err(GeometryError::NonRigid { drift });
        }

        let translation = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        Ok(Self {
            rotation,
            translation,
        })
    }

    /// The 4x4 homogeneous form of this transform.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        matrix
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&self.translation);
        matrix
    }

    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    pub fn translation(&self) -> &Point3 {
        &self.translation
    }

    /// Compose `self ∘ inner`: the result maps through `inner` first.
    ///
    /// The product rotation is reconditioned when accumulated drift from
    /// orthonormality exceeds `ORTHONORMALITY_DRIFT_TOLERANCE`.
    pub fn compose(&self, inner: &RigidTransform) -> RigidTransform {
        let mut rotation = self.rotation * inner.rotation;
        if orthonormality_drift(&rotation) > ORTHONORMALITY_DRIFT_TOLERANCE {
            rotation = reorthonormalize(&rotation);
        }
        RigidTransform {
            rotation,
            translation: self.rotation * inner.translation + self.translation,
        }
    }

    /// The inverse transform: maps parent-frame points back into the
    /// child frame. Valid only for orthonormal rotations.
    pub fn inverse(&self) -> RigidTransform {
        let rotation = self.rotation.transpose();
        RigidTransform {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    /// Map a child-frame point into the parent frame.
    pub fn apply_to_point(&self, point: &Point3) -> Point3 {
        self.rotation * point + self.translation
    }
}

/// Fold an innermost-first chain into a single child-to-world transform.
///
/// `world = T_n ∘ T_{n-1} ∘ … ∘ T_1`. Fails with `EmptyChain` when the
/// chain holds no transforms.
pub fn compose_chain(chain: &[RigidTransform]) -> GeometryResult<RigidTransform> {
    let mut iter = chain.iter();
    let first = iter.next().ok_or(GeometryError::EmptyChain)?;
    let mut composed = *first;
    for transform in iter {
        composed = transform.compose(&composed);
    }
    Ok(composed)
}

/// World position of the tip-local origin for an innermost-first chain.
///
/// Equal to the translation component of the fully composed transform.
/// Recomputed from the live chain on every call; poses may have mutated
/// since the last one.
pub fn extract_tip_world_position(chain: &[RigidTransform]) -> GeometryResult<Point3> {
    Ok(*compose_chain(chain)?.translation())
}

/// Maximum absolute deviation of `R^T R` from the identity.
fn orthonormality_drift(rotation: &Matrix3<f64>) -> f64 {
    (rotation.transpose() * rotation - Matrix3::identity()).amax()
}

/// Gram-Schmidt on the rows; the third row is rebuilt from the cross
/// product so the result stays a proper rotation.
fn reorthonormalize(rotation: &Matrix3<f64>) -> Matrix3<f64> {
    let r0: Point3 = rotation.row(0).transpose();
    let r1: Point3 = rotation.row(1).transpose();

    let u0 = r0.normalize();
    let u1 = (r1 - u0 * r1.dot(&u0)).normalize();
    let u2 = u0.cross(&u1);

    Matrix3::from_rows(&[
        RowVector3::new(u0.x, u0.y, u0.z),
        RowVector3::new(u1.x, u1.y, u1.z),
        RowVector3::new(u2.x, u2.y, u2.z),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn rotation_z(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(RigidTransform::identity().apply_to_point(&p), p);
    }

    #[test]
    fn test_compose_matches_homogeneous_product() {
        let a = RigidTransform::from_parts(rotation_z(0.3), Point3::new(1.0, -2.0, 3.0));
        let b = RigidTransform::from_parts(rotation_z(-1.1), Point3::new(4.0, 0.5, -6.0));

        let composed = a.compose(&b);
        let expected = a.to_homogeneous() * b.to_homogeneous();

        assert!((composed.to_homogeneous() - expected).amax() < 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = RigidTransform::from_parts(rotation_z(0.7), Point3::new(10.0, -5.0, 2.0));
        let p = Point3::new(3.0, 1.0, -4.0);

        let round_trip = t.inverse().apply_to_point(&t.apply_to_point(&p));
        assert!((round_trip - p).norm() < 1e-12);
    }

    #[test]
    fn test_chain_extraction_equals_composed_translation() {
        let chain = vec![
            RigidTransform::from_parts(rotation_z(FRAC_PI_2), Point3::new(0.0, 0.0, 10.0)),
            RigidTransform::from_translation(Point3::new(5.0, 0.0, 0.0)),
            RigidTransform::from_parts(rotation_z(-0.4), Point3::new(-1.0, 2.0, 0.0)),
        ];

        let tip = extract_tip_world_position(&chain).unwrap();
        let composed = compose_chain(&chain).unwrap();

        // Tip is the composed transform applied to the tip-local origin
        assert!((tip - composed.apply_to_point(&Point3::zeros())).norm() < 1e-12);
    }

    #[test]
    fn test_chain_composition_is_associative() {
        let a = RigidTransform::from_parts(rotation_z(0.2), Point3::new(1.0, 0.0, 0.0));
        let b = RigidTransform::from_parts(rotation_z(1.3), Point3::new(0.0, 7.0, -2.0));

        // Extracting from [a, b] equals extracting from [a] then mapping
        // through the parent transform b.
        let from_pair = extract_tip_world_position(&[a, b]).unwrap();
        let from_single = extract_tip_world_position(&[a]).unwrap();
        let via_parent = b.apply_to_point(&from_single);

        assert!((from_pair - via_parent).norm() < 1e-12);
    }

    #[test]
    fn test_empty_chain_fails() {
        assert!(matches!(
            extract_tip_world_position(&[]),
            Err(GeometryError::EmptyChain)
        ));
    }

    #[test]
    fn test_translation_only_chain() {
        let chain = vec![
            RigidTransform::from_translation(Point3::new(1.0, 2.0, 3.0)),
            RigidTransform::from_translation(Point3::new(10.0, 0.0, 0.0)),
        ];
        let tip = extract_tip_world_position(&chain).unwrap();
        assert!((tip - Point3::new(11.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_long_composition_stays_orthonormal() {
        let step = RigidTransform::from_parts(rotation_z(0.013), Point3::new(0.1, 0.0, 0.0));
        let mut composed = RigidTransform::identity();
        for _ in 0..10_000 {
            composed = step.compose(&composed);
        }
        assert!(orthonormality_drift(composed.rotation()) < 1e-8);
    }

    #[test]
    fn test_from_homogeneous_accepts_rigid() {
        let t = RigidTransform::from_parts(rotation_z(0.9), Point3::new(2.0, 3.0, 4.0));
        let recovered = RigidTransform::from_homogeneous(&t.to_homogeneous()).unwrap();
        assert!((recovered.to_homogeneous() - t.to_homogeneous()).amax() < 1e-12);
    }

    #[test]
    fn test_from_homogeneous_rejects_scale() {
        let mut scaled = Matrix4::identity();
        scaled[(0, 0)] = 2.0;
        assert!(matches!(
            RigidTransform::from_homogeneous(&scaled),
            Err(GeometryError::NonRigid { .. })
        ));
    }

    #[test]
    fn test_from_homogeneous_rejects_projective_row() {
        let mut projective = Matrix4::identity();
        projective[(3, 0)] = 0.1;
        assert!(matches!(
            RigidTransform::from_homogeneous(&projective),
            Err(GeometryError::NonRigid { .. })
        ));
    }
}
