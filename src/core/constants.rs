//! Physical constants and system parameters

/// Reference ceiling for distance normalization (mm).
///
/// Raw tip-to-target distances are divided by this value and clamped to
/// [0, 1] before being streamed as feedback intensity. 200 mm (20 cm) is
/// the calibrated working range of the guidance setup.
pub const DISTANCE_CEILING_MM: f64 = 200.0;

/// Threshold below which a vector is considered degenerate (mm).
pub const VECTOR_EPSILON_MM: f64 = 1e-6;

/// Maximum tolerated deviation of a rotation matrix from orthonormality
/// before composition results are reconditioned.
pub const ORTHONORMALITY_DRIFT_TOLERANCE: f64 = 1e-9;

/// Deviation from orthonormality beyond which a 4x4 matrix is rejected as
/// non-rigid rather than reconditioned.
pub const RIGIDITY_REJECT_TOLERANCE: f64 = 1e-6;
