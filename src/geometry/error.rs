//! Geometric error types and handling

use std::fmt;

/// Error types for vector, transform, and frame computations
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A vector too short to normalize (collinear or coincident landmarks)
    DegenerateVector { length_mm: f64 },
    /// A transform chain with no transforms to resolve a tip from
    EmptyChain,
    /// A 4x4 matrix whose upper-left 3x3 deviates too far from a rotation
    NonRigid { drift: f64 },
    /// A chain index outside the tool's transform chain
    ChainIndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateVector { length_mm } => {
                write!(f, "Degenerate vector: length {:.3e} mm below epsilon", length_mm)
            }
            GeometryError::EmptyChain => {
                write!(f, "Transform chain is empty")
            }
            GeometryError::NonRigid { drift } => {
                write!(f, "Matrix is not a rigid transform: orthonormality drift {:.3e}", drift)
            }
            GeometryError::ChainIndexOutOfRange { index, len } => {
                write!(f, "Chain index {} out of range for chain of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type for geometric operations
pub type GeometryResult<T> = Result<T, GeometryError>;
