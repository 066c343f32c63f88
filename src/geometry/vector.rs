//! Basic 3D vector operations
//!
//! Pure functions over world/tracker-frame vectors in millimetres.
//! Normalization is fallible: vectors shorter than the epsilon threshold
//! are rejected instead of producing a garbage direction.

use crate::core::{Point3, VECTOR_EPSILON_MM};
use crate::geometry::{GeometryError, GeometryResult};

/// Difference `a - b`.
pub fn subtract(a: &Point3, b: &Point3) -> Point3 {
    a - b
}

/// Cross product `a x b`.
pub fn cross(a: &Point3, b: &Point3) -> Point3 {
    a.cross(b)
}

/// Unit vector in the direction of `v`.
///
/// Fails with `DegenerateVector` when `|v|` is below `VECTOR_EPSILON_MM`.
pub fn normalize(v: &Point3) -> GeometryResult<Point3> {
    let length = v.norm();
    if length < VECTOR_EPSILON_MM {
        return Err(GeometryError::DegenerateVector { length_mm: length });
    }
    Ok(v / length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract() {
        let a = Point3::new(5.0, 7.0, 9.0);
        let b = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(subtract(&a, &b), Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_cross_basis_vectors() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Point3::new(3.0, -4.0, 12.0);
        let unit = normalize(&v).unwrap();
        assert!((unit.norm() - 1.0).abs() < 1e-9);
        // Direction preserved
        assert!((unit * v.norm() - v).norm() < 1e-9);
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let result = normalize(&Point3::new(0.0, 0.0, 0.0));
        assert!(matches!(result, Err(GeometryError::DegenerateVector { .. })));
    }

    #[test]
    fn test_normalize_subepsilon_vector_fails() {
        let result = normalize(&Point3::new(1e-9, 0.0, 0.0));
        assert!(matches!(result, Err(GeometryError::DegenerateVector { .. })));
    }

    #[test]
    fn test_normalize_tiny_but_valid_vector() {
        let unit = normalize(&Point3::new(1e-3, 0.0, 0.0)).unwrap();
        assert!((unit.norm() - 1.0).abs() < 1e-9);
    }
}
