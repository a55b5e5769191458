// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::Vector4;

/// Tolerance for plane-distance and parallel-ray checks.
pub const EPSILON: f64 = 1e-8;

/// Relative tolerance used when comparing whole vectors.
pub const VECTOR_TOLERANCE: f64 = 1e-12;

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Component-wise approximate equality of homogeneous vectors
pub fn vectors_approx_eq(a: &Vector4<f64>, b: &Vector4<f64>) -> bool {
    a.relative_eq(b, VECTOR_TOLERANCE, VECTOR_TOLERANCE)
}

/// Lift a 3D point into homogeneous coordinates (w = 1)
pub fn point(x: f64, y: f64, z: f64) -> Vector4<f64> {
    Vector4::new(x, y, z, 1.0)
}

/// Lift a 3D direction into homogeneous coordinates (w = 0)
pub fn direction(x: f64, y: f64, z: f64) -> Vector4<f64> {
    Vector4::new(x, y, z, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-9, EPSILON));
        assert!(!approx_eq(1.0, 1.0001, EPSILON));
        assert!(!approx_eq(f64::NAN, 0.0, EPSILON));
    }

    #[test]
    fn test_vectors_approx_eq() {
        let a = point(1.0, 2.0, 3.0);
        assert!(vectors_approx_eq(&a, &point(1.0, 2.0, 3.0 + 1e-15)));
        assert!(!vectors_approx_eq(&a, &point(1.0, 2.0, 3.0001)));
        assert!(vectors_approx_eq(&Vector4::zeros(), &Vector4::zeros()));
    }

    #[test]
    fn test_homogeneous_w() {
        assert_eq!(point(1.0, 2.0, 3.0).w, 1.0);
        assert_eq!(direction(1.0, 2.0, 3.0).w, 0.0);
    }
}
