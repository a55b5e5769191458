// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Affine transform construction
//!
//! Transforms compose as `T · R · S`: a vertex is scaled first, then rotated,
//! then translated. Normals are directions, so they skip the translation and
//! go through the inverse-transpose of `R · S` instead, which keeps them
//! perpendicular to the surface under non-uniform scale.

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Identity with the translation column set to `offset`
pub fn translation(offset: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(offset)
}

/// Axis-angle rotation; `axis` need not be unit length but must be non-zero
pub fn rotation(axis: &Vector3<f64>, angle_radians: f64) -> Matrix4<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_radians).to_homogeneous()
}

/// Identity with the diagonal set to `factors`; zero and negative factors are allowed
pub fn scale(factors: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(factors)
}

/// Position matrix plus the matching normal matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    position: Matrix4<f64>,
    normal: Matrix4<f64>,
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            position: Matrix4::identity(),
            normal: Matrix4::identity(),
        }
    }

    /// Compose `T · R · S` and derive the normal matrix `(R · S)⁻ᵀ`.
    ///
    /// A singular `R · S` (some scale factor is zero) has no inverse; the normal
    /// matrix then falls back to `R · S` itself and flattened normals are
    /// renormalized or left at zero by the vertex transform.
    pub fn compose(
        translation: &Matrix4<f64>,
        rotation: &Matrix4<f64>,
        scale: &Matrix4<f64>,
    ) -> Self {
        let linear = rotation * scale;
        let normal = linear
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);

        Self {
            position: translation * linear,
            normal,
        }
    }

    pub fn position_matrix(&self) -> &Matrix4<f64> {
        &self.position
    }

    pub fn normal_matrix(&self) -> &Matrix4<f64> {
        &self.normal
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Builder collecting user-level transform parameters
///
/// Every unset component stays the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformBuilder {
    scale: Option<Vector3<f64>>,
    rotation: Option<(Vector3<f64>, f64)>,
    translation: Option<Vector3<f64>>,
}

impl TransformBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, factors: Vector3<f64>) -> Self {
        self.scale = Some(factors);
        self
    }

    pub fn rotate(mut self, axis: Vector3<f64>, angle_radians: f64) -> Self {
        self.rotation = Some((axis, angle_radians));
        self
    }

    pub fn translate(mut self, offset: Vector3<f64>) -> Self {
        self.translation = Some(offset);
        self
    }

    /// Whether any component was set
    pub fn is_identity(&self) -> bool {
        self.scale.is_none() && self.rotation.is_none() && self.translation.is_none()
    }

    pub fn build(&self) -> AffineTransform {
        let s = self.scale.map_or_else(Matrix4::identity, |f| scale(&f));
        let r = self
            .rotation
            .map_or_else(Matrix4::identity, |(axis, angle)| rotation(&axis, angle));
        let t = self
            .translation
            .map_or_else(Matrix4::identity, |offset| translation(&offset));
        AffineTransform::compose(&t, &r, &s)
    }
}
