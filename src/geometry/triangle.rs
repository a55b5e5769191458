// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vertex and triangle primitives
//!
//! All vectors are homogeneous: positions carry `w = 1`, normals and
//! texture directions carry `w = 0`, so a single 4×4 matrix can translate
//! positions without moving directions. Geometric predicates work on the
//! `xyz` part only.

use crate::utils::{approx_eq, vectors_approx_eq, EPSILON};
use nalgebra::{Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Vertex with position, normal and texture coordinate
///
/// A zero normal or texture means the attribute is unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vector4<f64>,
    pub normal: Vector4<f64>,
    pub texture: Vector4<f64>,
}

impl Vertex {
    pub fn new(position: Vector4<f64>) -> Self {
        Self {
            position,
            normal: Vector4::zeros(),
            texture: Vector4::zeros(),
        }
    }

    pub fn with_normal(mut self, normal: Vector4<f64>) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_texture(mut self, texture: Vector4<f64>) -> Self {
        self.texture = texture;
        self
    }

    pub fn has_normal(&self) -> bool {
        self.normal != Vector4::zeros()
    }

    pub fn has_texture(&self) -> bool {
        self.texture != Vector4::zeros()
    }

    /// Transform position and normal by separate matrices.
    ///
    /// The normal is renormalized afterwards; an unset (zero) normal stays zero.
    pub fn transform(&mut self, position_matrix: &Matrix4<f64>, normal_matrix: &Matrix4<f64>) {
        self.position = position_matrix * self.position;
        let normal = normal_matrix * self.normal;
        self.normal = normal.try_normalize(0.0).unwrap_or(normal);
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Vector4::new(0.0, 0.0, 0.0, 1.0))
    }
}

impl From<Vector4<f64>> for Vertex {
    fn from(position: Vector4<f64>) -> Self {
        Self::new(position)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        vectors_approx_eq(&self.position, &other.position)
            && vectors_approx_eq(&self.normal, &other.normal)
            && vectors_approx_eq(&self.texture, &other.texture)
    }
}

/// Triangle owning its three vertices by value
///
/// The order `a, b, c` is the winding: it fixes the sign of [`Triangle::normal`]
/// and the orientation of the edge tests in [`Triangle::is_inside`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    /// Build a triangle from bare positions, leaving normals and textures unset
    pub fn from_positions(a: Vector4<f64>, b: Vector4<f64>, c: Vector4<f64>) -> Self {
        Self::new(a.into(), b.into(), c.into())
    }

    pub fn vertices(&self) -> [&Vertex; 3] {
        [&self.a, &self.b, &self.c]
    }

    fn corners(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (
            self.a.position.xyz(),
            self.b.position.xyz(),
            self.c.position.xyz(),
        )
    }

    fn edge_cross(&self) -> Vector3<f64> {
        let (a, b, c) = self.corners();
        (b - a).cross(&(c - a))
    }

    /// Surface area; zero for collinear or coincident vertices
    pub fn area(&self) -> f64 {
        self.edge_cross().norm() / 2.0
    }

    /// Unit plane normal following the right-hand rule over `a, b, c`.
    ///
    /// Always recomputed from the current positions. A degenerate triangle has
    /// no direction to normalize and yields NaN components; check
    /// `area() > 0.0` first when that matters.
    pub fn normal(&self) -> Vector4<f64> {
        let n = self.edge_cross().normalize();
        Vector4::new(n.x, n.y, n.z, 0.0)
    }

    /// Whether `point` lies on the triangle, boundary included.
    ///
    /// The point must be within [`EPSILON`] of the plane and on the
    /// non-negative side of all three edges. Edge and vertex points count as
    /// inside so that ray parity over a closed mesh stays stable at seams.
    pub fn is_inside(&self, point: &Vector4<f64>) -> bool {
        let n = self.normal().xyz();
        let (a, b, c) = self.corners();
        let p = point.xyz();

        if !approx_eq((a - p).dot(&n), 0.0, EPSILON) {
            return false;
        }

        let inside_ab = (b - a).cross(&(p - a)).dot(&n) >= 0.0;
        let inside_bc = (c - b).cross(&(p - b)).dot(&n) >= 0.0;
        let inside_ca = (a - c).cross(&(p - c)).dot(&n) >= 0.0;

        inside_ab && inside_bc && inside_ca
    }

    /// Intersect the ray `origin + t * direction` (t >= 0) with this triangle.
    ///
    /// `direction` is used exactly as given. A non-unit direction only rescales
    /// `t`; the returned point is the same. Rays parallel to the plane and
    /// hits behind the origin return `None`.
    pub fn ray_intersection(
        &self,
        origin: &Vector4<f64>,
        direction: &Vector4<f64>,
    ) -> Option<Vector4<f64>> {
        let n = self.normal().xyz();
        let det = n.dot(&direction.xyz());

        if approx_eq(det, 0.0, EPSILON) {
            return None;
        }

        let t = (n.dot(&self.a.position.xyz()) - n.dot(&origin.xyz())) / det;
        if t < 0.0 {
            return None;
        }

        let hit = origin + direction * t;
        self.is_inside(&hit).then_some(hit)
    }

    /// Apply `position_matrix` to the positions and `normal_matrix` to the
    /// vertex normals.
    ///
    /// `normal_matrix` should be the inverse-transpose of the linear part of
    /// `position_matrix`; see [`crate::geometry::AffineTransform`].
    pub fn transform(&mut self, position_matrix: &Matrix4<f64>, normal_matrix: &Matrix4<f64>) {
        self.a.transform(position_matrix, normal_matrix);
        self.b.transform(position_matrix, normal_matrix);
        self.c.transform(position_matrix, normal_matrix);
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}
