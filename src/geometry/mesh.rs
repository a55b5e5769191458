// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and aggregate queries

use super::{AffineTransform, BoundingBox, Triangle};
use crate::utils::vectors_approx_eq;
use nalgebra::{Matrix4, Vector4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Triangle soup with an optional material library reference
///
/// Triangles are stored by value in insertion order. The order does not
/// affect any aggregate, but encoders write triangles back in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub material_file: Option<String>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
            material_file: None,
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            material_file: None,
        }
    }

    /// Append a triangle
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of all triangle areas
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Enclosed volume from the signed tetrahedron sum `|Σ a·(b×c)| / 6`.
    ///
    /// Only meaningful for closed meshes with consistent winding. Open or
    /// inconsistently wound input still returns a number, it just does not
    /// measure anything.
    pub fn volume(&self) -> f64 {
        let signed: f64 = self
            .triangles
            .iter()
            .map(|t| {
                let (a, b, c) = (t.a.position.xyz(), t.b.position.xyz(), t.c.position.xyz());
                a.dot(&b.cross(&c))
            })
            .sum();
        (signed / 6.0).abs()
    }

    /// Point-in-solid test by ray parity.
    ///
    /// A point lying on any triangle is inside. Otherwise a ray along +Y is
    /// cast and the distinct hit points are counted; hits that coincide (a
    /// ray through a shared edge or vertex) are counted once. An odd count
    /// means inside. Only meaningful for closed, non-self-intersecting meshes.
    pub fn is_point_inside(&self, point: &Vector4<f64>) -> bool {
        let ray = Vector4::y();
        let mut hits: Vec<Vector4<f64>> = Vec::new();

        for triangle in &self.triangles {
            if triangle.is_inside(point) {
                return true;
            }

            if let Some(hit) = triangle.ray_intersection(point, &ray) {
                if !hits.iter().any(|seen| vectors_approx_eq(seen, &hit)) {
                    hits.push(hit);
                }
            }
        }

        hits.len() % 2 == 1
    }

    /// Transform every triangle with the same position/normal matrix pair
    pub fn transform(&mut self, position_matrix: &Matrix4<f64>, normal_matrix: &Matrix4<f64>) {
        self.triangles
            .par_iter_mut()
            .for_each(|triangle| triangle.transform(position_matrix, normal_matrix));
    }

    /// Transform by a composed affine transform
    pub fn apply(&mut self, transform: &AffineTransform) {
        self.transform(transform.position_matrix(), transform.normal_matrix());
    }

    /// Axis-aligned bounds of all vertex positions, `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.triangles
                .iter()
                .flat_map(|t| t.vertices())
                .map(|v| v.position.xyz().into()),
        )
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self::from_triangles(iter.into_iter().collect())
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}
