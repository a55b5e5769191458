// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed reference solids for tests and benchmarks

use super::{Mesh, Triangle, Vertex};
use crate::utils::{direction, point};
use nalgebra::{Vector3, Vector4};
use std::f64::consts::PI;

/// Geometric primitives
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    /// Two square pyramids glued base to base on the XZ plane
    Bipyramid { half_width: f64, height: f64 },
    Sphere { r: f64, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn bipyramid(half_width: f64, height: f64) -> Self {
        Self::Bipyramid { half_width, height }
    }

    pub fn sphere(r: f64, segments: u32) -> Self {
        let segments = if segments > 2 { segments } else { 32 };
        Self::Sphere { r, segments }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Bipyramid { half_width, height } => generate_bipyramid_mesh(*half_width, *height),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
        }
    }
}

fn facet(a: Vector4<f64>, b: Vector4<f64>, c: Vector4<f64>, normal: Vector4<f64>) -> Triangle {
    Triangle::new(
        Vertex::new(a).with_normal(normal),
        Vertex::new(b).with_normal(normal),
        Vertex::new(c).with_normal(normal),
    )
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let offset = if center { size / 2.0 } else { Vector3::zeros() };
    let (min_x, min_y, min_z) = (-offset.x, -offset.y, -offset.z);
    let (max_x, max_y, max_z) = (size.x - offset.x, size.y - offset.y, size.z - offset.z);

    // 8 corners
    let corners = [
        point(min_x, min_y, min_z),
        point(max_x, min_y, min_z),
        point(max_x, max_y, min_z),
        point(min_x, max_y, min_z),
        point(min_x, min_y, max_z),
        point(max_x, min_y, max_z),
        point(max_x, max_y, max_z),
        point(min_x, max_y, max_z),
    ];

    // Outward winding, two triangles per face
    let faces = [
        ([4, 5, 6], direction(0.0, 0.0, 1.0)),
        ([4, 6, 7], direction(0.0, 0.0, 1.0)),
        ([1, 0, 3], direction(0.0, 0.0, -1.0)),
        ([1, 3, 2], direction(0.0, 0.0, -1.0)),
        ([5, 1, 2], direction(1.0, 0.0, 0.0)),
        ([5, 2, 6], direction(1.0, 0.0, 0.0)),
        ([0, 4, 7], direction(-1.0, 0.0, 0.0)),
        ([0, 7, 3], direction(-1.0, 0.0, 0.0)),
        ([7, 6, 2], direction(0.0, 1.0, 0.0)),
        ([7, 2, 3], direction(0.0, 1.0, 0.0)),
        ([0, 1, 5], direction(0.0, -1.0, 0.0)),
        ([0, 5, 4], direction(0.0, -1.0, 0.0)),
    ];

    faces
        .iter()
        .map(|([i, j, k], normal)| facet(corners[*i], corners[*j], corners[*k], *normal))
        .collect()
}

fn generate_bipyramid_mesh(half_width: f64, height: f64) -> Mesh {
    let w = half_width;
    let a = point(-w, 0.0, w);
    let b = point(w, 0.0, w);
    let c = point(w, 0.0, -w);
    let d = point(-w, 0.0, -w);
    let top = point(0.0, height, 0.0);
    let bottom = point(0.0, -height, 0.0);

    [
        [a, b, top],
        [b, c, top],
        [c, d, top],
        [d, a, top],
        [a, bottom, b],
        [b, bottom, c],
        [c, bottom, d],
        [d, bottom, a],
    ]
    .into_iter()
    .map(|[p, q, r]| Triangle::from_positions(p, q, r))
    .collect()
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let stacks = segments;
    let slices = segments;

    let vertex_at = |i: u32, j: u32| {
        let phi = PI * i as f64 / stacks as f64;
        let theta = 2.0 * PI * j as f64 / slices as f64;
        let unit = direction(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
        Vertex::new(point(radius * unit.x, radius * unit.y, radius * unit.z)).with_normal(unit)
    };

    let mut mesh = Mesh::with_capacity((stacks * slices * 2) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let first = vertex_at(i, j);
            let second = vertex_at(i + 1, j);
            let first_next = vertex_at(i, j + 1);
            let second_next = vertex_at(i + 1, j + 1);

            // Skip the zero-area slivers at the poles
            if i != 0 {
                mesh.push(Triangle::new(first, first_next, second));
            }
            if i + 1 != stacks {
                mesh.push(Triangle::new(second, first_next, second_next));
            }
        }
    }

    mesh
}
