// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::{BoundingBox, Mesh};
use serde::{Deserialize, Serialize};

/// Aggregate measurements of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    /// Number of triangles
    pub triangle_count: usize,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Enclosed volume in cubic units (closed meshes only)
    pub volume: f64,
    /// Axis-aligned bounds, absent for an empty mesh
    pub bounding_box: Option<BoundingBox>,
    /// Material library named by the source file
    pub material_file: Option<String>,
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> MeshStats {
    MeshStats {
        triangle_count: mesh.len(),
        surface_area: mesh.surface_area(),
        volume: mesh.volume(),
        bounding_box: mesh.bounding_box(),
        material_file: mesh.material_file.clone(),
    }
}

impl Mesh {
    pub fn stats(&self) -> MeshStats {
        analyze(self)
    }
}
