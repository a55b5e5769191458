// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and operations

mod analytics;
mod bbox;
mod mesh;
mod primitives;
mod transform;
mod triangle;

pub use analytics::{analyze, MeshStats};
pub use bbox::BoundingBox;
pub use mesh::Mesh;
pub use primitives::Primitive;
pub use transform::{rotation, scale, translation, AffineTransform, TransformBuilder};
pub use triangle::{Triangle, Vertex};
