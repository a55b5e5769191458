// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyconv mesh converter
//!
//! Reads triangle meshes (Wavefront OBJ, STL), applies scale, rotation and
//! translation, measures surface area and enclosed volume, answers
//! point-in-solid queries and writes the result as binary STL or OBJ.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::ConvertConfig;
pub use error::{ConvertError, Result};
pub use geometry::{
    AffineTransform, Mesh, MeshStats, Primitive, TransformBuilder, Triangle, Vertex,
};
pub use io::{export_mesh, import_mesh, parse_obj, write_stl, InputFormat, OutputFormat};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_conversion() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let mut bytes = Vec::new();
        write_stl(&mesh, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 134);
    }
}
