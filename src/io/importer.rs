// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh file importer

use super::format::InputFormat;
use crate::error::{ConvertError, Result};
use crate::geometry::{Mesh, Triangle, Vertex};
use nalgebra::Vector4;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Import a mesh, choosing the decoder from the file extension
pub fn import_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    import_with_format(path, format)
}

/// Import a mesh with an explicit decoder
pub fn import_with_format(path: impl AsRef<Path>, format: InputFormat) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| ConvertError::SourceNotFound {
        path: path.to_path_buf(),
    })?;

    let mesh = format.decode(BufReader::new(file))?;
    debug!(path = %path.display(), ?format, triangles = mesh.len(), "imported mesh");
    Ok(mesh)
}

/// Decode ASCII or binary STL.
///
/// The facet normal is copied into each corner's vertex normal.
pub fn read_stl<R: Read + Seek>(mut reader: R) -> Result<Mesh> {
    let stl = stl_io::read_stl(&mut reader)
        .map_err(|e| ConvertError::malformed(format!("invalid STL: {e}")))?;

    let position = |index: usize| -> Result<Vector4<f64>> {
        let v = stl.vertices.get(index).ok_or_else(|| {
            ConvertError::malformed(format!("STL vertex index {index} out of range"))
        })?;
        Ok(Vector4::new(v[0] as f64, v[1] as f64, v[2] as f64, 1.0))
    };

    let mut mesh = Mesh::with_capacity(stl.faces.len());
    for face in &stl.faces {
        let normal = Vector4::new(
            face.normal[0] as f64,
            face.normal[1] as f64,
            face.normal[2] as f64,
            0.0,
        );
        let [a, b, c] = face.vertices;
        mesh.push(Triangle::new(
            Vertex::new(position(a)?).with_normal(normal),
            Vertex::new(position(b)?).with_normal(normal),
            Vertex::new(position(c)?).with_normal(normal),
        ));
    }

    Ok(mesh)
}
