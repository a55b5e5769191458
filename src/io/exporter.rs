// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh exporters

use super::format::OutputFormat;
use crate::error::Result;
use crate::geometry::Mesh;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Size of the zeroed binary STL header
pub const HEADER_SIZE: usize = 80;
/// Size of one binary STL facet record
pub const FACET_SIZE: usize = 50;

/// Byte-order conversion picked once per encode call.
///
/// Binary STL is little-endian on the wire, so on a little-endian host the
/// native bytes are written as is and on a big-endian host they are reversed.
#[derive(Clone, Copy)]
struct WireOrder {
    u32_bytes: fn(u32) -> [u8; 4],
    f32_bytes: fn(f32) -> [u8; 4],
}

impl WireOrder {
    fn detect() -> Self {
        let u32_bytes: fn(u32) -> [u8; 4] = if integer_is_little_endian() {
            u32::to_ne_bytes
        } else {
            swapped_u32
        };
        let f32_bytes: fn(f32) -> [u8; 4] = if float_is_little_endian() {
            f32::to_ne_bytes
        } else {
            swapped_f32
        };
        Self {
            u32_bytes,
            f32_bytes,
        }
    }
}

fn swapped_u32(value: u32) -> [u8; 4] {
    let mut bytes = value.to_ne_bytes();
    bytes.reverse();
    bytes
}

fn swapped_f32(value: f32) -> [u8; 4] {
    let mut bytes = value.to_ne_bytes();
    bytes.reverse();
    bytes
}

fn integer_is_little_endian() -> bool {
    1u16.to_ne_bytes()[0] == 1
}

// The sign bit of -1.0 sits in the most significant byte
fn float_is_little_endian() -> bool {
    (-1.0f32).to_ne_bytes()[0] == 0
}

/// Encode a mesh as binary STL into any sink.
///
/// The layout is an 80-byte zero header, the triangle count as `u32`, then one
/// 50-byte record per triangle: facet normal and the three corners as `f32`
/// triples followed by a zero `u16` attribute count. Values are narrowed from
/// `f64`; degenerate triangles are written with their NaN normal.
pub fn write_stl<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    let order = WireOrder::detect();
    let count = u32::try_from(mesh.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} triangles do not fit a binary STL count", mesh.len()),
        )
    })?;

    writer.write_all(&[0u8; HEADER_SIZE])?;
    writer.write_all(&(order.u32_bytes)(count))?;

    let mut facet = [0u8; FACET_SIZE];
    for triangle in mesh.triangles() {
        let normal = triangle.normal();
        let (a, b, c) = (
            triangle.a.position,
            triangle.b.position,
            triangle.c.position,
        );
        let values = [
            normal.x, normal.y, normal.z, a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z,
        ];

        for (slot, value) in facet.chunks_exact_mut(4).zip(values) {
            slot.copy_from_slice(&(order.f32_bytes)(value as f32));
        }
        // Attribute byte count stays zero
        writer.write_all(&facet)?;
    }

    writer.flush()?;
    Ok(())
}

/// Export mesh to binary STL
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    export_with_format(mesh, path, OutputFormat::Stl)
}

/// Export mesh, choosing the encoder from the file extension
pub fn export_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let format = OutputFormat::from_path(path.as_ref())?;
    export_with_format(mesh, path, format)
}

/// Export mesh with an explicit encoder
pub fn export_with_format(mesh: &Mesh, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    format.encode(mesh, BufWriter::new(file))?;
    debug!(path = %path.display(), ?format, triangles = mesh.len(), "exported mesh");
    Ok(())
}
