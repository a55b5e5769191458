// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ exporter

use crate::error::Result;
use crate::geometry::{Mesh, Triangle};
use nalgebra::Vector4;
use std::io::Write;

/// Write a mesh as unindexed OBJ.
///
/// Every triangle gets its own three `v` records, plus `vt` records when any
/// corner carries a texture and `vn` records when all three corners carry a
/// normal. Positions are written with all four components so `w != 1`
/// survives a round trip. Normals are written as `x y z`, and textures as
/// `u v w` plus the fourth component only when it is non-zero.
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    writeln!(writer, "# polyconv OBJ export")?;
    writeln!(writer, "# {} triangles", mesh.len())?;
    if let Some(material) = &mesh.material_file {
        writeln!(writer, "mtllib {material}")?;
    }

    let mut next_texture = 1usize;
    let mut next_normal = 1usize;

    for (i, triangle) in mesh.triangles().iter().enumerate() {
        let first_position = 3 * i + 1;
        let vertices = triangle.vertices();

        for vertex in vertices {
            let p = &vertex.position;
            writeln!(writer, "v {} {} {} {}", p.x, p.y, p.z, p.w)?;
        }

        let texture = if has_any_texture(triangle) {
            for vertex in vertices {
                write_texture(&mut writer, &vertex.texture)?;
            }
            next_texture += 3;
            Some(next_texture - 3)
        } else {
            None
        };

        let normal = if vertices.iter().all(|v| v.has_normal()) {
            for vertex in vertices {
                let n = &vertex.normal;
                writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
            }
            next_normal += 3;
            Some(next_normal - 3)
        } else {
            None
        };

        write!(writer, "f")?;
        for k in 0..3 {
            let p = first_position + k;
            match (texture, normal) {
                (None, None) => write!(writer, " {p}")?,
                (Some(t), None) => write!(writer, " {p}/{}", t + k)?,
                (None, Some(n)) => write!(writer, " {p}//{}", n + k)?,
                (Some(t), Some(n)) => write!(writer, " {p}/{}/{}", t + k, n + k)?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

fn has_any_texture(triangle: &Triangle) -> bool {
    triangle.vertices().iter().any(|v| v.has_texture())
}

fn write_texture<W: Write>(writer: &mut W, t: &Vector4<f64>) -> Result<()> {
    if t.w == 0.0 {
        writeln!(writer, "vt {} {} {}", t.x, t.y, t.z)?;
    } else {
        writeln!(writer, "vt {} {} {} {}", t.x, t.y, t.z, t.w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::io::parse_obj;
    use crate::utils::{direction, point};

    fn to_string(mesh: &Mesh) -> String {
        let mut bytes = Vec::new();
        write_obj(mesh, &mut bytes).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_plain_triangle() {
        let mesh = Mesh::from_triangles(vec![Triangle::from_positions(
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(0.0, 1.0, 0.0),
        )]);
        let text = to_string(&mesh);
        assert!(text.contains("v 1 0 0 1\n"));
        assert!(text.ends_with("f 1 2 3\n"));
        assert!(!text.contains("vn"));
        assert!(!text.contains("mtllib"));
    }

    #[test]
    fn test_attribute_shapes() {
        let n = direction(0.0, 0.0, 1.0);
        let t = Vector4::new(0.5, 0.25, 0.0, 0.0);
        let textured = Triangle::new(
            Vertex::new(point(0.0, 0.0, 0.0)).with_texture(t),
            Vertex::new(point(1.0, 0.0, 0.0)),
            Vertex::new(point(0.0, 1.0, 0.0)),
        );
        let with_normals = Triangle::new(
            Vertex::new(point(0.0, 0.0, 1.0)).with_normal(n),
            Vertex::new(point(1.0, 0.0, 1.0)).with_normal(n),
            Vertex::new(point(0.0, 1.0, 1.0)).with_normal(n),
        );
        let mut mesh = Mesh::from_triangles(vec![textured, with_normals]);
        mesh.material_file = Some("scene.mtl".into());

        let text = to_string(&mesh);
        assert!(text.contains("mtllib scene.mtl\n"));
        assert!(text.contains("f 1/1 2/2 3/3\n"));
        assert!(text.contains("f 4//1 5//2 6//3\n"));

        assert_eq!(parse_obj(&text).unwrap(), mesh);
    }

    #[test]
    fn test_normal_and_texture_field_counts() {
        let n = direction(0.0, 0.0, 1.0);
        let triangle = Triangle::new(
            Vertex::new(point(0.0, 0.0, 0.0))
                .with_normal(n)
                .with_texture(Vector4::new(0.5, 0.25, 0.0, 0.0)),
            Vertex::new(point(1.0, 0.0, 0.0))
                .with_normal(n)
                .with_texture(Vector4::new(1.0, 0.0, 0.0, 2.0)),
            Vertex::new(point(0.0, 1.0, 0.0)).with_normal(n),
        );
        let mesh = Mesh::from_triangles(vec![triangle]);

        let text = to_string(&mesh);
        assert!(text.contains("vn 0 0 1\n"), "{text}");
        assert!(!text.contains("vn 0 0 1 0"), "{text}");
        assert!(text.contains("vt 0.5 0.25 0\n"), "{text}");
        assert!(text.contains("vt 1 0 0 2\n"), "{text}");
        assert!(text.contains("vt 0 0 0\n"), "{text}");
        assert!(text.contains("v 0 1 0 1\n"), "{text}");
        assert!(text.ends_with("f 1/1/1 2/2/2 3/3/3\n"));

        assert_eq!(parse_obj(&text).unwrap(), mesh);
    }

    #[test]
    fn test_partial_normals_are_dropped() {
        let triangle = Triangle::new(
            Vertex::new(point(0.0, 0.0, 0.0)).with_normal(direction(0.0, 0.0, 1.0)),
            Vertex::new(point(1.0, 0.0, 0.0)),
            Vertex::new(point(0.0, 1.0, 0.0)),
        );
        let text = to_string(&Mesh::from_triangles(vec![triangle]));
        assert!(!text.contains("vn"));
        assert!(text.ends_with("f 1 2 3\n"));
    }
}
