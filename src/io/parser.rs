// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ parser using pest

use crate::error::{ConvertError, Result};
use crate::geometry::{Mesh, Triangle, Vertex};
use nalgebra::Vector4;
use pest::Parser;
use pest_derive::Parser;
use std::io::Read;
use tracing::debug;

#[derive(Parser)]
#[grammar = "io/obj.pest"]
struct ObjParser;

/// Parse OBJ source text into a mesh
pub fn parse_obj(source: &str) -> Result<Mesh> {
    let mut pairs = ObjParser::parse(Rule::obj, source)
        .map_err(|e| ConvertError::malformed(e.to_string()))?;

    let mut builder = ObjBuilder::default();

    if let Some(obj) = pairs.next() {
        // One `line` pair per source line, so numbering is positional
        for (index, line) in obj.into_inner().enumerate() {
            if line.as_rule() != Rule::line {
                continue;
            }
            let number = index + 1;
            let Some(record) = line.into_inner().next() else {
                continue;
            };
            let tokens: Vec<&str> = record.into_inner().map(|token| token.as_str()).collect();
            builder.record(number, &tokens)?;
        }
    }

    let mesh = builder.finish();
    debug!(
        triangles = mesh.len(),
        material = mesh.material_file.as_deref().unwrap_or(""),
        "parsed OBJ"
    );
    Ok(mesh)
}

/// Read an OBJ document from a byte source.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; only
/// the ASCII record syntax matters to the parser.
pub fn read_obj<R: Read>(mut reader: R) -> Result<Mesh> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_obj(&String::from_utf8_lossy(&bytes))
}

/// One `index[/texture][/normal]` reference of a face record, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRef {
    pub position: usize,
    pub texture: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceRef {
    /// Parse a slash-separated reference. Empty sub-indices are absent;
    /// the position index is mandatory and everything must be a
    /// non-negative integer.
    pub fn parse(word: &str) -> std::result::Result<Self, String> {
        let mut parts = word.split('/');
        let position = parse_index(parts.next())?
            .ok_or_else(|| format!("face reference {word:?} has no position index"))?;
        let texture = parse_index(parts.next())?;
        let normal = parse_index(parts.next())?;
        if parts.next().is_some() {
            return Err(format!("face reference {word:?} has too many components"));
        }
        Ok(Self {
            position,
            texture,
            normal,
        })
    }
}

fn parse_index(part: Option<&str>) -> std::result::Result<Option<usize>, String> {
    match part {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<usize>()
            .map(Some)
            .map_err(|_| format!("invalid index {text:?}")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Position,
    Normal,
    Texture,
    Face,
    MaterialLibrary,
}

impl RecordKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "v" => Some(Self::Position),
            "vn" => Some(Self::Normal),
            "vt" => Some(Self::Texture),
            "f" => Some(Self::Face),
            "mtllib" => Some(Self::MaterialLibrary),
            _ => None,
        }
    }
}

/// Accumulates vertex attribute pools and emits triangles face by face
#[derive(Default)]
struct ObjBuilder {
    positions: Vec<Vector4<f64>>,
    normals: Vec<Vector4<f64>>,
    textures: Vec<Vector4<f64>>,
    mesh: Mesh,
}

impl ObjBuilder {
    fn record(&mut self, line: usize, tokens: &[&str]) -> Result<()> {
        let Some((&keyword, args)) = tokens.split_first() else {
            return Ok(());
        };

        match RecordKind::from_token(keyword) {
            Some(RecordKind::Position) => {
                let v = parse_vector(line, args, 1.0)?;
                self.positions.push(v);
            }
            Some(RecordKind::Normal) => {
                let v = parse_vector(line, args, 0.0)?;
                self.normals.push(v);
            }
            Some(RecordKind::Texture) => {
                let v = parse_vector(line, args, 0.0)?;
                self.textures.push(v);
            }
            Some(RecordKind::Face) => self.face(line, args)?,
            Some(RecordKind::MaterialLibrary) => {
                if let Some(name) = args.first() {
                    self.mesh.material_file = Some((*name).to_string());
                }
            }
            None => {}
        }

        Ok(())
    }

    fn face(&mut self, line: usize, args: &[&str]) -> Result<()> {
        if args.len() < 3 {
            return Err(ConvertError::malformed_at(
                line,
                format!("face needs at least 3 vertices, got {}", args.len()),
            ));
        }

        let refs = args
            .iter()
            .map(|word| FaceRef::parse(word).map_err(|msg| ConvertError::malformed_at(line, msg)))
            .collect::<Result<Vec<_>>>()?;

        let textured = refs.iter().filter(|r| r.texture.is_some()).count();
        if textured != 0 && textured != refs.len() {
            return Err(ConvertError::malformed_at(
                line,
                "texture indices given for only some face vertices",
            ));
        }
        let with_normals = refs.iter().filter(|r| r.normal.is_some()).count();
        if with_normals != 0 && with_normals != refs.len() {
            return Err(ConvertError::malformed_at(
                line,
                "normal indices given for only some face vertices",
            ));
        }

        let vertices = refs
            .iter()
            .map(|r| self.resolve(line, r))
            .collect::<Result<Vec<_>>>()?;

        // Fan around the first vertex
        for i in 0..vertices.len() - 2 {
            let triangle = Triangle::new(vertices[0], vertices[i + 1], vertices[i + 2]);
            self.mesh.push(triangle);
        }

        Ok(())
    }

    fn resolve(&self, line: usize, face_ref: &FaceRef) -> Result<Vertex> {
        let mut vertex = Vertex::new(lookup(line, &self.positions, face_ref.position, "position")?);
        if let Some(index) = face_ref.texture {
            vertex.texture = lookup(line, &self.textures, index, "texture")?;
        }
        if let Some(index) = face_ref.normal {
            vertex.normal = lookup(line, &self.normals, index, "normal")?;
        }
        Ok(vertex)
    }

    fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Resolve a 1-based index into an attribute pool
fn lookup(line: usize, pool: &[Vector4<f64>], index: usize, what: &str) -> Result<Vector4<f64>> {
    index
        .checked_sub(1)
        .and_then(|i| pool.get(i))
        .copied()
        .ok_or_else(|| {
            ConvertError::malformed_at(
                line,
                format!("{what} index {index} out of range (1..={})", pool.len()),
            )
        })
}

/// Parse 3 or 4 numeric fields; the missing 4th component takes `w`
fn parse_vector(line: usize, args: &[&str], w: f64) -> Result<Vector4<f64>> {
    if args.len() != 3 && args.len() != 4 {
        return Err(ConvertError::malformed_at(
            line,
            format!("expected 3 or 4 components, got {}", args.len()),
        ));
    }

    let mut v = Vector4::new(0.0, 0.0, 0.0, w);
    for (i, text) in args.iter().enumerate() {
        v[i] = text
            .parse::<f64>()
            .map_err(|_| ConvertError::malformed_at(line, format!("invalid number {text:?}")))?;
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{direction, point};

    fn malformed_message(source: &str) -> String {
        match parse_obj(source) {
            Err(ConvertError::MalformedInput { message }) => message,
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.len(), 1);
        let t = &mesh.triangles[0];
        assert_eq!(t.a.position, point(0.0, 0.0, 0.0));
        assert_eq!(t.b.position, point(1.0, 0.0, 0.0));
        assert_eq!(t.c.position, point(0.0, 1.0, 0.0));
        assert!(!t.a.has_normal());
        assert!(!t.a.has_texture());
    }

    #[test]
    fn test_fourth_component_defaults() {
        let source = "v 1 2 3\nv 1 2 3 7\nvn 0 0 1\nvt 0.5 0.5 0\nf 1/1/1 2/1/1 1/1/1\n";
        let mesh = parse_obj(source).unwrap();
        let t = &mesh.triangles[0];
        assert_eq!(t.a.position, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(t.b.position, Vector4::new(1.0, 2.0, 3.0, 7.0));
        assert_eq!(t.a.normal, direction(0.0, 0.0, 1.0));
        assert_eq!(t.a.texture, Vector4::new(0.5, 0.5, 0.0, 0.0));
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(source).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles[0].a.position, point(0.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[0].c.position, point(1.0, 1.0, 0.0));
        assert_eq!(mesh.triangles[1].a.position, point(0.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[1].b.position, point(1.0, 1.0, 0.0));
        assert_eq!(mesh.triangles[1].c.position, point(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_face_ref_shapes() {
        assert_eq!(
            FaceRef::parse("3").unwrap(),
            FaceRef {
                position: 3,
                texture: None,
                normal: None,
            }
        );
        assert_eq!(
            FaceRef::parse("3/2").unwrap(),
            FaceRef {
                position: 3,
                texture: Some(2),
                normal: None,
            }
        );
        assert_eq!(
            FaceRef::parse("3//4").unwrap(),
            FaceRef {
                position: 3,
                texture: None,
                normal: Some(4),
            }
        );
        assert_eq!(
            FaceRef::parse("3/2/4").unwrap(),
            FaceRef {
                position: 3,
                texture: Some(2),
                normal: Some(4),
            }
        );
        assert!(FaceRef::parse("/2/4").is_err());
        assert!(FaceRef::parse("-1").is_err());
        assert!(FaceRef::parse("1/2/3/4").is_err());
        assert!(FaceRef::parse("a").is_err());
    }

    #[test]
    fn test_unknown_and_prefixed_tokens_are_ignored() {
        let source = "# comment\no cube\nvp 1 2\nvx 1 2 3\nusemtl red\ns off\n\n   \n";
        let mesh = parse_obj(source).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_mtllib() {
        let mesh = parse_obj("mtllib cube.mtl extra\n").unwrap();
        assert_eq!(mesh.material_file.as_deref(), Some("cube.mtl"));

        let mesh = parse_obj("mtllib\n").unwrap();
        assert!(mesh.material_file.is_none());
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let source = "\tv  0 0 0 \r\nv 1\t0 0\r\nv 0 1 0\r\nf 1 2 3";
        let mesh = parse_obj(source).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles[0].b.position, point(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_wrong_component_count() {
        assert!(malformed_message("v 1 2\n").starts_with("line 1:"));
        assert!(malformed_message("v 0 0 0\nvn 1 2 3 4 5\n").starts_with("line 2:"));
    }

    #[test]
    fn test_invalid_number() {
        let message = malformed_message("v 0 0 0\n\nvt 1 x 0\n");
        assert!(message.starts_with("line 3:"), "{message}");
        assert!(message.contains("\"x\""));
    }

    #[test]
    fn test_face_errors() {
        let verts = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\n";
        for face in [
            "f 1 2",
            "f 0 1 2",
            "f 1 2 4",
            "f 1 2 -1",
            "f 1//1 2//1 3",
            "f 1/1 2/1 3/1",
            "f 1//2 2//1 3//1",
            "f 1 2 three",
        ] {
            let message = malformed_message(&format!("{verts}{face}\n"));
            assert!(message.starts_with("line 5:"), "{face}: {message}");
        }
    }

    #[test]
    fn test_large_input_reports_late_line() {
        let lines = 200_000;
        let mut source = String::with_capacity(lines * 16);
        for i in 0..lines {
            source.push_str(&format!("v {} 0 0\n", i % 1000));
        }
        source.push_str("f 1 2 0\n");

        let start = std::time::Instant::now();
        let message = malformed_message(&source);
        let elapsed = start.elapsed();

        assert!(message.starts_with("line 200001:"), "{message}");
        assert!(elapsed.as_secs() < 20, "parsing took {elapsed:?}");
    }

    #[test]
    fn test_read_obj_lossy_utf8() {
        let mut bytes = b"o \xff\xfe\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".to_vec();
        bytes.extend_from_slice(b"# \xc3\n");
        let mesh = read_obj(bytes.as_slice()).unwrap();
        assert_eq!(mesh.len(), 1);
    }
}
