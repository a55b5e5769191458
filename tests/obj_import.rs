// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OBJ import tests

use anyhow::Result;
use approx::assert_relative_eq;
use polyconv::io::{self, InputFormat};
use polyconv::utils::point;
use polyconv::ConvertError;
use std::io::Write;
use tempfile::NamedTempFile;

const BIPYRAMID_OBJ: &str = "\
# bipyramid
mtllib bipyramid.mtl
o bipyramid
v -1 0 1
v 1 0 1
v 1 0 -1
v -1 0 -1
v 0 1 0
v 0 -1 0
vn 0 1 0
usemtl default
f 1 2 5
f 2 3 5
f 3 4 5
f 4 1 5
f 1 6 2
f 2 6 3
f 3 6 4
f 4 6 1
";

fn write_temp(suffix: &str, content: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::with_suffix(suffix)?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_import_bipyramid() -> Result<()> {
    let file = write_temp(".obj", BIPYRAMID_OBJ.as_bytes())?;
    let mesh = io::import_mesh(file.path())?;

    assert_eq!(mesh.len(), 8);
    assert_eq!(mesh.material_file.as_deref(), Some("bipyramid.mtl"));
    assert_relative_eq!(mesh.surface_area(), 11.31370849898476, epsilon = 1e-12);
    assert_relative_eq!(mesh.volume(), 8.0 / 3.0, epsilon = 1e-12);
    assert!(mesh.is_point_inside(&point(0.0, 0.5, 0.0)));
    assert!(!mesh.is_point_inside(&point(0.0, 1.5, 0.0)));

    Ok(())
}

#[test]
fn test_uppercase_extension() -> Result<()> {
    let file = write_temp(".OBJ", BIPYRAMID_OBJ.as_bytes())?;
    assert_eq!(io::import_mesh(file.path())?.len(), 8);
    Ok(())
}

#[test]
fn test_quad_gives_two_fan_triangles() -> Result<()> {
    let mesh = io::parse_obj("v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nf 1 2 3 4\n")?;

    assert_eq!(mesh.len(), 2);
    for triangle in &mesh.triangles {
        assert_eq!(triangle.a.position, point(0.0, 0.0, 0.0));
    }
    assert_relative_eq!(mesh.surface_area(), 4.0);

    Ok(())
}

#[test]
fn test_pentagon_fan() -> Result<()> {
    let source = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
    let mesh = io::parse_obj(source)?;

    assert_eq!(mesh.len(), 3);
    assert_eq!(mesh.triangles[2].b.position, point(1.0, 2.0, 0.0));
    assert_eq!(mesh.triangles[2].c.position, point(0.0, 1.0, 0.0));

    Ok(())
}

#[test]
fn test_malformed_inputs() {
    let cases = [
        "v 1 2\n",
        "v 1 2 3 4 5\n",
        "v 1 two 3\n",
        "v 0 0 0\nf 1 1\n",
        "v 0 0 0\nf 1 1 2\n",
        "v 0 0 0\nf 0 1 1\n",
        "v 0 0 0\nf 1/1 1/1 1/1\n",
        "v 0 0 0\nvt 0 0 0\nf 1/1 1 1\n",
    ];

    for source in cases {
        let result = io::parse_obj(source);
        assert!(
            matches!(result, Err(ConvertError::MalformedInput { .. })),
            "{source:?} gave {result:?}"
        );
    }
}

#[test]
fn test_error_message_names_line() {
    let err = io::parse_obj("v 0 0 0\nv 1 0 0\n\nf 1 2 9\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 4"), "{message}");
}

#[test]
fn test_unsupported_input_extension() {
    let err = io::import_mesh("model.3ds").unwrap_err();
    assert!(err.is_unsupported_format());
    assert!(matches!(
        err,
        ConvertError::UnsupportedInputFormat { ref extension } if extension == "3ds"
    ));
}

#[test]
fn test_missing_file() {
    let err = io::import_with_format("/nonexistent/model.obj", InputFormat::Obj).unwrap_err();
    assert!(matches!(err, ConvertError::SourceNotFound { .. }));
}
