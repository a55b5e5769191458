// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Supported file formats, selected by extension

use super::{exporter, importer, obj_writer, parser};
use crate::error::{ConvertError, Result};
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Seek, Write};
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Formats a mesh can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Obj,
    Stl,
}

impl InputFormat {
    pub const ALL: [Self; 2] = [Self::Obj, Self::Stl];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Stl => "stl",
        }
    }

    /// Case-insensitive lookup, without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Pick the decoder for `path`; no I/O is performed
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = extension_of(path);
        Self::from_extension(&extension)
            .ok_or(ConvertError::UnsupportedInputFormat { extension })
    }

    pub fn decode<R: Read + Seek>(self, reader: R) -> Result<Mesh> {
        match self {
            Self::Obj => parser::read_obj(reader),
            Self::Stl => importer::read_stl(reader),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Formats a mesh can be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Stl,
    Obj,
}

impl OutputFormat {
    pub const ALL: [Self; 2] = [Self::Stl, Self::Obj];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }

    /// Case-insensitive lookup, without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Pick the encoder for `path`; no I/O is performed
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = extension_of(path);
        Self::from_extension(&extension)
            .ok_or(ConvertError::UnsupportedOutputFormat { extension })
    }

    pub fn encode<W: Write>(self, mesh: &Mesh, writer: W) -> Result<()> {
        match self {
            Self::Stl => exporter::write_stl(mesh, writer),
            Self::Obj => obj_writer::write_obj(mesh, writer),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
