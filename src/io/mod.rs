// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - parsing, importing, and exporting

mod exporter;
mod format;
mod importer;
mod obj_writer;
mod parser;

pub use exporter::{export_mesh, export_stl, export_with_format, write_stl, FACET_SIZE, HEADER_SIZE};
pub use format::{InputFormat, OutputFormat};
pub use importer::{import_mesh, import_with_format, read_stl};
pub use obj_writer::write_obj;
pub use parser::{parse_obj, read_obj, FaceRef};
