// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversion pipeline runner

use crate::error::Result;
use crate::geometry::{MeshStats, TransformBuilder};
use crate::io::{self, InputFormat, OutputFormat};
use crate::utils::point;
use nalgebra::Vector3;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    /// Measurements after the transform was applied
    pub stats: MeshStats,
    /// Whether the query point lies inside, when one was given
    pub point_inside: Option<bool>,
    #[serde(skip)]
    pub duration: Duration,
}

/// Runner for the read, transform, measure, write pipeline
#[derive(Debug, Clone, Default)]
pub struct Runner {
    transform: TransformBuilder,
    query_point: Option<Vector3<f64>>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: TransformBuilder) -> Self {
        self.transform = transform;
        self
    }

    /// Ask whether `point` lies inside the transformed mesh
    pub fn with_query_point(mut self, point: Vector3<f64>) -> Self {
        self.query_point = Some(point);
        self
    }

    /// Convert `input` to `output`.
    ///
    /// Both formats are resolved from the extensions before any file is
    /// touched, so an unsupported output never leaves a half-done run.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ConvertResult> {
        let start = Instant::now();

        let input_format = InputFormat::from_path(input)?;
        let output_format = OutputFormat::from_path(output)?;

        let mut mesh = io::import_with_format(input, input_format)?;
        info!(input = %input.display(), triangles = mesh.len(), "loaded mesh");

        if !self.transform.is_identity() {
            mesh.apply(&self.transform.build());
            debug!("applied transform");
        }

        let stats = mesh.stats();
        let point_inside = self
            .query_point
            .map(|p| mesh.is_point_inside(&point(p.x, p.y, p.z)));

        io::export_with_format(&mesh, output, output_format)?;
        info!(output = %output.display(), "wrote mesh");

        Ok(ConvertResult {
            input_format,
            output_format,
            stats,
            point_inside,
            duration: start.elapsed(),
        })
    }
}
