// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyconv CLI

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::Vector3;
use polyconv::cli::{Reporter, Runner};
use polyconv::{ConvertConfig, ConvertError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyconv")]
#[command(version, about = "A 3D model file converter", long_about = None)]
struct Cli {
    /// The path to the input file
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// The path to the output file
    #[arg(long, value_name = "FILE")]
    output: PathBuf,

    /// Scale factors along x, y and z
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    scale: Option<Vec<f64>>,

    /// Rotation axis x, y, z and the angle in radians
    #[arg(
        long,
        num_args = 4,
        value_names = ["X", "Y", "Z", "ANGLE"],
        allow_negative_numbers = true
    )]
    rotate: Option<Vec<f64>>,

    /// Translation along x, y and z
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    translate: Option<Vec<f64>>,

    /// Report whether this point lies inside the transformed mesh
    #[arg(
        long,
        alias = "is_point_inside",
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    is_point_inside: Option<Vec<f64>>,

    /// Configuration file (defaults to ./polyconv.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Reporter::report_error(&format!("{err:#}"));
            if err
                .downcast_ref::<ConvertError>()
                .is_some_and(ConvertError::is_unsupported_format)
            {
                Reporter::report_supported_formats();
            }
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli) -> Result<()> {
    let config =
        ConvertConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let verbose = cli.verbose || config.verbose;
    let json = cli.json || config.json;
    initialize_tracing(verbose);

    let mut transform = config.transform_builder();
    if let Some(v) = &cli.scale {
        transform = transform.scale(Vector3::new(v[0], v[1], v[2]));
    }
    if let Some(v) = &cli.rotate {
        transform = transform.rotate(Vector3::new(v[0], v[1], v[2]), v[3]);
    }
    if let Some(v) = &cli.translate {
        transform = transform.translate(Vector3::new(v[0], v[1], v[2]));
    }

    let mut runner = Runner::new().with_transform(transform);
    if let Some(p) = &cli.is_point_inside {
        runner = runner.with_query_point(Vector3::new(p[0], p[1], p[2]));
    }

    let result = runner.run(&cli.input, &cli.output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Reporter::report_conversion(
            &cli.input.display().to_string(),
            &cli.output.display().to_string(),
            &result,
            verbose,
        );
    }

    Ok(())
}

/// Log to stderr, filtered by `POLYCONV_LOG` when set
fn initialize_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("POLYCONV_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}
