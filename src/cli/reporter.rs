// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::ConvertResult;
use crate::io::{InputFormat, OutputFormat};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a finished conversion
    pub fn report_conversion(input: &str, output: &str, result: &ConvertResult, verbose: bool) {
        if verbose {
            println!("{}", "━".repeat(60).bright_black());
            println!("{} {}", "Input:".bold(), input.cyan());
            println!("{} {}", "Output:".bold(), output.cyan());
            println!(
                "  {} {}",
                "Triangles:".bright_black(),
                result.stats.triangle_count.to_string().cyan()
            );
            if let Some(material) = &result.stats.material_file {
                println!("  {} {}", "Material:".bright_black(), material.cyan());
            }
            if let Some(bbox) = &result.stats.bounding_box {
                let size = bbox.size();
                println!(
                    "  {} {} x {} x {}",
                    "Size:".bright_black(),
                    size.x,
                    size.y,
                    size.z
                );
            }
            println!(
                "  {} {}",
                "Time:".bright_black(),
                Self::format_duration(result.duration).yellow()
            );
            println!("{}", "━".repeat(60).bright_black());
        }

        println!("{}", Self::measure_line("Area", result.stats.surface_area));
        println!("{}", Self::measure_line("Volume", result.stats.volume));

        if let Some(inside) = result.point_inside {
            println!("{}", Self::point_message(inside));
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("{} {}", "ERROR:".red().bold(), message);
    }

    /// List the extensions the converter can read and write
    pub fn report_supported_formats() {
        let inputs: Vec<String> = InputFormat::ALL.iter().map(ToString::to_string).collect();
        let outputs: Vec<String> = OutputFormat::ALL.iter().map(ToString::to_string).collect();
        eprintln!("{} {}", "Supported input formats:".bold(), inputs.join(", "));
        eprintln!("{} {}", "Supported output formats:".bold(), outputs.join(", "));
    }

    fn measure_line(name: &str, value: f64) -> String {
        format!("{}: {}", name, value)
    }

    fn point_message(inside: bool) -> &'static str {
        if inside {
            "Point is inside the mesh."
        } else {
            "Point is not inside the mesh."
        }
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
