// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Converter configuration system

use crate::error::{ConvertError, Result};
use crate::geometry::TransformBuilder;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "polyconv.toml";

/// Converter configuration
///
/// Every field is optional in the file. Command-line flags take precedence
/// over whatever is loaded here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Scale factors along x, y, z
    pub scale: Option<[f64; 3]>,
    /// Rotation axis x, y, z and angle in radians
    pub rotate: Option<[f64; 4]>,
    /// Translation along x, y, z
    pub translate: Option<[f64; 3]>,
    /// Verbose logging
    pub verbose: bool,
    /// Print statistics as JSON
    pub json: bool,
}

impl ConvertConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit `path` must exist. Without one, `polyconv.toml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(verbose) = std::env::var("POLYCONV_VERBOSE") {
            self.verbose = verbose.parse().unwrap_or(false);
        }

        if let Ok(json) = std::env::var("POLYCONV_JSON") {
            self.json = json.parse().unwrap_or(false);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Transform parameters from the config, unset parts left at identity
    pub fn transform_builder(&self) -> TransformBuilder {
        let mut builder = TransformBuilder::new();
        if let Some([x, y, z]) = self.scale {
            builder = builder.scale(Vector3::new(x, y, z));
        }
        if let Some([x, y, z, angle]) = self.rotate {
            builder = builder.rotate(Vector3::new(x, y, z), angle);
        }
        if let Some([x, y, z]) = self.translate {
            builder = builder.translate(Vector3::new(x, y, z));
        }
        builder
    }
}
