// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh conversion

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors surfaced by decoding, encoding and format selection.
///
/// Degenerate geometry is never an error; these are the only failure kinds.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be opened.
    #[error("file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The input violates the format grammar.
    #[error("ill-formed input: {message}")]
    MalformedInput { message: String },

    /// No decoder is registered for the input extension.
    #[error("unsupported input format: {extension:?}")]
    UnsupportedInputFormat { extension: String },

    /// No encoder is registered for the output extension.
    #[error("unsupported output format: {extension:?}")]
    UnsupportedOutputFormat { extension: String },

    /// Configuration file could not be read or parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Any other I/O failure on the source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Build a `MalformedInput` error pointing at a 1-based source line.
    pub fn malformed_at(line: usize, message: impl AsRef<str>) -> Self {
        Self::malformed(format!("line {}: {}", line, message.as_ref()))
    }

    /// Whether this error should be followed by the list of supported formats.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedInputFormat { .. } | Self::UnsupportedOutputFormat { .. }
        )
    }
}
