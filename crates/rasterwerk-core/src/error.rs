// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Rasterwerk.

use thiserror::Error;

/// Top-level error type for all Rasterwerk operations.
#[derive(Debug, Error)]
pub enum RasterError {
    // -- Buffer / parameter errors --
    #[error("invalid raster dimensions: {width}x{height} with {len} bytes (need width*height*4)")]
    InvalidDimension { width: u32, height: u32, len: usize },

    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    #[error("parameter out of range for {filter}: {detail}")]
    ParameterRange { filter: &'static str, detail: String },

    // -- Surface adapters --
    #[error("image processing failed: {0}")]
    Image(String),

    // -- Configuration / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl RasterError {
    /// Shorthand for a `ParameterRange` error.
    pub fn parameter(filter: &'static str, detail: impl Into<String>) -> Self {
        Self::ParameterRange {
            filter,
            detail: detail.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RasterError>;
