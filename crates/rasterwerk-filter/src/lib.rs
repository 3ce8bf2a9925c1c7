// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rasterwerk-filter — Pixel filters for RGBA rasters.
//
// Provides the filter engine (grayscale, box blur, sharpen, Sobel edge
// detection, pixelation, glitch), ordered filter pipelines, and conversion
// between raster buffers and encoded images.

pub mod engine;
pub mod filters;
pub mod pipeline;
pub mod surface;

// Re-export the primary structs so callers can use `rasterwerk_filter::PixelFilterEngine` etc.
pub use engine::{PixelFilterEngine, apply_filter};
pub use pipeline::FilterPipeline;
pub use rasterwerk_core::{EngineConfig, FilterSpec, RasterBuffer, RasterError, UnknownFilterPolicy};
