// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel filter engine — validates the raster and the filter spec, then
// dispatches to the filter kernels in `crate::filters`.

use rand::Rng;
use rasterwerk_core::error::{RasterError, Result};
use rasterwerk_core::{EngineConfig, FilterSpec, RasterBuffer, UnknownFilterPolicy};
use tracing::{debug, info, instrument, warn};

use crate::filters;

/// Applies [`FilterSpec`]s to [`RasterBuffer`]s.
///
/// The engine holds only its configuration; every call is a pure function of
/// `(buffer, spec)` apart from the random source used by
/// [`FilterSpec::Glitch`]. Inputs are borrowed and never modified.
///
/// ```ignore
/// let engine = PixelFilterEngine::default();
/// let blurred = engine.apply_filter(&buffer, &FilterSpec::Blur { radius: 2 })?;
/// let edges = engine.apply_named(&blurred, "edge_detect")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PixelFilterEngine {
    config: EngineConfig,
}

impl PixelFilterEngine {
    // -- Construction ---------------------------------------------------------

    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- Filtering ------------------------------------------------------------

    /// Apply `spec` to `buffer`, returning a new buffer of the same size.
    ///
    /// Glitch draws from the thread-local random generator; use
    /// [`apply_filter_with_rng`](Self::apply_filter_with_rng) to pin it.
    pub fn apply_filter(&self, buffer: &RasterBuffer, spec: &FilterSpec) -> Result<RasterBuffer> {
        let mut rng = rand::rng();
        self.apply_filter_with_rng(buffer, spec, &mut rng)
    }

    /// Apply `spec` to `buffer` with an explicit random source.
    #[instrument(
        skip(self, buffer, rng),
        fields(filter = %spec, width = buffer.width(), height = buffer.height())
    )]
    pub fn apply_filter_with_rng<R: Rng>(
        &self,
        buffer: &RasterBuffer,
        spec: &FilterSpec,
        rng: &mut R,
    ) -> Result<RasterBuffer> {
        buffer.validate()?;
        self.check_spec(spec)?;

        info!("Applying filter");
        let output = match *spec {
            FilterSpec::Grayscale => filters::grayscale(buffer),
            FilterSpec::Blur { radius } => filters::box_blur(buffer, radius),
            FilterSpec::Sharpen => filters::sharpen(buffer),
            FilterSpec::EdgeDetect => filters::edge_detect(buffer),
            FilterSpec::Pixelate { block_size } => filters::pixelate(buffer, block_size),
            FilterSpec::Glitch { intensity } => {
                debug!(
                    intensity,
                    channel_shift = self.config.glitch_channel_shift,
                    "Glitch output is randomised"
                );
                filters::glitch(buffer, intensity, self.config.glitch_channel_shift, rng)
            }
        };

        debug_assert_eq!(output.dimensions(), buffer.dimensions());
        debug!("Filter complete");
        Ok(output)
    }

    /// Parse a compact filter name (`"blur:2"`) and apply it.
    ///
    /// Unknown names follow [`EngineConfig::unknown_filter`]: `Reject` returns
    /// [`RasterError::UnsupportedFilter`], `Passthrough` returns an unchanged
    /// copy of the input.
    pub fn apply_named(&self, buffer: &RasterBuffer, name: &str) -> Result<RasterBuffer> {
        match self.parse_filter(name)? {
            Some(spec) => self.apply_filter(buffer, &spec),
            None => {
                buffer.validate()?;
                Ok(buffer.clone())
            }
        }
    }

    /// Parse a compact filter name under the configured unknown-filter policy.
    ///
    /// Returns `Ok(None)` only for an unknown name under `Passthrough`.
    pub fn parse_filter(&self, text: &str) -> Result<Option<FilterSpec>> {
        match text.parse::<FilterSpec>() {
            Ok(spec) => {
                self.check_spec(&spec)?;
                Ok(Some(spec))
            }
            Err(RasterError::UnsupportedFilter(name))
                if self.config.unknown_filter == UnknownFilterPolicy::Passthrough =>
            {
                warn!(filter = %name, "Unknown filter; passing input through unchanged");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Validate `spec` against its own invariants and the engine limits.
    pub fn check_spec(&self, spec: &FilterSpec) -> Result<()> {
        spec.validate()?;
        match *spec {
            FilterSpec::Blur { radius } => match self.config.max_blur_radius {
                Some(max) if radius > max => Err(RasterError::parameter(
                    "blur",
                    format!("radius {radius} exceeds the configured maximum {max}"),
                )),
                _ => Ok(()),
            },
            FilterSpec::Glitch { .. } => {
                let shift = self.config.glitch_channel_shift;
                if (0.0..1.0).contains(&shift) {
                    Ok(())
                } else {
                    Err(RasterError::parameter(
                        "glitch",
                        format!("channel shift must be within [0, 1), got {shift}"),
                    ))
                }
            }
            _ => Ok(()),
        }
    }
}

/// Apply `spec` with the default engine configuration.
pub fn apply_filter(buffer: &RasterBuffer, spec: &FilterSpec) -> Result<RasterBuffer> {
    PixelFilterEngine::default().apply_filter(buffer, spec)
}
