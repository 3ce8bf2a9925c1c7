// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Rasterwerk filter engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A rectangular RGBA raster stored row-major, four bytes per pixel.
///
/// The constructors guarantee that `width` and `height` are non-zero and that
/// the backing buffer is exactly `width * height * 4` bytes long, so every
/// accessor may index without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    // -- Construction ---------------------------------------------------------

    /// Wrap raw RGBA bytes, rejecting zero sizes and length mismatches.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fill a new buffer with a single pixel value.
    pub fn from_pixel(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self> {
        let len = expected_len(width, height).ok_or(RasterError::InvalidDimension {
            width,
            height,
            len: 0,
        })?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Self::new(width, height, data)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self> {
        let len = expected_len(width, height).ok_or(RasterError::InvalidDimension {
            width,
            height,
            len: 0,
        })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Borrow the raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the raw RGBA bytes. The slice cannot change length, so
    /// the size invariant survives any write through it.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read pixel `(x, y)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite pixel `(x, y)`.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
    }

    /// Borrow one scanline of `width * 4` bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Bytes per scanline.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Re-check the length invariant. Always `Ok` for buffers built through the
    /// constructors; kept for callers that receive buffers across FFI-like seams.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height, self.data.len())
    }
}

/// `width * height * 4`, or `None` on overflow.
fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// Reject zero-sized rasters and byte counts that disagree with the size.
pub fn check_dimensions(width: u32, height: u32, len: usize) -> Result<()> {
    let ok = width > 0 && height > 0 && expected_len(width, height) == Some(len);
    if ok {
        Ok(())
    } else {
        Err(RasterError::InvalidDimension { width, height, len })
    }
}

/// A spatial filter and the parameters it needs.
///
/// Serialises with an internal `kind` tag, e.g. `{"kind":"blur","radius":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Unweighted RGB mean; alpha untouched.
    Grayscale,
    /// Box blur over a `(2 * radius + 1)` square window, clipped at the edges.
    Blur { radius: u32 },
    /// 3x3 sharpen kernel on the interior pixels.
    Sharpen,
    /// Sobel gradient magnitude of the luminance on the interior pixels.
    EdgeDetect,
    /// Replace each `block_size` tile with its mean colour.
    Pixelate { block_size: u32 },
    /// Random scanline displacement plus a red-channel shift. Non-deterministic.
    Glitch { intensity: f64 },
}

/// Radius used when `blur` is given without a parameter.
pub const DEFAULT_BLUR_RADIUS: u32 = 1;
/// Block size used when `pixelate` is given without a parameter.
pub const DEFAULT_BLOCK_SIZE: u32 = 8;
/// Intensity used when `glitch` is given without a parameter.
pub const DEFAULT_GLITCH_INTENSITY: f64 = 0.5;

impl FilterSpec {
    /// Stable lowercase name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Grayscale => "grayscale",
            FilterSpec::Blur { .. } => "blur",
            FilterSpec::Sharpen => "sharpen",
            FilterSpec::EdgeDetect => "edge_detect",
            FilterSpec::Pixelate { .. } => "pixelate",
            FilterSpec::Glitch { .. } => "glitch",
        }
    }

    /// Check the parameter invariants that hold independently of configuration.
    pub fn validate(&self) -> Result<()> {
        match *self {
            FilterSpec::Pixelate { block_size } if block_size < 1 => Err(
                RasterError::parameter("pixelate", "block_size must be at least 1"),
            ),
            FilterSpec::Glitch { intensity } if !(0.0..=1.0).contains(&intensity) => {
                Err(RasterError::parameter(
                    "glitch",
                    format!("intensity must be within [0, 1], got {intensity}"),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterSpec::Blur { radius } => write!(f, "blur:{radius}"),
            FilterSpec::Pixelate { block_size } => write!(f, "pixelate:{block_size}"),
            FilterSpec::Glitch { intensity } => write!(f, "glitch:{intensity}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses the compact `name[:param]` form, e.g. `blur:3` or `sharpen`.
///
/// Unknown names yield [`RasterError::UnsupportedFilter`] so callers can decide
/// whether to reject or skip them.
impl FromStr for FilterSpec {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (name, param) = match trimmed.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (trimmed, None),
        };

        let spec = match name.to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" => no_param("grayscale", param, FilterSpec::Grayscale)?,
            "sharpen" => no_param("sharpen", param, FilterSpec::Sharpen)?,
            "edge_detect" | "edgedetect" | "edges" | "sobel" => {
                no_param("edge_detect", param, FilterSpec::EdgeDetect)?
            }
            "blur" => FilterSpec::Blur {
                radius: parse_param("blur", param, DEFAULT_BLUR_RADIUS)?,
            },
            "pixelate" => FilterSpec::Pixelate {
                block_size: parse_param("pixelate", param, DEFAULT_BLOCK_SIZE)?,
            },
            "glitch" => FilterSpec::Glitch {
                intensity: parse_param("glitch", param, DEFAULT_GLITCH_INTENSITY)?,
            },
            _ => return Err(RasterError::UnsupportedFilter(name.to_owned())),
        };

        spec.validate()?;
        Ok(spec)
    }
}

fn no_param(filter: &'static str, param: Option<&str>, spec: FilterSpec) -> Result<FilterSpec> {
    match param {
        None => Ok(spec),
        Some(p) => Err(RasterError::parameter(
            filter,
            format!("takes no parameter, got {p:?}"),
        )),
    }
}

fn parse_param<T: FromStr>(filter: &'static str, param: Option<&str>, default: T) -> Result<T> {
    match param {
        None => Ok(default),
        Some(p) => p
            .parse()
            .map_err(|_| RasterError::parameter(filter, format!("invalid parameter {p:?}"))),
    }
}
