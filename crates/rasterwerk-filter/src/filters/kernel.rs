// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 3x3 convolution filters — sharpen and Sobel edge detection.
//
// Both operate on interior pixels only: the kernel needs a full neighbourhood,
// so the outermost rows and columns are copied from the source unchanged.

use rasterwerk_core::{CHANNELS, RasterBuffer};

/// Row-major 3x3 weights, `[0]` is the top-left neighbour.
pub type Kernel3 = [f32; 9];

/// Sharpen kernel `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
pub const SHARPEN: Kernel3 = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Sobel horizontal gradient (right minus left).
pub const SOBEL_X: Kernel3 = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

/// Sobel vertical gradient (bottom minus top).
pub const SOBEL_Y: Kernel3 = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Weighted sum of `sample` over the neighbourhood of `(x, y)`.
///
/// `sample` receives a pixel index (`y * width + x`). The caller guarantees
/// that `(x, y)` is an interior pixel.
#[inline]
fn convolve_at(
    kernel: &Kernel3,
    x: usize,
    y: usize,
    width: usize,
    sample: impl Fn(usize) -> f32,
) -> f32 {
    let mut acc = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let weight = kernel[ky * 3 + kx];
            if weight == 0.0 {
                continue;
            }
            acc += weight * sample((y + ky - 1) * width + (x + kx - 1));
        }
    }
    acc
}

/// Visit every interior pixel `(x, y)` of a `width x height` raster.
fn for_each_interior(width: usize, height: usize, mut f: impl FnMut(usize, usize)) {
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            f(x, y);
        }
    }
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Sharpen R, G and B with [`SHARPEN`]. Alpha and the border are copied.
pub fn sharpen(src: &RasterBuffer) -> RasterBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.as_raw();
    let mut out = src.clone();
    let dst = out.as_raw_mut();

    for_each_interior(w, h, |x, y| {
        let base = (y * w + x) * CHANNELS;
        for c in 0..3 {
            let value = convolve_at(&SHARPEN, x, y, w, |p| data[p * CHANNELS + c] as f32);
            dst[base + c] = clamp_channel(value);
        }
    });

    out
}

/// Sobel edge detection over the RGB mean.
///
/// Interior pixels become `R = G = B = clamp(sqrt(gx² + gy²))`; alpha and the
/// border are copied.
pub fn edge_detect(src: &RasterBuffer) -> RasterBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let luma: Vec<f32> = src
        .as_raw()
        .chunks_exact(CHANNELS)
        .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0)
        .collect();

    let mut out = src.clone();
    let dst = out.as_raw_mut();

    for_each_interior(w, h, |x, y| {
        let gx = convolve_at(&SOBEL_X, x, y, w, |p| luma[p]);
        let gy = convolve_at(&SOBEL_Y, x, y, w, |p| luma[p]);
        let magnitude = clamp_channel((gx * gx + gy * gy).sqrt());
        let base = (y * w + x) * CHANNELS;
        dst[base..base + 3].fill(magnitude);
    });

    out
}
