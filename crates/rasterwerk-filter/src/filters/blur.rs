// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Box blur backed by a per-channel summed-area table, so the cost per pixel is
// constant regardless of radius.

use rasterwerk_core::{CHANNELS, RasterBuffer};

use super::rounded_mean;

/// Box blur: each output channel (alpha included) is the rounded mean of the
/// `(2 * radius + 1)` square window around it.
///
/// The window is clipped at the image edges, so border pixels average over
/// fewer samples instead of wrapping or mirroring. `radius == 0` returns an
/// identical copy. Radii beyond the larger dimension behave like that
/// dimension, since the window already covers the whole image.
pub fn box_blur(src: &RasterBuffer, radius: u32) -> RasterBuffer {
    if radius == 0 {
        return src.clone();
    }

    let (width, height) = src.dimensions();
    let (w, h) = (width as usize, height as usize);
    let r = radius.min(width.max(height)) as usize;
    let table = IntegralTable::build(src);

    let mut out = src.clone();
    let dst = out.as_raw_mut();

    for y in 0..h {
        let y1 = y.saturating_sub(r);
        let y2 = (y + r + 1).min(h);
        for x in 0..w {
            let x1 = x.saturating_sub(r);
            let x2 = (x + r + 1).min(w);
            let area = ((x2 - x1) * (y2 - y1)) as u64;
            let base = (y * w + x) * CHANNELS;
            for c in 0..CHANNELS {
                let sum = table.region_sum(x1, y1, x2, y2, c);
                dst[base + c] = rounded_mean(sum, area);
            }
        }
    }

    out
}

/// Summed-area table over all four channels.
///
/// Entry `(x, y, c)` holds the sum of channel `c` over the rectangle
/// `[0, x) x [0, y)`. The table is `(width + 1) x (height + 1)` with a zeroed
/// first row and column.
struct IntegralTable {
    stride: usize,
    sums: Vec<u64>,
}

impl IntegralTable {
    fn build(src: &RasterBuffer) -> Self {
        let (w, h) = (src.width() as usize, src.height() as usize);
        let stride = (w + 1) * CHANNELS;
        let mut sums = vec![0u64; stride * (h + 1)];
        let data = src.as_raw();

        for y in 0..h {
            let mut row_sum = [0u64; CHANNELS];
            for x in 0..w {
                let px = (y * w + x) * CHANNELS;
                let idx = (y + 1) * stride + (x + 1) * CHANNELS;
                let above = y * stride + (x + 1) * CHANNELS;
                for c in 0..CHANNELS {
                    row_sum[c] += data[px + c] as u64;
                    sums[idx + c] = row_sum[c] + sums[above + c];
                }
            }
        }

        Self { stride, sums }
    }

    /// Sum of channel `c` over `[x1, x2) x [y1, y2)`.
    #[inline]
    fn region_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize, c: usize) -> u64 {
        let at = |x: usize, y: usize| self.sums[y * self.stride + x * CHANNELS + c];
        // S = I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1], ordered to stay unsigned.
        (at(x2, y2) + at(x1, y1)) - at(x2, y1) - at(x1, y2)
    }
}
