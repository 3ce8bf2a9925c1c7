// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use rasterwerk_core::{CHANNELS, RasterBuffer};

use super::rounded_mean;

/// Replace every `block_size x block_size` tile with its rounded mean colour.
///
/// Tiles start at the top-left corner; the last row and column of tiles are
/// smaller when the dimensions are not exact multiples. Alpha is averaged like
/// the colour channels. A `block_size` of 0 is treated as 1 (identity); the
/// engine rejects it before getting here.
pub fn pixelate(src: &RasterBuffer, block_size: u32) -> RasterBuffer {
    let bs = block_size.max(1) as usize;
    if bs == 1 {
        return src.clone();
    }

    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.as_raw();
    let mut out = src.clone();
    let dst = out.as_raw_mut();

    for ty in (0..h).step_by(bs) {
        let y_end = (ty + bs).min(h);
        for tx in (0..w).step_by(bs) {
            let x_end = (tx + bs).min(w);

            let mut sums = [0u64; CHANNELS];
            for y in ty..y_end {
                for x in tx..x_end {
                    let i = (y * w + x) * CHANNELS;
                    for c in 0..CHANNELS {
                        sums[c] += data[i + c] as u64;
                    }
                }
            }

            let count = ((x_end - tx) * (y_end - ty)) as u64;
            let mean = sums.map(|s| rounded_mean(s, count));

            for y in ty..y_end {
                for x in tx..x_end {
                    let i = (y * w + x) * CHANNELS;
                    dst[i..i + CHANNELS].copy_from_slice(&mean);
                }
            }
        }
    }

    out
}
