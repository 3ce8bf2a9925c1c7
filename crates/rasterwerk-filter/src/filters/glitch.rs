// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glitch effect — random scanline displacement followed by a red-channel
// shift. Lossy and non-deterministic: the same input produces different output
// on every call unless the caller supplies a seeded random source.

use rand::Rng;
use rasterwerk_core::{CHANNELS, RasterBuffer};

/// Apply the glitch effect.
///
/// 1. `floor(height * intensity)` scanlines are picked at random (a row may be
///    picked more than once). On each, a random span `[start, start + len)` is
///    overwritten with the source row read `offset` columns to the right,
///    wrapping modulo the width.
/// 2. Every row's red channel is pulled left by
///    `floor(width * channel_shift)` columns; the last `shift` columns keep
///    the red values from step 1.
pub fn glitch<R: Rng>(
    src: &RasterBuffer,
    intensity: f64,
    channel_shift: f64,
    rng: &mut R,
) -> RasterBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let stride = src.stride();
    let mut out = src.clone();
    let dst = out.as_raw_mut();

    for _ in 0..scanline_count(h, intensity) {
        let y = rng.random_range(0..h);
        let offset = rng.random_range(0..w);
        let start = rng.random_range(0..w);
        let len = rng.random_range(1..=w - start);

        let source = src.row(y as u32);
        let row = y * stride;
        for x in start..start + len {
            let from = ((x + offset) % w) * CHANNELS;
            let to = row + x * CHANNELS;
            dst[to..to + CHANNELS].copy_from_slice(&source[from..from + CHANNELS]);
        }
    }

    let shift = (w as f64 * channel_shift.max(0.0)).floor() as usize;
    if shift > 0 && shift < w {
        for y in 0..h {
            let row = y * stride;
            // Left to right: column `x + shift` has not been rewritten yet.
            for x in 0..w - shift {
                dst[row + x * CHANNELS] = dst[row + (x + shift) * CHANNELS];
            }
        }
    }

    out
}

/// Number of scanlines displaced: `floor(height * intensity)`.
///
/// Computed in `f64`; in `f32`, `100 * 0.53` lands just below 53.
fn scanline_count(height: usize, intensity: f64) -> usize {
    (height as f64 * intensity.clamp(0.0, 1.0)).floor() as usize
}
