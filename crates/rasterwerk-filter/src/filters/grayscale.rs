// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use rasterwerk_core::{CHANNELS, RasterBuffer};

use super::rounded_mean;

/// Replace R, G and B with their unweighted mean. Alpha is copied.
pub fn grayscale(src: &RasterBuffer) -> RasterBuffer {
    let mut out = src.clone();
    for px in out.as_raw_mut().chunks_exact_mut(CHANNELS) {
        let sum = px[0] as u64 + px[1] as u64 + px[2] as u64;
        let mean = rounded_mean(sum, 3);
        px[0] = mean;
        px[1] = mean;
        px[2] = mean;
    }
    out
}
