// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter kernels — one module per filter family. Every function borrows its
// input and returns a freshly built buffer of the same dimensions.

pub mod blur;
pub mod glitch;
pub mod grayscale;
pub mod kernel;
pub mod pixelate;

pub use blur::box_blur;
pub use glitch::glitch;
pub use grayscale::grayscale;
pub use kernel::{edge_detect, sharpen};
pub use pixelate::pixelate;

/// Rounded integer mean, `sum / count` to the nearest whole number.
#[inline]
pub(crate) fn rounded_mean(sum: u64, count: u64) -> u8 {
    ((sum + count / 2) / count).min(255) as u8
}
