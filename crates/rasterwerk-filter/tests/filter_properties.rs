// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Behavioural properties of the filter engine, exercised through the public
// API only.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rasterwerk_filter::{
    FilterPipeline, FilterSpec, PixelFilterEngine, RasterBuffer, RasterError, apply_filter, surface,
};

/// Deterministic pseudo-random test image covering the full channel range.
fn noisy(width: u32, height: u32, seed: u32) -> RasterBuffer {
    RasterBuffer::from_fn(width, height, |x, y| {
        let mut h = x.wrapping_mul(0x9E37_79B9) ^ y.wrapping_mul(0x85EB_CA6B) ^ seed;
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        h.to_le_bytes()
    })
    .unwrap()
}

fn all_specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::Grayscale,
        FilterSpec::Blur { radius: 0 },
        FilterSpec::Blur { radius: 3 },
        FilterSpec::Sharpen,
        FilterSpec::EdgeDetect,
        FilterSpec::Pixelate { block_size: 1 },
        FilterSpec::Pixelate { block_size: 3 },
        FilterSpec::Glitch { intensity: 0.0 },
        FilterSpec::Glitch { intensity: 1.0 },
    ]
}

fn border_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height).flat_map(move |y| {
        (0..width)
            .filter(move |&x| x == 0 || y == 0 || x == width - 1 || y == height - 1)
            .map(move |x| (x, y))
    })
}

#[test]
fn dimensions_and_length_are_preserved() {
    let engine = PixelFilterEngine::default();
    for (w, h) in [(1, 1), (1, 7), (7, 1), (3, 3), (16, 9), (51, 17)] {
        let src = noisy(w, h, w * 31 + h);
        for spec in all_specs() {
            let out = engine
                .apply_filter_with_rng(&src, &spec, &mut StdRng::seed_from_u64(5))
                .unwrap();
            assert_eq!(out.dimensions(), (w, h), "{spec} on {w}x{h}");
            assert_eq!(out.as_raw().len(), (w * h * 4) as usize, "{spec} on {w}x{h}");
        }
    }
}

#[test]
fn grayscale_is_idempotent_and_keeps_alpha() {
    let src = noisy(13, 11, 1);
    let once = apply_filter(&src, &FilterSpec::Grayscale).unwrap();
    let twice = apply_filter(&once, &FilterSpec::Grayscale).unwrap();
    assert_eq!(once, twice);

    for y in 0..11 {
        for x in 0..13 {
            let p = once.pixel(x, y);
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], src.pixel(x, y)[3]);
        }
    }
}

#[test]
fn grayscale_mid_gray_is_unchanged() {
    let src = RasterBuffer::from_pixel(4, 4, [128, 128, 128, 255]).unwrap();
    assert_eq!(apply_filter(&src, &FilterSpec::Grayscale).unwrap(), src);
}

#[test]
fn blur_radius_zero_is_identity() {
    let src = noisy(9, 9, 2);
    assert_eq!(apply_filter(&src, &FilterSpec::Blur { radius: 0 }).unwrap(), src);
}

#[test]
fn blur_preserves_uniform_colour_including_edges() {
    let src = RasterBuffer::from_pixel(6, 4, [12, 200, 77, 180]).unwrap();
    assert_eq!(apply_filter(&src, &FilterSpec::Blur { radius: 1 }).unwrap(), src);
}

#[test]
fn sharpen_and_edge_detect_leave_border_untouched() {
    let src = noisy(10, 8, 3);
    for spec in [FilterSpec::Sharpen, FilterSpec::EdgeDetect] {
        let out = apply_filter(&src, &spec).unwrap();
        for (x, y) in border_pixels(10, 8) {
            assert_eq!(out.pixel(x, y), src.pixel(x, y), "{spec} at ({x}, {y})");
        }
    }
}

#[test]
fn edge_detect_interior_is_gray_with_source_alpha() {
    let src = noisy(12, 12, 4);
    let out = apply_filter(&src, &FilterSpec::EdgeDetect).unwrap();
    for y in 1..11 {
        for x in 1..11 {
            let p = out.pixel(x, y);
            assert!(p[0] == p[1] && p[1] == p[2], "({x}, {y}) = {p:?}");
            assert_eq!(p[3], src.pixel(x, y)[3]);
        }
    }
}

#[test]
fn edge_detect_three_by_three_has_one_interior_pixel() {
    let mut src = RasterBuffer::from_pixel(3, 3, [0, 0, 0, 255]).unwrap();
    src.put_pixel(1, 1, [255, 255, 255, 200]);
    let out = apply_filter(&src, &FilterSpec::EdgeDetect).unwrap();
    // Only (1, 1) is interior; the Sobel kernels ignore the centre sample and
    // all eight neighbours match, so the gradient is zero there.
    assert_eq!(out.pixel(1, 1), [0, 0, 0, 200]);
    for (x, y) in border_pixels(3, 3) {
        assert_eq!(out.pixel(x, y), [0, 0, 0, 255]);
    }
}

#[test]
fn edge_detect_clamps_strong_step_to_white() {
    // Horizontal step: dark top row, bright bottom row.
    let src = RasterBuffer::from_fn(5, 3, |_, y| {
        if y == 2 {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
    .unwrap();
    let out = apply_filter(&src, &FilterSpec::EdgeDetect).unwrap();
    for x in 1..4 {
        assert_eq!(out.pixel(x, 1), [255, 255, 255, 255]);
    }
}

#[test]
fn sharpen_clamps_adversarial_neighbourhoods() {
    let engine = PixelFilterEngine::default();
    let black_centre = RasterBuffer::from_fn(5, 5, |x, y| {
        if (x, y) == (2, 2) {
            [0, 0, 0, 255]
        } else {
            [255, 255, 255, 255]
        }
    })
    .unwrap();
    let white_centre = RasterBuffer::from_fn(5, 5, |x, y| {
        if (x, y) == (2, 2) {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
    .unwrap();

    let dark = engine.apply_filter(&black_centre, &FilterSpec::Sharpen).unwrap();
    let bright = engine.apply_filter(&white_centre, &FilterSpec::Sharpen).unwrap();
    assert_eq!(dark.pixel(2, 2), [0, 0, 0, 255]);
    assert_eq!(bright.pixel(2, 2), [255, 255, 255, 255]);
    // Direct neighbours of the white centre: 5*0 - 255 = -255, clamped to 0.
    assert_eq!(bright.pixel(2, 1), [0, 0, 0, 255]);
    // Direct neighbours of the black centre: 5*255 - 3*255 = 510, clamped to 255.
    assert_eq!(dark.pixel(2, 1), [255, 255, 255, 255]);
}

#[test]
fn pixelate_block_one_is_identity() {
    let src = noisy(7, 5, 6);
    assert_eq!(apply_filter(&src, &FilterSpec::Pixelate { block_size: 1 }).unwrap(), src);
}

#[test]
fn pixelate_tiles_are_uniform() {
    let src = noisy(10, 7, 7);
    let block = 3;
    let out = apply_filter(&src, &FilterSpec::Pixelate { block_size: block }).unwrap();
    for y in 0..7 {
        for x in 0..10 {
            let anchor = out.pixel(x / block * block, y / block * block);
            assert_eq!(out.pixel(x, y), anchor, "({x}, {y})");
        }
    }
}

#[test]
fn pixelate_checkerboard_becomes_gray_blocks() {
    let src = RasterBuffer::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            [0, 0, 0, 255]
        } else {
            [255, 255, 255, 255]
        }
    })
    .unwrap();
    let out = apply_filter(&src, &FilterSpec::Pixelate { block_size: 2 }).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            // 510 / 4 = 127.5, rounded half up.
            assert_eq!(out.pixel(x, y), [128, 128, 128, 255]);
        }
    }
}

#[test]
fn glitch_is_reproducible_only_with_the_same_seed() {
    let engine = PixelFilterEngine::default();
    let src = noisy(120, 60, 8);
    let spec = FilterSpec::Glitch { intensity: 0.6 };
    let a = engine.apply_filter_with_rng(&src, &spec, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = engine.apply_filter_with_rng(&src, &spec, &mut StdRng::seed_from_u64(1)).unwrap();
    let c = engine.apply_filter_with_rng(&src, &spec, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn invalid_buffers_never_reach_a_filter() {
    assert!(matches!(
        RasterBuffer::new(3, 3, vec![0; 35]),
        Err(RasterError::InvalidDimension { width: 3, height: 3, len: 35 })
    ));
    assert!(matches!(
        RasterBuffer::new(0, 0, Vec::new()),
        Err(RasterError::InvalidDimension { .. })
    ));
}

#[test]
fn pipeline_through_png_surface() {
    let engine = PixelFilterEngine::default();
    let src = noisy(20, 10, 9);
    let png = surface::to_png_bytes(&src).unwrap();

    let pipeline = FilterPipeline::parse("grayscale,blur:1,sharpen", &engine).unwrap();
    let decoded = surface::decode(&png).unwrap();
    let out = pipeline.apply(&engine, &decoded).unwrap();

    let expected = [FilterSpec::Grayscale, FilterSpec::Blur { radius: 1 }, FilterSpec::Sharpen]
        .iter()
        .try_fold(src, |buf, spec| apply_filter(&buf, spec))
        .unwrap();
    assert_eq!(out, expected);
}
