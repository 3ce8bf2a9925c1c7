// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the filter kernels in the rasterwerk-filter crate.
// Each filter runs over a 256x256 synthetic gradient; blur is measured at two
// radii to show that the summed-area table keeps its cost flat.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rasterwerk_filter::{FilterSpec, PixelFilterEngine, RasterBuffer};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn gradient(size: u32) -> RasterBuffer {
    RasterBuffer::from_fn(size, size, |x, y| {
        [x as u8, y as u8, (x ^ y) as u8, 255]
    })
    .expect("non-zero benchmark image")
}

/// Benchmark every filter kind on a 256x256 image.
fn bench_filters(c: &mut Criterion) {
    let engine = PixelFilterEngine::default();
    let src = gradient(256);

    let mut group = c.benchmark_group("filters (256x256)");
    for spec in [
        FilterSpec::Grayscale,
        FilterSpec::Blur { radius: 2 },
        FilterSpec::Blur { radius: 16 },
        FilterSpec::Sharpen,
        FilterSpec::EdgeDetect,
        FilterSpec::Pixelate { block_size: 8 },
        FilterSpec::Glitch { intensity: 0.5 },
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(spec), &spec, |b, spec| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| {
                let out = engine
                    .apply_filter_with_rng(black_box(&src), spec, &mut rng)
                    .expect("valid spec");
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
