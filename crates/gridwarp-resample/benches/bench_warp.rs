use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridwarp_raster::{FillPolicy, NoData, Raster, RasterDesc, RasterMut};
use gridwarp_resample::{
    affine::get_rotation_matrix2d,
    parallel::warp_rows_par,
    warp::{AffineWarp, ResamplingKernel},
};

fn bench_warp_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpAffine");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 256) as u8).collect();
        let m = get_rotation_matrix2d((*width as f64 / 2.0, *height as f64 / 2.0), 45.0, 1.0);

        for (label, kernel) in [
            ("nearest", ResamplingKernel::Nearest),
            ("bilinear", ResamplingKernel::Bilinear),
        ] {
            let engine =
                AffineWarp::new(&m, 3, kernel, None, FillPolicy::fill(vec![0u8, 0, 0])).unwrap();
            group.bench_with_input(
                BenchmarkId::new(label, &parameter_string),
                &(&data, &engine),
                |b, i| {
                    let (data, engine) = (i.0, i.1);
                    let src =
                        Raster::new(RasterDesc::interleaved(*width, *height, 3), data).unwrap();
                    let mut out = vec![0u8; width * height * 3];
                    b.iter(|| {
                        let mut dst =
                            RasterMut::new(RasterDesc::interleaved(*width, *height, 3), &mut out)
                                .unwrap();
                        engine
                            .warp(black_box(&src), None, black_box(&mut dst))
                            .unwrap()
                    })
                },
            );
        }

        // no-data classification adds a per-tap predicate
        let engine = AffineWarp::new(
            &m,
            3,
            ResamplingKernel::Bilinear,
            Some(NoData::range(10u8, 20u8)),
            FillPolicy::fill(vec![0u8, 0, 0]),
        )
        .unwrap();
        group.bench_with_input(
            BenchmarkId::new("bilinear_nodata", &parameter_string),
            &(&data, &engine),
            |b, i| {
                let (data, engine) = (i.0, i.1);
                let src = Raster::new(RasterDesc::interleaved(*width, *height, 3), data).unwrap();
                let mut out = vec![0u8; width * height * 3];
                b.iter(|| {
                    let mut dst =
                        RasterMut::new(RasterDesc::interleaved(*width, *height, 3), &mut out)
                            .unwrap();
                    engine
                        .warp(black_box(&src), None, black_box(&mut dst))
                        .unwrap()
                })
            },
        );

        let engine = AffineWarp::new(
            &m,
            3,
            ResamplingKernel::Bilinear,
            None,
            FillPolicy::fill(vec![0u8, 0, 0]),
        )
        .unwrap();
        group.bench_with_input(
            BenchmarkId::new("bilinear_par_rows", &parameter_string),
            &(&data, &engine),
            |b, i| {
                let (data, engine) = (i.0, i.1);
                let src = Raster::new(RasterDesc::interleaved(*width, *height, 3), data).unwrap();
                let mut out = vec![0u8; width * height * 3];
                b.iter(|| {
                    let mut dst =
                        RasterMut::new(RasterDesc::interleaved(*width, *height, 3), &mut out)
                            .unwrap();
                    warp_rows_par(black_box(engine), black_box(&src), None, &mut dst).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_affine);
criterion_main!(benches);
