use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cornerness_image::Image;
use cornerness_imgproc::features::{HarrisConfig, HarrisDetector};
use cornerness_imgproc::parallel::ExecutionStrategy;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(width: usize, height: usize, seed: u64) -> Image<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| rng.random_range(0.0..1.0))
        .collect();
    Image::new([width, height].into(), data).unwrap()
}

fn bench_harris(c: &mut Criterion) {
    let mut group = c.benchmark_group("harris_detect");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        let image = random_image(*width, *height, 42);
        group.throughput(Throughput::Elements((*width * *height) as u64));

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("parallel_rows", ExecutionStrategy::ParallelRows),
        ] {
            let detector =
                HarrisDetector::new(HarrisConfig::default().with_strategy(strategy)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(name, format!("{width}x{height}")),
                &image,
                |b, image| b.iter(|| std::hint::black_box(detector.detect(image).unwrap())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_harris);
criterion_main!(benches);
