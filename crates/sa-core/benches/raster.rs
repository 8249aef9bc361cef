use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sa_core::{Point2i, rasterize_into};

fn bench_rasterize_chords(c: &mut Criterion) {
    let size = 800i32;
    let n = 200usize;
    let r = (size / 2 - 1) as f64;
    let hooks: Vec<Point2i> = (0..n)
        .map(|i| {
            let theta = core::f64::consts::TAU * i as f64 / n as f64;
            Point2i::round_from(
                size as f64 / 2.0 + r * theta.cos(),
                size as f64 / 2.0 + r * theta.sin(),
            )
        })
        .collect();
    let mut buf = Vec::new();

    c.bench_function("rasterize_fan_200_hooks_800px", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for &end in &hooks[1..] {
                rasterize_into(black_box(hooks[0]), black_box(end), &mut buf)
                    .expect("distinct hooks");
                total += buf.len();
            }
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_rasterize_chords);
criterion_main!(benches);
