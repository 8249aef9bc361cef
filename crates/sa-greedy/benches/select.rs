use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sa_core::Image;
use sa_greedy::{GreedyConfig, fit_strings};
use sa_hooks::circle_hooks;

fn build_rings(size: usize) -> Image<f32> {
    let c = size as f32 / 2.0;
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let r = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
            data.push(0.5 + 0.5 * (r / 6.0).sin());
        }
    }
    Image::from_vec(size, size, data).expect("valid image")
}

fn bench_select(c: &mut Criterion) {
    let img = build_rings(300);
    let view = img.as_view();
    let hooks = circle_hooks(300, 300, 150).expect("valid layout");

    for parallel in [false, true] {
        let cfg = GreedyConfig {
            num_strings: 200,
            hook_distance: 10,
            parallel,
            ..GreedyConfig::default()
        };
        let name = if parallel {
            "greedy_200_strings_150_hooks_300px_par"
        } else {
            "greedy_200_strings_150_hooks_300px_seq"
        };

        c.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(1);
                let out = fit_strings(black_box(&view), &hooks, cfg.clone(), &mut rng)
                    .expect("run completes");
                black_box(out.order.len());
            });
        });
    }
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
