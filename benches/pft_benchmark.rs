use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num::complex::Complex;
use rwg_pft::shapes::regular_sphere;
use rwg_pft::{PftOptions, RwgGeometry, SurfaceCurrents};

pub fn pft_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pft");
    group.sample_size(20);

    for i in 3..6 {
        let geometry = RwgGeometry::in_vacuum(vec![regular_sphere::<f64>(i)]);
        let kn = (0..geometry.total_bfs())
            .map(|n| Complex::new(f64::cos(n as f64), f64::sin(0.5 * n as f64)))
            .collect::<Vec<_>>();
        let currents = SurfaceCurrents::coefficients(&kn);
        let omega = Complex::new(1.0, 0.0);

        for parallel in [true, false] {
            let mut options = PftOptions::default();
            options.set_parallel(parallel);
            group.bench_function(
                format!(
                    "PFT of {} basis functions ({})",
                    geometry.total_bfs(),
                    if parallel { "parallel" } else { "serial" }
                ),
                |b| b.iter(|| black_box(geometry.get_pft(0, omega, &currents, &options))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, pft_benchmark);
criterion_main!(benches);
