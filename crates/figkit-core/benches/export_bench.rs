use anyhow::Result;
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use figkit_core::{subplots, Figure, FigureOptions, ImageFormat, SubplotOptions};

fn build_grid(n: usize) -> Figure {
    let opts = SubplotOptions::new(2, 2)
        .figsize(8.0, 5.0)
        .figure(FigureOptions::default().constrained_layout(false));
    let (fig, panels) = subplots(&opts).expect("2x2 grid");
    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    for (k, p) in panels.iter().enumerate() {
        let ys: Vec<f64> = xs.iter().map(|x| (x * 0.01 + k as f64).sin() * 10.0 + x * 0.0001).collect();
        p.plot(&xs, &ys).expect("plot");
    }
    fig
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_png_bytes");
    for &n in &[1_000usize, 10_000usize] {
        group.bench_function(format!("grid2x2_{n}"), |b| {
            let fig = build_grid(n);
            b.iter(|| -> Result<()> {
                let bytes = fig.encode(ImageFormat::Png, 100)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
