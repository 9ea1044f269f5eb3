use criterion::Criterion;
use tf_lib::{test_helpers, CurveOptions, MemoryTextures};

fn bench_preintegration(c: &mut Criterion, resolution: usize) {
    let (mut curve, _, _) = test_helpers::bump_curve(CurveOptions::new(resolution, false));
    let mut sink = MemoryTextures::new();
    curve.rebuild_function(&mut sink);

    c.bench_function(&format!("preintegrate, resolution {}", resolution), |b| {
        b.iter(|| curve.rebuild_preintegration(&mut sink));
    });
}

pub fn rebuild_preintegration_256(c: &mut Criterion) {
    bench_preintegration(c, 256);
}

pub fn rebuild_preintegration_1024(c: &mut Criterion) {
    bench_preintegration(c, 1024);
}
