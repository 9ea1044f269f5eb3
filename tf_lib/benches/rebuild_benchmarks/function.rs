use criterion::Criterion;
use nalgebra::point;
use tf_lib::{Curve, CurveOptions, MemoryTextures};

pub fn rebuild_function_default(c: &mut Criterion) {
    let mut curve = Curve::default();
    let mut sink = MemoryTextures::new();

    c.bench_function("rebuild function, 2 points", |b| {
        b.iter(|| curve.rebuild_function(&mut sink));
    });
}

pub fn rebuild_function_many_points(c: &mut Criterion) {
    let mut curve = Curve::new("many", CurveOptions::default());
    for i in 1..64 {
        let x = i as f32 / 64.0;
        curve.add(point![x, (x * 20.0).sin() * 0.5 + 0.5]);
    }
    let mut sink = MemoryTextures::new();

    c.bench_function("rebuild function, 65 points", |b| {
        b.iter(|| curve.rebuild_function(&mut sink));
    });
}
