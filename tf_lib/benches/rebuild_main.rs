use criterion::{criterion_group, criterion_main, Criterion};
use rebuild_benchmarks::{function::*, preintegration::*};

mod rebuild_benchmarks;

criterion_group! {
    name = function;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = rebuild_function_default, rebuild_function_many_points
}

criterion_group! {
    name = preintegration;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = rebuild_preintegration_256, rebuild_preintegration_1024
}

criterion_main!(function, preintegration);
