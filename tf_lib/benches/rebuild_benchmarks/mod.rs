//! Benchmarks of table rebuilds

pub mod function;
pub mod preintegration;
