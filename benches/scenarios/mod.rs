//! Benchmarks for full workbench renders.

mod render;

pub use render::bench_render;
