//! Benchmark for quadtree visibility queries
//!
//! Builds a full-size terrain once and measures culling for a chase-style
//! camera and for a frustum covering everything.

use std::f32::consts::FRAC_PI_4;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec3};
use hovercraft_world::{Frustum, Terrain, TerrainConfig};

fn bench_culling(c: &mut Criterion) {
    let terrain = Terrain::new(TerrainConfig::default()).expect("default terrain builds");
    let tree = terrain.quadtree();
    let centre = terrain.terrain_size() * 0.5;

    let view = Mat4::look_at_lh(
        Vec3::new(centre - 30.0, 40.0, centre - 30.0),
        Vec3::new(centre, 30.0, centre),
        Vec3::Y,
    );
    let proj = Mat4::perspective_lh(FRAC_PI_4, 4.0 / 3.0, 1.0, 350.0);
    let chase = Frustum::extract(&(proj * view), false);

    let size = terrain.terrain_size();
    let everything = Frustum::extract(&Mat4::orthographic_lh(0.0, size, -100.0, 100.0, 0.0, size), false);

    let mut group = c.benchmark_group("quadtree_cull");
    let mut out = Vec::with_capacity(1024);

    group.bench_function("chase_camera", |b| {
        b.iter(|| {
            out.clear();
            tree.add_visible_nodes(tree.root(), black_box(&chase), &mut out);
            out.len()
        })
    });

    group.bench_function("whole_terrain", |b| {
        b.iter(|| {
            out.clear();
            tree.add_visible_nodes(tree.root(), black_box(&everything), &mut out);
            out.len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_culling);
criterion_main!(benches);
