//! Frustum culling over a generated terrain

use std::collections::HashSet;
use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec3};
use hovercraft_world::{Aabb, Frustum, Intersection, NodeKind, Terrain, TerrainConfig, VERTICES_PER_CELL};

fn terrain() -> Terrain {
    Terrain::new(TerrainConfig { cells_dim: 4 }).expect("4×4 terrain builds")
}

fn leaf_boxes(terrain: &Terrain) -> Vec<(u32, Aabb)> {
    terrain
        .quadtree()
        .nodes()
        .iter()
        .filter_map(|node| match node.kind {
            NodeKind::Leaf { base_vertex } => Some((base_vertex, node.aabb)),
            NodeKind::Internal { .. } => None,
        })
        .collect()
}

#[test]
fn test_bounding_frustum_returns_every_cell_once() {
    let mut terrain = terrain();
    let size = terrain.terrain_size();
    terrain.cull_view_proj(&Mat4::orthographic_lh(0.0, size, -100.0, 100.0, 0.0, size));

    let visible = terrain.visible_cells();
    assert_eq!(visible.len(), 16, "Every cell should be visible");

    let unique: HashSet<u32> = visible.iter().copied().collect();
    assert_eq!(unique.len(), 16, "No cell may be listed twice");
    for base in unique {
        assert_eq!(base % VERTICES_PER_CELL, 0, "{} is not a block start", base);
    }
}

#[test]
fn test_camera_culling_is_sound() {
    let mut terrain = terrain();
    let centre = terrain.terrain_size() * 0.5;
    let eye = Vec3::new(centre, 60.0, 20.0);
    let view = Mat4::look_at_lh(eye, Vec3::new(centre, 0.0, 200.0), Vec3::Y);
    let proj = Mat4::perspective_lh(FRAC_PI_4, 4.0 / 3.0, 1.0, 350.0);
    let frustum = Frustum::extract(&(proj * view), false);

    terrain.cull(&frustum);
    let visible: HashSet<u32> = terrain.visible_cells().iter().copied().collect();
    assert!(!visible.is_empty(), "Something must be in view");
    assert!(visible.len() < 16, "Cells behind the camera must be culled");

    for (base, aabb) in leaf_boxes(&terrain) {
        match frustum.classify(&aabb) {
            Intersection::Outside => assert!(
                !visible.contains(&base),
                "Cell {} is outside but was listed",
                base
            ),
            Intersection::Inside => assert!(
                visible.contains(&base),
                "Cell {} is inside but was dropped",
                base
            ),
            Intersection::Intersecting => {}
        }
    }
}

#[test]
fn test_inside_subtree_lists_all_leaves() {
    let terrain = terrain();
    let tree = terrain.quadtree();
    // Frustum far larger than the terrain: the root is inside
    let frustum = Frustum::extract(
        &Mat4::orthographic_lh(-1000.0, 2000.0, -500.0, 500.0, -1000.0, 2000.0),
        false,
    );
    assert_eq!(frustum.classify(&tree.node(tree.root()).aabb), Intersection::Inside);

    let visible = tree.visible(&frustum);
    let mut all = Vec::new();
    tree.add_all_nodes(tree.root(), &mut all);
    assert_eq!(visible, all, "Inside roots list leaves in depth-first order");
}

#[test]
fn test_frustum_away_from_terrain_sees_nothing() {
    let mut terrain = terrain();
    let view = Mat4::look_at_lh(Vec3::new(-50.0, 0.0, -50.0), Vec3::new(-100.0, 0.0, -100.0), Vec3::Y);
    let proj = Mat4::perspective_lh(FRAC_PI_4, 1.0, 1.0, 350.0);
    terrain.cull_view_proj(&(proj * view));

    assert_eq!(terrain.visible_cell_count(), 0);
}
