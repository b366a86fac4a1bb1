//! Seeded groves of simple trees scattered over the terrain.
use std::f32::consts::TAU;

use bevy::prelude::*;
use constants::terrain::TRACK_CLEARANCE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::mesh_builder::solid_material;
use super::structures::{in_bridge_zone, in_tunnel_zone};
use super::terrain::HeightField;
use crate::constants::render_settings::{LEAF_COLOR, TRUNK_COLOR};
use crate::engine::assets::scene_config::ForestConfig;
use crate::engine::track::CurvePath;

const TRUNK_RADIUS: f32 = 0.8;
const TRUNK_HEIGHT: f32 = 7.0;
const CROWN_RADIUS: f32 = 4.5;

/// Grove centre (x, z), radius and share of the total tree count.
const GROVES: [(Vec2, f32, f32); 5] = [
    (Vec2::new(320.0, 200.0), 100.0, 0.25),
    (Vec2::new(-120.0, 40.0), 120.0, 0.25),
    (Vec2::new(180.0, -170.0), 80.0, 0.15),
    (Vec2::new(-320.0, -160.0), 100.0, 0.15),
    (Vec2::new(60.0, 320.0), 110.0, 0.2),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePlacement {
    pub position: Vec3,
    pub size: f32,
    pub rotation: f32,
}

/// Tree placements for `config`. The same seed always yields the same forest.
///
/// Candidates on the track, in water, on the bridge or over the tunnel are dropped.
pub fn plan_forest(
    config: &ForestConfig,
    track: &CurvePath,
    field: &HeightField,
    water_level: f32,
) -> Vec<TreePlacement> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let track_points: Vec<Vec2> = track
        .sample_every(4.0)
        .into_iter()
        .map(|sample| sample.point.xz())
        .collect();
    let clearance = TRACK_CLEARANCE + CROWN_RADIUS;
    let (min_size, max_size) = (config.min_size.min(config.max_size), config.min_size.max(config.max_size));

    let mut trees = Vec::with_capacity(config.tree_count);
    for (center, radius, share) in GROVES {
        let count = (config.tree_count as f32 * share).round() as usize;
        for _ in 0..count {
            // Draw every value so rejections do not shift later trees.
            let size = min_size + rng.gen_range(0.0..=1.0) * (max_size - min_size);
            let rotation = rng.gen_range(0.0..TAU);
            let rho = rng.gen_range(0.0..radius);
            let theta = rng.gen_range(0.0..TAU);

            let xz = center + Vec2::new(rho * theta.sin(), rho * theta.cos());
            if !field.contains(xz.x, xz.y) || in_bridge_zone(xz.x, xz.y) || in_tunnel_zone(xz.x, xz.y) {
                continue;
            }
            if track_points.iter().any(|point| point.distance(xz) < clearance) {
                continue;
            }
            let ground = field.height_at(xz.x, xz.y);
            if ground < water_level + 1.0 {
                continue;
            }
            trees.push(TreePlacement {
                position: Vec3::new(xz.x, ground, xz.y),
                size,
                rotation,
            });
        }
    }
    trees
}

pub fn spawn_forest(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    trees: &[TreePlacement],
) {
    let trunk_mesh = meshes.add(Cylinder::new(TRUNK_RADIUS, TRUNK_HEIGHT));
    let crown_mesh = meshes.add(Sphere::new(CROWN_RADIUS).mesh().uv(12, 8));
    let trunk_material = materials.add(solid_material(TRUNK_COLOR, 1.0));
    let crown_material = materials.add(solid_material(LEAF_COLOR, 0.85));

    let root = commands
        .spawn((Transform::IDENTITY, Visibility::default(), Name::new("Forest")))
        .id();
    for tree in trees {
        let tree_entity = commands
            .spawn((
                Transform::from_translation(tree.position)
                    .with_rotation(Quat::from_rotation_y(tree.rotation))
                    .with_scale(Vec3::splat(tree.size)),
                Visibility::default(),
            ))
            .with_children(|parts| {
                parts.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, TRUNK_HEIGHT / 2.0, 0.0),
                ));
                parts.spawn((
                    Mesh3d(crown_mesh.clone()),
                    MeshMaterial3d(crown_material.clone()),
                    Transform::from_xyz(0.0, TRUNK_HEIGHT + CROWN_RADIUS * 0.6, 0.0)
                        .with_scale(Vec3::new(1.0, 1.3, 1.0)),
                ));
            })
            .id();
        commands.entity(root).add_child(tree_entity);
    }
    info!("✓ Forest planted: {} trees", trees.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::track::TRACK_CONTROL_POINTS;

    fn inputs() -> (ForestConfig, CurvePath, HeightField) {
        let config = ForestConfig {
            seed: 7,
            tree_count: 200,
            min_size: 0.8,
            max_size: 1.3,
        };
        let track = CurvePath::from_control_points(&TRACK_CONTROL_POINTS).unwrap();
        let field = HeightField::from_fn(1024.0, 64, |x, _| if x < -200.0 { 10.0 } else { 50.0 });
        (config, track, field)
    }

    #[test]
    fn same_seed_plants_the_same_forest() {
        let (config, track, field) = inputs();
        let first = plan_forest(&config, &track, &field, 30.0);
        let second = plan_forest(&config, &track, &field, 30.0);
        assert!(!first.is_empty());
        assert_eq!(first, second);

        let other = plan_forest(&ForestConfig { seed: 8, ..config }, &track, &field, 30.0);
        assert_ne!(first, other);
    }

    #[test]
    fn trees_stay_dry_and_off_the_track() {
        let (config, track, field) = inputs();
        let trees = plan_forest(&config, &track, &field, 30.0);
        let track_points: Vec<Vec2> = track.sample_every(4.0).iter().map(|s| s.point.xz()).collect();
        for tree in &trees {
            assert!(tree.position.y > 30.0);
            assert!((config.min_size..=config.max_size).contains(&tree.size));
            let nearest = track_points
                .iter()
                .map(|p| p.distance(tree.position.xz()))
                .fold(f32::MAX, f32::min);
            assert!(nearest >= TRACK_CLEARANCE);
        }
    }
}
