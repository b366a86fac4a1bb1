use bevy::prelude::*;
use constants::terrain::TERRAIN_SIZE;

use super::nodes::{NodeRegistry, SceneNode, spawn_named};
use crate::constants::render_settings::WATER_COLOR;
use crate::controls::ControlPanel;

#[derive(Component)]
pub struct Water;

/// One translucent sheet over the whole map; the terrain decides where it shows.
pub fn spawn_water(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &mut NodeRegistry,
    level: f32,
) {
    let [r, g, b, a] = WATER_COLOR;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(r, g, b, a),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.08,
        reflectance: 0.6,
        ..default()
    });
    let mesh = meshes.add(Plane3d::default().mesh().size(TERRAIN_SIZE, TERRAIN_SIZE));

    spawn_named(
        commands,
        registry,
        SceneNode::Water,
        (
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, level, 0.0),
            Water,
        ),
    );
}

pub fn sync_water_level(panel: Res<ControlPanel>, mut water: Query<&mut Transform, With<Water>>) {
    for mut transform in &mut water {
        if transform.translation.y != panel.water_level {
            transform.translation.y = panel.water_level;
        }
    }
}
