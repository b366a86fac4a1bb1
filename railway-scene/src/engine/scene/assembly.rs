//! Composes the whole scene once the config is known and registers every camera rig.
use bevy::prelude::*;
use constants::camera::{
    FALLBACK_CAMERA_LOOK_AT, FALLBACK_CAMERA_POSITION, SLOT_LAKE, SLOT_OVERVIEW, SLOT_WALKER, WALKER_LOOK_AT,
    WALKER_START,
};
use constants::terrain::{LAKE_CENTER, LAKE_RADIUS};
use constants::track::RAIL_HEIGHT_ABOVE_BED;
use constants::train::ORIGIN_ABOVE_RAIL;

use super::forest::{plan_forest, spawn_forest};
use super::lighting::{DayCycle, LightMaterials, spawn_sun};
use super::nodes::{NodeRegistry, SceneNode, spawn_marker};
use super::rails::spawn_railway;
use super::structures::{lamp_positions, spawn_bridge, spawn_lamps, spawn_tunnel};
use super::terrain::{HeightField, spawn_terrain};
use super::water::spawn_water;
use crate::controls::ControlPanel;
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::{CameraRigRegistry, RigMode};
use crate::engine::track::CurvePath;
use crate::engine::train::{TrainKinematics, spawn_train};

/// Height of the train origin for a rail bed at `rail_height`.
pub fn train_height(rail_height: f32) -> f32 {
    rail_height + RAIL_HEIGHT_ABOVE_BED + ORIGIN_ABOVE_RAIL
}

/// Register the rigs that are not tied to a structure or the train.
pub fn spawn_free_cameras(
    commands: &mut Commands,
    registry: &mut NodeRegistry,
    rigs: &mut CameraRigRegistry,
    water_level: f32,
) {
    spawn_marker(commands, registry, SceneNode::OverviewCamera, None, FALLBACK_CAMERA_POSITION);
    spawn_marker(commands, registry, SceneNode::OverviewTarget, None, FALLBACK_CAMERA_LOOK_AT);
    rigs.register(SLOT_OVERVIEW, SceneNode::OverviewCamera, SceneNode::OverviewTarget, RigMode::Orbital);

    // Walker heights are pinned to the eye height by the rig itself.
    let eye = rigs.eye_height;
    spawn_marker(commands, registry, SceneNode::WalkerStart, None, WALKER_START.with_y(eye));
    spawn_marker(commands, registry, SceneNode::WalkerTarget, None, WALKER_LOOK_AT.with_y(eye));
    rigs.register(SLOT_WALKER, SceneNode::WalkerStart, SceneNode::WalkerTarget, RigMode::FirstPerson);

    let lake = Vec3::new(LAKE_CENTER.x, water_level, LAKE_CENTER.y);
    spawn_marker(
        commands,
        registry,
        SceneNode::LakeCamera,
        None,
        lake + Vec3::new(LAKE_RADIUS, 45.0, LAKE_RADIUS * 0.5),
    );
    spawn_marker(commands, registry, SceneNode::LakeTarget, None, lake);
    rigs.register(SLOT_LAKE, SceneNode::LakeCamera, SceneNode::LakeTarget, RigMode::Orbital);
}

/// Build terrain, water, railway, forest, structures, lights and the train.
pub fn assemble_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
    panel: Res<ControlPanel>,
    track: Res<CurvePath>,
    time: Res<Time<Real>>,
) {
    let mut registry = NodeRegistry::default();
    let mut rigs = CameraRigRegistry::new(config.eye_height);
    let light_materials = LightMaterials::new(&mut materials);
    let rail_height = config.rail_height;

    let field = HeightField::generate(&track, rail_height);
    spawn_terrain(&mut commands, &mut meshes, &mut materials, &field, panel.water_level);
    spawn_water(&mut commands, &mut meshes, &mut materials, &mut registry, panel.water_level);
    spawn_railway(&mut commands, &mut meshes, &mut materials, &track, rail_height);

    let trees = plan_forest(&config.forest, &track, &field, panel.water_level);
    spawn_forest(&mut commands, &mut meshes, &mut materials, &trees);

    spawn_bridge(&mut commands, &mut meshes, &mut materials, &mut registry, &mut rigs, rail_height);
    spawn_tunnel(&mut commands, &mut meshes, &mut materials, &mut registry, &mut rigs, rail_height);
    let lamps = lamp_positions(&track, &field, config.lamp_spacing, panel.water_level);
    spawn_lamps(&mut commands, &mut meshes, &mut materials, &light_materials, &lamps, panel.lamp_lights);

    let cycle = DayCycle::new(config.sun_angle);
    spawn_sun(&mut commands, &mut registry, cycle, panel.shadows);

    let kinematics = TrainKinematics::new(time.elapsed_secs_f64(), panel.train_speed, train_height(rail_height))
        .with_max_frame_delta(config.max_frame_delta);
    spawn_train(
        &mut commands,
        &mut meshes,
        &mut materials,
        &light_materials,
        &mut registry,
        &mut rigs,
        kinematics.pose(&track).transform(),
        panel.train_light,
    );

    spawn_free_cameras(&mut commands, &mut registry, &mut rigs, panel.water_level);

    info!(
        "✓ Scene assembled: {} named nodes, camera slots {:?}",
        registry.len(),
        rigs.slots().collect::<Vec<_>>()
    );
    commands.insert_resource(registry);
    commands.insert_resource(rigs);
    commands.insert_resource(field);
    commands.insert_resource(cycle);
    commands.insert_resource(light_materials);
    commands.insert_resource(kinematics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn free_rigs_cover_overview_walker_and_lake() {
        let mut world = World::new();
        world
            .run_system_once(|mut commands: Commands| {
                let mut registry = NodeRegistry::default();
                let mut rigs = CameraRigRegistry::new(62.0);
                spawn_free_cameras(&mut commands, &mut registry, &mut rigs, 30.0);
                commands.insert_resource(registry);
                commands.insert_resource(rigs);
            })
            .unwrap();

        let rigs = world.resource::<CameraRigRegistry>();
        assert_eq!(rigs.slots().collect::<Vec<_>>(), vec![SLOT_OVERVIEW, SLOT_WALKER, SLOT_LAKE]);
        assert_eq!(rigs.get(SLOT_OVERVIEW).map(|rig| rig.mode), Some(RigMode::Orbital));
        assert_eq!(rigs.get(SLOT_WALKER).map(|rig| rig.mode), Some(RigMode::FirstPerson));

        let registry = world.resource::<NodeRegistry>();
        let walker = registry.get(SceneNode::WalkerStart).unwrap();
        let transform = world.get::<Transform>(walker).unwrap();
        assert_eq!(transform.translation.y, 62.0);
    }
}
