use bevy::prelude::*;
use constants::camera::{FALLBACK_CAMERA_LOOK_AT, FALLBACK_CAMERA_POSITION, FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE};

use super::input::RigInput;
use super::rig::{CameraControllers, CameraRigRegistry, NodeLookup, Selection};
use crate::controls::ControlPanel;
use crate::engine::scene::nodes::{NodeRegistry, SceneNode};

/// Marks the single live camera driven by the rig registry.
#[derive(Component)]
pub struct RigCamera;

/// Scene nodes resolved through the [`NodeRegistry`] and their propagated transforms.
struct WorldNodes<'a, 'w, 's> {
    registry: &'a NodeRegistry,
    transforms: &'a Query<'w, 's, &'static GlobalTransform, Without<RigCamera>>,
}

impl NodeLookup for WorldNodes<'_, '_, '_> {
    fn world_position(&self, node: SceneNode) -> Option<Vec3> {
        let entity = self.registry.get(node)?;
        self.transforms.get(entity).ok().map(GlobalTransform::translation)
    }
}

pub fn spawn_rig_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(FALLBACK_CAMERA_POSITION).looking_at(FALLBACK_CAMERA_LOOK_AT, Vec3::Y),
        RigCamera,
        Name::new("RigCamera"),
    ));
}

/// Switch rigs when the selected slot on the control panel differs from the active one.
///
/// Runs after transform propagation so anchors on moving nodes are current.
pub fn sync_camera_selection(
    panel: Res<ControlPanel>,
    mut registry: ResMut<CameraRigRegistry>,
    mut controllers: ResMut<CameraControllers>,
    node_registry: Res<NodeRegistry>,
    transforms: Query<&'static GlobalTransform, Without<RigCamera>>,
    mut camera: Query<(&mut Transform, &mut GlobalTransform), With<RigCamera>>,
    mut placed: Local<bool>,
) -> Result {
    if *placed && panel.camera == registry.active_slot() {
        return Ok(());
    }

    let (mut transform, mut global) = camera.single_mut()?;
    let nodes = WorldNodes {
        registry: &node_registry,
        transforms: &transforms,
    };

    match registry.select(panel.camera, &nodes, &mut transform, &mut controllers) {
        Selection::Rig(mode) => info!("Camera {} selected ({:?})", panel.camera, mode),
        Selection::Fallback => warn!("Camera {} is not registered, using default view", panel.camera),
    }
    *global = GlobalTransform::from(*transform);
    *placed = true;
    Ok(())
}

pub fn update_camera_rig(
    time: Res<Time>,
    input: Res<RigInput>,
    registry: Res<CameraRigRegistry>,
    mut controllers: ResMut<CameraControllers>,
    node_registry: Res<NodeRegistry>,
    transforms: Query<&'static GlobalTransform, Without<RigCamera>>,
    mut camera: Query<(&mut Transform, &mut GlobalTransform), With<RigCamera>>,
) -> Result {
    let (mut transform, mut global) = camera.single_mut()?;
    let nodes = WorldNodes {
        registry: &node_registry,
        transforms: &transforms,
    };

    registry.update(time.delta_secs(), &input, &nodes, &mut transform, &mut controllers);
    // Propagation already ran this frame; keep the rendered pose in step.
    *global = GlobalTransform::from(*transform);
    Ok(())
}
