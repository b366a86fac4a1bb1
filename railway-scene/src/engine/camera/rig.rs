use std::collections::BTreeMap;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use constants::camera::{FALLBACK_CAMERA_LOOK_AT, FALLBACK_CAMERA_POSITION};
use serde::{Deserialize, Serialize};

use super::first_person::FirstPersonController;
use super::input::RigInput;
use super::orbit::OrbitController;
use crate::engine::scene::nodes::SceneNode;

/// How a rig drives the live camera while selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigMode {
    /// Pose copied once on selection.
    Fixed,
    /// Pose re-copied every frame from a moving anchor.
    Attached,
    /// Orbit controller around the target.
    Orbital,
    /// Walk-around controller with a pinned eye height.
    FirstPerson,
}

/// A camera placement: where the camera sits, what it looks at and how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub anchor: SceneNode,
    pub target: SceneNode,
    pub mode: RigMode,
}

/// Outcome of [`CameraRigRegistry::select`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Rig(RigMode),
    /// Slot empty or its nodes are gone; the default pose was applied.
    Fallback,
}

/// World positions of scene nodes, as seen by the rig registry.
pub trait NodeLookup {
    fn world_position(&self, node: SceneNode) -> Option<Vec3>;
}

impl NodeLookup for HashMap<SceneNode, Vec3> {
    fn world_position(&self, node: SceneNode) -> Option<Vec3> {
        self.get(&node).copied()
    }
}

/// The interactive controllers. At most one is enabled.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraControllers {
    pub orbit: OrbitController,
    pub first_person: FirstPersonController,
}

impl CameraControllers {
    fn enable_for(&mut self, mode: Option<RigMode>) {
        self.orbit.enabled = mode == Some(RigMode::Orbital);
        self.first_person.enabled = mode == Some(RigMode::FirstPerson);
    }
}

/// Slot-indexed camera rigs and the currently selected slot.
#[derive(Resource, Debug, Clone)]
pub struct CameraRigRegistry {
    rigs: BTreeMap<u8, CameraRig>,
    active_slot: u8,
    /// Camera height enforced every frame while a first-person rig is active.
    pub eye_height: f32,
}

impl CameraRigRegistry {
    pub fn new(eye_height: f32) -> Self {
        Self {
            rigs: BTreeMap::new(),
            active_slot: 0,
            eye_height,
        }
    }

    /// Register a rig, replacing whatever was in `slot`.
    pub fn register(
        &mut self,
        slot: u8,
        anchor: SceneNode,
        target: SceneNode,
        mode: RigMode,
    ) -> Option<CameraRig> {
        self.rigs.insert(
            slot,
            CameraRig {
                anchor,
                target,
                mode,
            },
        )
    }

    pub fn get(&self, slot: u8) -> Option<&CameraRig> {
        self.rigs.get(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = u8> + '_ {
        self.rigs.keys().copied()
    }

    pub fn active_slot(&self) -> u8 {
        self.active_slot
    }

    pub fn active_rig(&self) -> Option<&CameraRig> {
        self.rigs.get(&self.active_slot)
    }

    /// Make `slot` current and move the camera onto its rig.
    pub fn select(
        &mut self,
        slot: u8,
        nodes: &impl NodeLookup,
        camera: &mut Transform,
        controllers: &mut CameraControllers,
    ) -> Selection {
        self.active_slot = slot;

        let Some((rig, anchor, target)) = self.resolve_active(nodes) else {
            apply_fallback(camera);
            controllers.enable_for(None);
            return Selection::Fallback;
        };

        place(camera, anchor, target);
        controllers.enable_for(Some(rig.mode));
        match rig.mode {
            RigMode::Orbital => controllers.orbit.retarget(anchor, target),
            RigMode::FirstPerson => {
                camera.translation.y = self.eye_height;
                controllers.first_person.align(camera);
            }
            RigMode::Fixed | RigMode::Attached => {}
        }
        Selection::Rig(rig.mode)
    }

    /// Per-frame reconciliation of the camera with the active rig.
    ///
    /// Controller damping advances every frame whether or not the controller
    /// is enabled; only the enabled one reads input and moves the camera.
    pub fn update(
        &self,
        dt: f32,
        input: &RigInput,
        nodes: &impl NodeLookup,
        camera: &mut Transform,
        controllers: &mut CameraControllers,
    ) {
        let orbit_input = controllers.orbit.enabled.then_some(input);
        controllers.orbit.update(orbit_input, dt);
        if controllers.orbit.enabled {
            controllers.orbit.apply(camera);
        }

        if controllers.first_person.enabled {
            controllers.first_person.update(input, dt, camera);
        }

        let Some((rig, anchor, target)) = self.resolve_active(nodes) else {
            apply_fallback(camera);
            return;
        };

        match rig.mode {
            RigMode::Attached => place(camera, anchor, target),
            RigMode::FirstPerson => camera.translation.y = self.eye_height,
            RigMode::Fixed | RigMode::Orbital => {}
        }
    }

    fn resolve_active(&self, nodes: &impl NodeLookup) -> Option<(CameraRig, Vec3, Vec3)> {
        let rig = *self.active_rig()?;
        let anchor = nodes.world_position(rig.anchor)?;
        let target = nodes.world_position(rig.target)?;
        Some((rig, anchor, target))
    }
}

impl Default for CameraRigRegistry {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn place(camera: &mut Transform, position: Vec3, target: Vec3) {
    camera.translation = position;
    camera.look_at(target, Vec3::Y);
}

/// Default overview pose used for unregistered slots.
pub fn apply_fallback(camera: &mut Transform) {
    place(camera, FALLBACK_CAMERA_POSITION, FALLBACK_CAMERA_LOOK_AT);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EYE_HEIGHT: f32 = 53.0;

    fn nodes(entries: &[(SceneNode, Vec3)]) -> HashMap<SceneNode, Vec3> {
        entries.iter().copied().collect()
    }

    fn scene() -> (CameraRigRegistry, HashMap<SceneNode, Vec3>) {
        let mut registry = CameraRigRegistry::new(EYE_HEIGHT);
        registry.register(0, SceneNode::OverviewCamera, SceneNode::OverviewTarget, RigMode::Orbital);
        registry.register(1, SceneNode::CabinCamera, SceneNode::CabinLookAt, RigMode::Attached);
        registry.register(4, SceneNode::BridgeCamera, SceneNode::BridgeTarget, RigMode::Fixed);
        registry.register(6, SceneNode::WalkerStart, SceneNode::WalkerTarget, RigMode::FirstPerson);
        let world = nodes(&[
            (SceneNode::OverviewCamera, Vec3::new(400.0, 300.0, 400.0)),
            (SceneNode::OverviewTarget, Vec3::ZERO),
            (SceneNode::CabinCamera, Vec3::new(10.0, 60.0, 0.0)),
            (SceneNode::CabinLookAt, Vec3::new(10.0, 60.0, 40.0)),
            (SceneNode::BridgeCamera, Vec3::new(250.0, 70.0, 50.0)),
            (SceneNode::BridgeTarget, Vec3::new(300.0, 60.0, -40.0)),
            (SceneNode::WalkerStart, Vec3::new(120.0, 0.0, 60.0)),
            (SceneNode::WalkerTarget, Vec3::new(60.0, 0.0, -100.0)),
        ]);
        (registry, world)
    }

    fn assert_looking_at(camera: &Transform, target: Vec3) {
        let expected = (target - camera.translation).normalize();
        let forward = *camera.forward();
        assert!(forward.distance(expected) < 1e-4, "{forward} vs {expected}");
    }

    #[test]
    fn selection_is_deterministic() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();

        let mut first = Transform::from_xyz(1.0, 2.0, 3.0);
        registry.select(4, &world, &mut first, &mut controllers);
        let mut second = Transform::from_xyz(-50.0, 9.0, 7.0);
        registry.select(4, &world, &mut second, &mut controllers);

        assert_eq!(first, second);
        assert_eq!(first.translation, Vec3::new(250.0, 70.0, 50.0));
        assert_looking_at(&first, Vec3::new(300.0, 60.0, -40.0));
    }

    #[test]
    fn missing_slot_falls_back_and_disables_controllers() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();

        registry.select(0, &world, &mut camera, &mut controllers);
        assert!(controllers.orbit.enabled);

        assert_eq!(registry.select(9, &world, &mut camera, &mut controllers), Selection::Fallback);
        assert_eq!(registry.active_slot(), 9);
        assert_eq!(camera.translation, FALLBACK_CAMERA_POSITION);
        assert_looking_at(&camera, FALLBACK_CAMERA_LOOK_AT);
        assert!(!controllers.orbit.enabled);
        assert!(!controllers.first_person.enabled);

        // Re-applied every frame.
        camera.translation = Vec3::ONE;
        registry.update(0.016, &RigInput::default(), &world, &mut camera, &mut controllers);
        assert_eq!(camera.translation, FALLBACK_CAMERA_POSITION);
    }

    #[test]
    fn attached_rig_follows_its_anchor_and_fixed_rig_does_not() {
        let (mut registry, mut world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();
        let input = RigInput::default();

        registry.select(1, &world, &mut camera, &mut controllers);
        world.insert(SceneNode::CabinCamera, Vec3::new(30.0, 60.0, 5.0));
        world.insert(SceneNode::CabinLookAt, Vec3::new(30.0, 60.0, 45.0));
        registry.update(0.016, &input, &world, &mut camera, &mut controllers);
        assert_eq!(camera.translation, Vec3::new(30.0, 60.0, 5.0));
        assert_looking_at(&camera, Vec3::new(30.0, 60.0, 45.0));

        registry.select(4, &world, &mut camera, &mut controllers);
        let pose = camera;
        world.insert(SceneNode::BridgeCamera, Vec3::new(0.0, 0.0, 0.0));
        registry.update(0.016, &input, &world, &mut camera, &mut controllers);
        assert_eq!(camera, pose);
    }

    #[test]
    fn controllers_are_mutually_exclusive() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();

        registry.select(0, &world, &mut camera, &mut controllers);
        assert!(controllers.orbit.enabled && !controllers.first_person.enabled);
        registry.select(6, &world, &mut camera, &mut controllers);
        assert!(!controllers.orbit.enabled && controllers.first_person.enabled);
        registry.select(1, &world, &mut camera, &mut controllers);
        assert!(!controllers.orbit.enabled && !controllers.first_person.enabled);
    }

    #[test]
    fn orbital_selection_does_not_move_the_camera() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();

        registry.select(0, &world, &mut camera, &mut controllers);
        let selected = camera.translation;
        registry.update(0.016, &RigInput::default(), &world, &mut camera, &mut controllers);
        assert!(camera.translation.distance(selected) < 1e-2);
        assert_eq!(controllers.orbit.target, Vec3::ZERO);
    }

    #[test]
    fn first_person_eye_height_is_pinned() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();

        registry.select(6, &world, &mut camera, &mut controllers);
        assert_eq!(camera.translation.y, EYE_HEIGHT);

        let walk = RigInput {
            movement: Vec2::Y,
            ..default()
        };
        for _ in 0..10 {
            registry.update(0.1, &walk, &world, &mut camera, &mut controllers);
            assert_eq!(camera.translation.y, EYE_HEIGHT);
        }
        assert!(camera.translation.xz().distance(Vec2::new(120.0, 60.0)) > 1.0);
    }

    #[test]
    fn register_overwrites_existing_slot() {
        let (mut registry, _) = scene();
        let previous = registry.register(4, SceneNode::TunnelCamera, SceneNode::TunnelTarget, RigMode::Fixed);
        assert_eq!(previous.map(|rig| rig.anchor), Some(SceneNode::BridgeCamera));
        assert_eq!(registry.get(4).map(|rig| rig.anchor), Some(SceneNode::TunnelCamera));
        assert_eq!(registry.slots().collect::<Vec<_>>(), vec![0, 1, 4, 6]);
    }

    #[test]
    fn inactive_orbit_keeps_releasing_its_inertia() {
        let (mut registry, world) = scene();
        let mut controllers = CameraControllers::default();
        let mut camera = Transform::default();

        registry.select(0, &world, &mut camera, &mut controllers);
        let spin = RigInput {
            cursor_delta: Vec2::new(-100.0, 0.0),
            primary_held: true,
            viewport_height: 800.0,
            ..default()
        };
        registry.update(0.016, &spin, &world, &mut camera, &mut controllers);

        registry.select(4, &world, &mut camera, &mut controllers);
        let theta = controllers.orbit.theta;
        let pose = camera;
        registry.update(0.016, &spin, &world, &mut camera, &mut controllers);
        assert!(controllers.orbit.theta > theta);
        assert_eq!(camera, pose);
    }
}
