//! Steam locomotive assembled from primitive meshes.
//!
//! The model faces +Z with its origin on the boiler axis. Wheels and
//! connecting rods carry [`SecondaryMotion`] so they follow the distance the
//! train covers each frame.
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use constants::camera::{SLOT_CABIN, SLOT_TRAIN_CHASE, SLOT_TRAIN_FRONT};
use constants::train::{
    AXLE_HEIGHT, BARREL_DIAMETER, BARREL_LENGTH, BOLT_DEPTH, CABIN_FLOOR_WIDTH, CABIN_HEIGHT, CABIN_LENGTH,
    CABIN_PANEL_HEIGHT, CABIN_PANEL_WIDTH, CABIN_WIDTH, CENTER_WHEEL_POSITION, EXTRA_ROD_LENGTH, FLOOR_WIDTH,
    FRONT_DIAMETER, FRONT_WIDTH, HEADLIGHT_INTENSITY, HEADLIGHT_OUTER_ANGLE, HEADLIGHT_RANGE, INNER_RAIL_GAP,
    LIGHT_SIZE, MOTOR_HEIGHT, MOTOR_LENGTH, PISTON_LENGTH, PISTON_RADIUS, ROD_HEIGHT, ROD_WIDTH,
    SMOKE_STACK_HEIGHT, WHEEL_RADIUS, WHEEL_SEPARATION, WHEEL_WIDTH,
};

use super::secondary_motion::SecondaryMotion;
use crate::constants::render_settings::{
    TRAIN_BODY_COLOR, TRAIN_MOTOR_COLOR, TRAIN_PISTON_COLOR, TRAIN_ROD_COLOR, TRAIN_ROOF_COLOR,
    TRAIN_SMOKE_STACK_COLOR, TRAIN_WHEEL_COLOR,
};
use crate::engine::camera::{CameraRigRegistry, RigMode};
use crate::engine::scene::lighting::LightMaterials;
use crate::engine::scene::mesh_builder::solid_material;
use crate::engine::scene::nodes::{NodeRegistry, SceneNode, spawn_marker, spawn_named};

/// Root of the locomotive; moved along the track every frame.
#[derive(Component)]
pub struct Train;

#[derive(Component)]
pub struct Headlight;

#[derive(Component)]
pub struct HeadlightBulb;

/// Which side of the locomotive a wheel set sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// +X in model space.
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Wheel placements for one side, middle wheel first.
///
/// The wheel's local Y axis is its axle, pointing in towards the boiler.
pub fn wheel_transforms(side: Side) -> [Transform; 3] {
    let x = side.sign() * (INNER_RAIL_GAP / 2.0 + WHEEL_WIDTH / 2.0);
    let rotation = Quat::from_rotation_z(side.sign() * FRAC_PI_2);
    [0.0, -WHEEL_SEPARATION, WHEEL_SEPARATION].map(|offset| {
        Transform::from_xyz(x, AXLE_HEIGHT, CENTER_WHEEL_POSITION + offset).with_rotation(rotation)
    })
}

/// Crank pin position in wheel space; starts at the top of the wheel on both sides.
pub fn bolt_offset(side: Side) -> Vec3 {
    Vec3::new(side.sign() * WHEEL_RADIUS / 2.0, -WHEEL_WIDTH / 2.0, 0.0)
}

fn wheel_motion(side: Side) -> SecondaryMotion {
    match side {
        Side::Left => SecondaryMotion::left_wheel(WHEEL_RADIUS),
        Side::Right => SecondaryMotion::right_wheel(WHEEL_RADIUS),
    }
}

fn rod_motion(side: Side) -> SecondaryMotion {
    match side {
        Side::Left => SecondaryMotion::left_rod(WHEEL_RADIUS),
        Side::Right => SecondaryMotion::right_rod(WHEEL_RADIUS),
    }
}

struct TrainMaterials {
    body: Handle<StandardMaterial>,
    smoke_stack: Handle<StandardMaterial>,
    roof: Handle<StandardMaterial>,
    motor: Handle<StandardMaterial>,
    wheel: Handle<StandardMaterial>,
    rod: Handle<StandardMaterial>,
    piston: Handle<StandardMaterial>,
}

impl TrainMaterials {
    fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            body: materials.add(solid_material(TRAIN_BODY_COLOR, 0.5)),
            smoke_stack: materials.add(solid_material(TRAIN_SMOKE_STACK_COLOR, 0.5)),
            roof: materials.add(solid_material(TRAIN_ROOF_COLOR, 0.6)),
            motor: materials.add(solid_material(TRAIN_MOTOR_COLOR, 0.4)),
            wheel: materials.add(solid_material(TRAIN_WHEEL_COLOR, 0.3)),
            rod: materials.add(solid_material(TRAIN_ROD_COLOR, 0.3)),
            piston: materials.add(solid_material(TRAIN_PISTON_COLOR, 0.4)),
        }
    }
}

fn part(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: &Handle<StandardMaterial>,
    transform: Transform,
) -> Entity {
    commands
        .spawn((Mesh3d(mesh), MeshMaterial3d(material.clone()), transform))
        .id()
}

/// Spawn the locomotive at `transform` and register its camera rigs and headlight.
pub fn spawn_train(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    light_materials: &LightMaterials,
    registry: &mut NodeRegistry,
    rigs: &mut CameraRigRegistry,
    transform: Transform,
    light_on: bool,
) -> Entity {
    let palette = TrainMaterials::new(materials);
    let train = spawn_named(commands, registry, SceneNode::Train, (transform, Visibility::default(), Train));

    let mut children = Vec::new();
    let upright = Quat::from_rotation_x(FRAC_PI_2);

    // Boiler and front disc lie along Z.
    children.push(part(
        commands,
        meshes.add(Cylinder::new(BARREL_DIAMETER / 2.0, BARREL_LENGTH)),
        &palette.body,
        Transform::from_rotation(upright),
    ));
    let front_z = BARREL_LENGTH / 2.0 + FRONT_WIDTH / 2.0;
    children.push(part(
        commands,
        meshes.add(Cylinder::new(FRONT_DIAMETER / 2.0, FRONT_WIDTH)),
        &palette.body,
        Transform::from_xyz(0.0, 0.0, front_z).with_rotation(upright),
    ));

    let stack_radius = FRONT_WIDTH * 0.4;
    let stack_y = FRONT_DIAMETER / 2.0;
    children.push(part(
        commands,
        meshes.add(Cylinder::new(stack_radius, SMOKE_STACK_HEIGHT)),
        &palette.smoke_stack,
        Transform::from_xyz(0.0, stack_y, front_z),
    ));
    children.push(part(
        commands,
        meshes.add(ConicalFrustum {
            radius_top: FRONT_WIDTH * 0.55,
            radius_bottom: stack_radius,
            height: SMOKE_STACK_HEIGHT / 6.0,
        }),
        &palette.smoke_stack,
        Transform::from_xyz(0.0, stack_y + SMOKE_STACK_HEIGHT / 2.0 + SMOKE_STACK_HEIGHT / 12.0, front_z),
    ));

    // Headlight bulb sits in the front disc, the spot light just ahead of it.
    let bulb_position = Vec3::new(0.0, 0.0, front_z + FRONT_WIDTH / 4.0);
    let bulb = spawn_named(
        commands,
        registry,
        SceneNode::TrainHeadlightBulb,
        (
            Mesh3d(meshes.add(Sphere::new(LIGHT_SIZE))),
            MeshMaterial3d(light_materials.for_state(light_on)),
            Transform::from_translation(bulb_position),
            HeadlightBulb,
        ),
    );
    let headlight = spawn_named(
        commands,
        registry,
        SceneNode::TrainHeadlight,
        (
            SpotLight {
                color: light_materials.on_color,
                intensity: HEADLIGHT_INTENSITY,
                range: HEADLIGHT_RANGE,
                outer_angle: HEADLIGHT_OUTER_ANGLE,
                inner_angle: HEADLIGHT_OUTER_ANGLE * 0.6,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(bulb_position + Vec3::Z * (LIGHT_SIZE + 0.1))
                .looking_to(Vec3::Z, Vec3::Y),
            if light_on { Visibility::Inherited } else { Visibility::Hidden },
            Headlight,
        ),
    );
    children.extend([bulb, headlight]);

    // Running board under the boiler and the raised cabin floor behind it.
    let floor_top = -BARREL_DIAMETER / 2.0;
    children.push(part(
        commands,
        meshes.add(Cuboid::new(CABIN_WIDTH, FLOOR_WIDTH, BARREL_LENGTH)),
        &palette.body,
        Transform::from_xyz(0.0, floor_top - FLOOR_WIDTH / 2.0, 0.0),
    ));
    let cabin_floor_length = CABIN_LENGTH * 1.2;
    children.push(part(
        commands,
        meshes.add(Cuboid::new(CABIN_WIDTH, CABIN_FLOOR_WIDTH, cabin_floor_length)),
        &palette.body,
        Transform::from_xyz(0.0, floor_top, -BARREL_LENGTH / 2.0 - cabin_floor_length / 2.0),
    ));

    let cabin = spawn_cabin(commands, meshes, &palette);
    children.push(cabin);

    children.push(part(
        commands,
        meshes.add(Cuboid::new(INNER_RAIL_GAP, MOTOR_HEIGHT, MOTOR_LENGTH)),
        &palette.motor,
        Transform::from_xyz(0.0, floor_top - FLOOR_WIDTH - MOTOR_HEIGHT / 2.0, 0.0),
    ));

    for side in [Side::Left, Side::Right] {
        children.extend(spawn_running_gear(commands, meshes, &palette, side));
    }
    commands.entity(train).add_children(&children);

    spawn_train_cameras(commands, registry, rigs, train);
    info!("✓ Locomotive assembled");
    train
}

/// Cabin shell at the back of the boiler; its local origin is the cabin floor front edge.
fn spawn_cabin(commands: &mut Commands, meshes: &mut Assets<Mesh>, palette: &TrainMaterials) -> Entity {
    let cabin = commands
        .spawn((
            Transform::from_xyz(0.0, -BARREL_DIAMETER / 2.0 + CABIN_FLOOR_WIDTH / 2.0, -BARREL_LENGTH / 2.0),
            Visibility::default(),
            Name::new("Cabin"),
        ))
        .id();

    let wall = meshes.add(Cuboid::new(CABIN_PANEL_WIDTH, CABIN_PANEL_HEIGHT, CABIN_LENGTH));
    let post_height = CABIN_HEIGHT - CABIN_PANEL_HEIGHT;
    let post = meshes.add(Cuboid::new(CABIN_PANEL_WIDTH, post_height, CABIN_PANEL_WIDTH));
    let side_x = CABIN_WIDTH / 2.0 - CABIN_PANEL_WIDTH / 2.0;

    let mut parts = Vec::new();
    for side in [-1.0, 1.0] {
        parts.push(part(
            commands,
            wall.clone(),
            &palette.body,
            Transform::from_xyz(side * side_x, CABIN_PANEL_HEIGHT / 2.0, -CABIN_LENGTH / 2.0),
        ));
        for z in [-CABIN_PANEL_WIDTH / 2.0, -CABIN_LENGTH + CABIN_PANEL_WIDTH / 2.0] {
            parts.push(part(
                commands,
                post.clone(),
                &palette.body,
                Transform::from_xyz(side * side_x, CABIN_PANEL_HEIGHT + post_height / 2.0, z),
            ));
        }
    }
    parts.push(part(
        commands,
        meshes.add(Cuboid::new(CABIN_WIDTH, CABIN_PANEL_HEIGHT, CABIN_PANEL_WIDTH)),
        &palette.body,
        Transform::from_xyz(0.0, CABIN_PANEL_HEIGHT / 2.0, 0.0),
    ));
    parts.push(part(
        commands,
        meshes.add(Cuboid::new(CABIN_WIDTH * 1.2, 2.0 * CABIN_PANEL_WIDTH, CABIN_LENGTH * 1.2)),
        &palette.roof,
        Transform::from_xyz(0.0, CABIN_HEIGHT, -CABIN_LENGTH / 2.0),
    ));
    commands.entity(cabin).add_children(&parts);
    cabin
}

/// Three wheels with crank pins, the piston and the connecting rod on one side.
fn spawn_running_gear(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    palette: &TrainMaterials,
    side: Side,
) -> Vec<Entity> {
    let wheel_mesh = meshes.add(Cylinder::new(WHEEL_RADIUS, WHEEL_WIDTH));
    let bolt_mesh = meshes.add(Cylinder::new(ROD_HEIGHT / 2.0, BOLT_DEPTH));

    let mut spawned = Vec::new();
    let mut middle_bolt = None;
    for transform in wheel_transforms(side) {
        let wheel = commands
            .spawn((
                Mesh3d(wheel_mesh.clone()),
                MeshMaterial3d(palette.wheel.clone()),
                transform,
                wheel_motion(side),
            ))
            .id();
        let bolt = part(
            commands,
            bolt_mesh.clone(),
            &palette.rod,
            Transform::from_translation(bolt_offset(side)),
        );
        commands.entity(wheel).add_child(bolt);
        middle_bolt.get_or_insert(bolt);
        spawned.push(wheel);
    }

    // The rod hangs off the middle crank pin and counter-rotates to stay level.
    if let Some(bolt) = middle_bolt {
        let pivot = commands
            .spawn((
                Transform::from_xyz(0.0, -BOLT_DEPTH, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
                Visibility::default(),
                rod_motion(side),
            ))
            .id();
        let rod = part(
            commands,
            meshes.add(Cuboid::new(
                2.0 * WHEEL_SEPARATION + ROD_HEIGHT + EXTRA_ROD_LENGTH,
                ROD_HEIGHT,
                ROD_WIDTH,
            )),
            &palette.rod,
            Transform::from_xyz(-EXTRA_ROD_LENGTH / 2.0, 0.0, 0.0),
        );
        commands.entity(pivot).add_child(rod);
        commands.entity(bolt).add_child(pivot);
    }

    spawned.push(part(
        commands,
        meshes.add(Cylinder::new(PISTON_RADIUS, PISTON_LENGTH)),
        &palette.piston,
        Transform::from_xyz(
            side.sign() * (INNER_RAIL_GAP / 2.0 + PISTON_RADIUS * 0.8),
            AXLE_HEIGHT,
            CENTER_WHEEL_POSITION + WHEEL_SEPARATION * 2.0,
        )
        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    ));
    spawned
}

/// Camera anchors riding with the train: cabin, front and chase views.
fn spawn_train_cameras(commands: &mut Commands, registry: &mut NodeRegistry, rigs: &mut CameraRigRegistry, train: Entity) {
    let cabin_eye = Vec3::new(0.0, 4.0, -BARREL_LENGTH / 2.0 - CABIN_LENGTH * 0.6);
    spawn_marker(commands, registry, SceneNode::CabinCamera, Some(train), cabin_eye);
    spawn_marker(commands, registry, SceneNode::CabinLookAt, Some(train), Vec3::new(0.0, 2.0, 40.0));
    spawn_marker(commands, registry, SceneNode::FrontCamera, Some(train), Vec3::new(-6.0, 4.0, 30.0));
    spawn_marker(commands, registry, SceneNode::ChaseCamera, Some(train), Vec3::new(10.0, 16.0, -45.0));

    rigs.register(SLOT_CABIN, SceneNode::CabinCamera, SceneNode::CabinLookAt, RigMode::Attached);
    rigs.register(SLOT_TRAIN_FRONT, SceneNode::FrontCamera, SceneNode::Train, RigMode::Attached);
    rigs.register(SLOT_TRAIN_CHASE, SceneNode::ChaseCamera, SceneNode::Train, RigMode::Attached);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn axles_point_outwards() {
        for (side, outward) in [(Side::Left, Vec3::X), (Side::Right, Vec3::NEG_X)] {
            for wheel in wheel_transforms(side) {
                assert!(approx(wheel.rotation * Vec3::NEG_Y, outward));
                assert_eq!(wheel.translation.y, AXLE_HEIGHT);
            }
        }
    }

    #[test]
    fn crank_pins_start_on_top_and_outside() {
        for side in [Side::Left, Side::Right] {
            let wheel = wheel_transforms(side)[0];
            let pin = wheel.transform_point(bolt_offset(side));
            assert!(pin.y > wheel.translation.y);
            assert!(pin.x.abs() > wheel.translation.x.abs());
        }
    }

    #[test]
    fn both_sides_roll_forward_together() {
        let delta = 0.3;
        let mut spins = Vec::new();
        for side in [Side::Left, Side::Right] {
            let mut wheel = wheel_transforms(side)[0];
            let before = wheel.transform_point(bolt_offset(side)) - wheel.translation;
            wheel_motion(side).apply(&mut wheel, delta);
            let after = wheel.transform_point(bolt_offset(side)) - wheel.translation;
            spins.push(after - before);
        }
        // A pin at the top moves forward (+Z) when rolling forward.
        assert!(spins[0].z > 0.0);
        assert!(approx(spins[0], spins[1]));
    }

    #[test]
    fn rod_keeps_its_heading_while_wheels_turn() {
        for side in [Side::Left, Side::Right] {
            let mut wheel = wheel_transforms(side)[0];
            let mut pivot = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
            let heading = (wheel.rotation * pivot.rotation) * Vec3::X;
            wheel_motion(side).apply(&mut wheel, 1.7);
            rod_motion(side).apply(&mut pivot, 1.7);
            assert!(approx((wheel.rotation * pivot.rotation) * Vec3::X, heading));
        }
    }
}
