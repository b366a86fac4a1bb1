//! Bridge, tunnel and lamp posts placed along the track.
use bevy::prelude::*;
use constants::camera::{SLOT_BRIDGE, SLOT_TUNNEL};
use constants::structures::{
    BRIDGE_ARC_WIDTH, BRIDGE_BAR_SIZE, BRIDGE_COLUMN_DEPTH, BRIDGE_LENGTH, BRIDGE_START, BRIDGE_TOP_HEIGHT,
    BRIDGE_TOP_SEGMENTS, BRIDGE_WIDTH, LAMP_BULB_RADIUS, LAMP_INTENSITY, LAMP_OFFSET_FROM_TRACK,
    LAMP_POST_HEIGHT, LAMP_POST_RADIUS, LAMP_RANGE, TUNNEL_CURVE, TUNNEL_ENTRANCE, TUNNEL_HEIGHT,
    TUNNEL_LENGTH, TUNNEL_WALL, TUNNEL_WIDTH,
};

use super::lighting::LightMaterials;
use super::mesh_builder::{SweepFrame, TriangleMesh, solid_material};
use super::nodes::{NodeRegistry, SceneNode, spawn_marker};
use super::terrain::HeightField;
use crate::constants::render_settings::{CONCRETE_COLOR, STEEL_COLOR};
use crate::controls::ControlPanel;
use crate::engine::camera::{CameraRigRegistry, RigMode};
use crate::engine::track::CurvePath;

const ARCH_SAMPLES: usize = 16;

/// Lamp post point light, toggled by the lamp switch.
#[derive(Component)]
pub struct LampLight;

/// Emissive lamp bulb whose material follows the lamp switch.
#[derive(Component)]
pub struct LampBulb;

/// Height of the tunnel crown above the rail bed.
pub fn tunnel_crown_height() -> f32 {
    // Peak of the roof Bezier is 3/4 of the way between the wall top and its control points.
    TUNNEL_HEIGHT * (1.0 + 0.75 * TUNNEL_CURVE)
}

pub fn in_tunnel_zone(x: f32, z: f32) -> bool {
    let half_width = TUNNEL_WIDTH / 2.0 + TUNNEL_WALL + 2.0;
    x <= TUNNEL_ENTRANCE.x
        && x >= TUNNEL_ENTRANCE.x - TUNNEL_LENGTH
        && (z - TUNNEL_ENTRANCE.z).abs() <= half_width
}

pub fn in_bridge_zone(x: f32, z: f32) -> bool {
    (x - BRIDGE_START.x).abs() <= BRIDGE_WIDTH
        && z <= BRIDGE_START.z
        && z >= BRIDGE_START.z - BRIDGE_LENGTH
}

fn cubic_2d(points: [Vec2; 4], t: f32) -> Vec2 {
    let s = 1.0 - t;
    s * s * s * points[0] + 3.0 * s * s * t * points[1] + 3.0 * s * t * t * points[2] + t * t * t * points[3]
}

/// Wall line of the tunnel cross-section: up one side, over the Bezier roof, down the other.
fn tunnel_outline(half_width: f32, height: f32, crown_control: f32) -> Vec<Vec2> {
    let roof = [
        Vec2::new(-half_width, height),
        Vec2::new(-half_width, crown_control),
        Vec2::new(half_width, crown_control),
        Vec2::new(half_width, height),
    ];
    let mut outline = vec![Vec2::new(-half_width, 0.0)];
    outline.extend((0..=ARCH_SAMPLES).map(|i| cubic_2d(roof, i as f32 / ARCH_SAMPLES as f32)));
    outline.push(Vec2::new(half_width, 0.0));
    outline
}

/// Arched shell extruded along a straight run, with closed portal faces.
pub fn tunnel_mesh(length: f32) -> TriangleMesh {
    let half_width = TUNNEL_WIDTH / 2.0;
    let crown = TUNNEL_HEIGHT * (1.0 + TUNNEL_CURVE);
    let outer = tunnel_outline(half_width, TUNNEL_HEIGHT, crown);
    let inner = tunnel_outline(half_width - TUNNEL_WALL, TUNNEL_HEIGHT, crown - TUNNEL_WALL);

    // Local frame: the tunnel runs along -Z.
    let frames = [
        SweepFrame::level(Vec3::ZERO, Vec3::NEG_Z, 0.0),
        SweepFrame::level(Vec3::new(0.0, 0.0, -length), Vec3::NEG_Z, length),
    ];

    let mut mesh = TriangleMesh::default();
    mesh.sweep(&outer, &frames, false);
    mesh.sweep(&inner, &frames, false);
    for frame in &frames {
        for i in 0..outer.len() - 1 {
            let a = mesh.push_vertex(frame.place(outer[i]), outer[i]);
            let b = mesh.push_vertex(frame.place(outer[i + 1]), outer[i + 1]);
            let c = mesh.push_vertex(frame.place(inner[i + 1]), inner[i + 1]);
            let d = mesh.push_vertex(frame.place(inner[i]), inner[i]);
            mesh.push_quad(a, b, c, d);
        }
    }
    mesh
}

/// One masonry arch wall panel spanning `width` along -Z, `depth` thick along X.
fn arch_panel(mesh: &mut TriangleMesh, center_x: f32, start_z: f32, width: f32, depth: f32, column: f32) {
    let radius = (width - column) / 2.0;
    let half_span = width / 2.0 - column / 2.0;
    let spring = -column - radius;
    let arch = [
        Vec2::new(-half_span, spring),
        Vec2::new(-half_span, -column),
        Vec2::new(half_span, -column),
        Vec2::new(half_span, spring),
    ];
    let center_z = start_z - width / 2.0;

    for face_x in [center_x - depth / 2.0, center_x + depth / 2.0] {
        let mut previous: Option<(u32, u32)> = None;
        for i in 0..=ARCH_SAMPLES {
            let point = cubic_2d(arch, i as f32 / ARCH_SAMPLES as f32);
            let z = center_z - point.x;
            let bottom = mesh.push_vertex(Vec3::new(face_x, point.y, z), point);
            let top = mesh.push_vertex(Vec3::new(face_x, 0.0, z), Vec2::new(point.x, 0.0));
            if let Some((prev_bottom, prev_top)) = previous {
                mesh.push_quad(prev_bottom, bottom, top, prev_top);
            }
            previous = Some((bottom, top));
        }
    }

    // Soffit under the arch.
    let mut previous: Option<(u32, u32)> = None;
    for i in 0..=ARCH_SAMPLES {
        let point = cubic_2d(arch, i as f32 / ARCH_SAMPLES as f32);
        let z = center_z - point.x;
        let near = mesh.push_vertex(Vec3::new(center_x - depth / 2.0, point.y, z), Vec2::new(0.0, point.x));
        let far = mesh.push_vertex(Vec3::new(center_x + depth / 2.0, point.y, z), Vec2::new(1.0, point.x));
        if let Some((prev_near, prev_far)) = previous {
            mesh.push_quad(prev_near, near, far, prev_far);
        }
        previous = Some((near, far));
    }
}

/// Arch walls of the whole bridge, both sides.
pub fn bridge_arches_mesh() -> TriangleMesh {
    let arc_count = (BRIDGE_LENGTH / BRIDGE_ARC_WIDTH).ceil() as usize;
    let wall_x = BRIDGE_WIDTH / 2.0 - BRIDGE_COLUMN_DEPTH / 2.0;
    let mut mesh = TriangleMesh::default();
    for i in 0..arc_count {
        for side in [-1.0, 1.0] {
            arch_panel(
                &mut mesh,
                side * wall_x,
                -(i as f32) * BRIDGE_ARC_WIDTH,
                BRIDGE_ARC_WIDTH,
                BRIDGE_COLUMN_DEPTH,
                BRIDGE_COLUMN_DEPTH,
            );
        }
    }
    mesh
}

/// Bridge over the river: deck, arches on piers and a steel truss above the track.
///
/// Registers the fixed bridge camera.
pub fn spawn_bridge(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &mut NodeRegistry,
    rigs: &mut CameraRigRegistry,
    rail_height: f32,
) {
    let masonry = materials.add(solid_material(CONCRETE_COLOR, 0.9));
    let steel = materials.add(StandardMaterial {
        metallic: 0.7,
        ..solid_material(STEEL_COLOR, 0.4)
    });

    let root = commands
        .spawn((
            Transform::from_xyz(BRIDGE_START.x, rail_height, BRIDGE_START.z),
            Visibility::default(),
            Name::new("Bridge"),
        ))
        .id();

    let mut parts = Vec::new();
    parts.push(commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(BRIDGE_WIDTH, BRIDGE_COLUMN_DEPTH, BRIDGE_LENGTH))),
        MeshMaterial3d(masonry.clone()),
        Transform::from_xyz(0.0, -BRIDGE_COLUMN_DEPTH / 2.0, -BRIDGE_LENGTH / 2.0),
    )).id());
    parts.push(commands.spawn((
        Mesh3d(meshes.add(bridge_arches_mesh().build())),
        MeshMaterial3d(masonry.clone()),
        Transform::IDENTITY,
    )).id());

    // Piers run from the arch springs down past the valley floor.
    let arc_count = (BRIDGE_LENGTH / BRIDGE_ARC_WIDTH).ceil() as usize;
    let pier_height = rail_height;
    let pier = meshes.add(Cuboid::new(BRIDGE_COLUMN_DEPTH, pier_height, BRIDGE_COLUMN_DEPTH));
    let wall_x = BRIDGE_WIDTH / 2.0 - BRIDGE_COLUMN_DEPTH / 2.0;
    for i in 0..=arc_count {
        for side in [-1.0, 1.0] {
            parts.push(commands.spawn((
                Mesh3d(pier.clone()),
                MeshMaterial3d(masonry.clone()),
                Transform::from_xyz(side * wall_x, -pier_height / 2.0, -(i as f32) * BRIDGE_ARC_WIDTH),
            )).id());
        }
    }

    for (mesh, transform) in truss_bars(BRIDGE_LENGTH, BRIDGE_WIDTH, BRIDGE_TOP_HEIGHT, BRIDGE_TOP_SEGMENTS) {
        parts.push(commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(steel.clone()),
            transform,
        )).id());
    }
    commands.entity(root).add_children(&parts);

    spawn_marker(
        commands,
        registry,
        SceneNode::BridgeCamera,
        None,
        Vec3::new(BRIDGE_START.x - 60.0, rail_height + 8.0, BRIDGE_START.z - 100.0),
    );
    spawn_marker(
        commands,
        registry,
        SceneNode::BridgeTarget,
        None,
        Vec3::new(BRIDGE_START.x, rail_height - 8.0, BRIDGE_START.z - BRIDGE_LENGTH / 2.0),
    );
    rigs.register(SLOT_BRIDGE, SceneNode::BridgeCamera, SceneNode::BridgeTarget, RigMode::Fixed);
}

/// Steel truss pieces in bridge-local space (deck top at y = 0, running along -Z).
fn truss_bars(length: f32, width: f32, height: f32, segments: usize) -> Vec<(Cuboid, Transform)> {
    let bar = BRIDGE_BAR_SIZE;
    let segment_length = length / segments.max(1) as f32;
    let side_x = width / 2.0 - bar;
    let side_diagonal = (height * height + segment_length * segment_length).sqrt();
    let side_angle = segment_length.atan2(height);
    let top_span = width - 2.0 * bar;
    let top_diagonal = (top_span * top_span + segment_length * segment_length).sqrt();
    let top_angle = segment_length.atan2(top_span);

    let mut bars = Vec::new();
    let portal = |bars: &mut Vec<(Cuboid, Transform)>, z: f32| {
        for side in [-1.0, 1.0] {
            bars.push((
                Cuboid::new(bar, height, bar),
                Transform::from_xyz(side * side_x, height / 2.0, z),
            ));
        }
        bars.push((
            Cuboid::new(width - bar, bar, bar),
            Transform::from_xyz(0.0, height, z),
        ));
    };

    for i in 0..segments {
        let start = -(i as f32) * segment_length;
        let middle = start - segment_length / 2.0;
        portal(&mut bars, start);

        for side in [-1.0, 1.0] {
            bars.push((
                Cuboid::new(bar, side_diagonal, bar),
                Transform::from_xyz(side * side_x, height / 2.0, middle)
                    .with_rotation(Quat::from_rotation_x(-side * side_angle)),
            ));
            bars.push((
                Cuboid::new(bar, bar, segment_length),
                Transform::from_xyz(side * side_x, height, middle),
            ));
        }
        bars.push((
            Cuboid::new(top_diagonal, bar, bar),
            Transform::from_xyz(0.0, height, middle).with_rotation(Quat::from_rotation_y(top_angle)),
        ));
    }
    portal(&mut bars, -length);
    bars
}

/// Tunnel through the mountain; registers the fixed tunnel camera.
pub fn spawn_tunnel(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &mut NodeRegistry,
    rigs: &mut CameraRigRegistry,
    rail_height: f32,
) {
    let material = materials.add(solid_material(CONCRETE_COLOR, 0.95));
    // Local -Z turned onto world -X.
    commands.spawn((
        Mesh3d(meshes.add(tunnel_mesh(TUNNEL_LENGTH).build())),
        MeshMaterial3d(material),
        Transform::from_xyz(TUNNEL_ENTRANCE.x, rail_height, TUNNEL_ENTRANCE.z)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        Name::new("Tunnel"),
    ));

    spawn_marker(
        commands,
        registry,
        SceneNode::TunnelCamera,
        None,
        Vec3::new(TUNNEL_ENTRANCE.x + 50.0, rail_height + 12.0, TUNNEL_ENTRANCE.z + 22.0),
    );
    spawn_marker(
        commands,
        registry,
        SceneNode::TunnelTarget,
        None,
        Vec3::new(TUNNEL_ENTRANCE.x, rail_height + TUNNEL_HEIGHT / 2.0, TUNNEL_ENTRANCE.z),
    );
    rigs.register(SLOT_TUNNEL, SceneNode::TunnelCamera, SceneNode::TunnelTarget, RigMode::Fixed);
}

/// Lamp post positions beside the track, skipping the bridge, the tunnel and water.
pub fn lamp_positions(track: &CurvePath, field: &HeightField, spacing: f32, water_level: f32) -> Vec<Vec3> {
    track
        .sample_every(spacing)
        .into_iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let side = if index % 2 == 0 { 1.0 } else { -1.0 };
            let right = sample.tangent.cross(Vec3::Y).normalize_or_zero();
            let base = sample.point + right * side * LAMP_OFFSET_FROM_TRACK;
            if in_bridge_zone(base.x, base.z) || in_tunnel_zone(base.x, base.z) || !field.contains(base.x, base.z) {
                return None;
            }
            let ground = field.height_at(base.x, base.z);
            (ground > water_level).then_some(Vec3::new(base.x, ground, base.z))
        })
        .collect()
}

pub fn spawn_lamps(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    light_materials: &LightMaterials,
    positions: &[Vec3],
    lamps_on: bool,
) {
    let post_mesh = meshes.add(Cylinder::new(LAMP_POST_RADIUS, LAMP_POST_HEIGHT));
    let bulb_mesh = meshes.add(Sphere::new(LAMP_BULB_RADIUS));
    let post_material = materials.add(solid_material(STEEL_COLOR, 0.5));
    let visibility = if lamps_on { Visibility::Inherited } else { Visibility::Hidden };

    for position in positions {
        commands
            .spawn((
                Mesh3d(post_mesh.clone()),
                MeshMaterial3d(post_material.clone()),
                Transform::from_translation(*position + Vec3::Y * LAMP_POST_HEIGHT / 2.0),
                Name::new("LampPost"),
            ))
            .with_children(|post| {
                post.spawn((
                    Mesh3d(bulb_mesh.clone()),
                    MeshMaterial3d(light_materials.for_state(lamps_on)),
                    Transform::from_xyz(0.0, LAMP_POST_HEIGHT / 2.0 + LAMP_BULB_RADIUS, 0.0),
                    LampBulb,
                ));
                post.spawn((
                    PointLight {
                        intensity: LAMP_INTENSITY,
                        range: LAMP_RANGE,
                        color: light_materials.on_color,
                        shadows_enabled: false,
                        ..default()
                    },
                    Transform::from_xyz(0.0, LAMP_POST_HEIGHT / 2.0 + LAMP_BULB_RADIUS, 0.0),
                    visibility,
                    LampLight,
                ));
            });
    }
    info!("✓ {} lamp posts placed", positions.len());
}

pub fn sync_lamp_lights(
    panel: Res<ControlPanel>,
    light_materials: Res<LightMaterials>,
    mut lights: Query<&mut Visibility, With<LampLight>>,
    mut bulbs: Query<&mut MeshMaterial3d<StandardMaterial>, With<LampBulb>>,
) {
    let visibility = if panel.lamp_lights { Visibility::Inherited } else { Visibility::Hidden };
    for mut light in &mut lights {
        light.set_if_neq(visibility);
    }
    let material = light_materials.for_state(panel.lamp_lights);
    for mut bulb in &mut bulbs {
        if bulb.0 != material {
            bulb.0 = material.clone();
        }
    }
}
