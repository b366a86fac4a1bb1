//! Procedural height field with bilinear sampling and a vertex-coloured mesh.
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use constants::terrain::{
    HILL_AMPLITUDE, LAKE_CENTER, LAKE_DEPTH, LAKE_RADIUS, MOUNTAIN_CENTER, MOUNTAIN_HEIGHT, MOUNTAIN_RADIUS,
    RIVER_CENTER_Z, RIVER_DEPTH, RIVER_HALF_WIDTH, TERRAIN_RESOLUTION, TERRAIN_SIZE, TRACK_CLEARANCE,
};

use super::mesh_builder::TriangleMesh;
use super::structures::{in_bridge_zone, in_tunnel_zone, tunnel_crown_height};
use crate::constants::render_settings::{TERRAIN_GRASS_COLOR, TERRAIN_ROCK_COLOR, TERRAIN_SAND_COLOR};
use crate::engine::track::CurvePath;

/// Ground under the embankment sits this far below the rail bed.
const EMBANKMENT_RISE: f32 = 6.0;
/// Minimum earth cover above the tunnel roof.
const TUNNEL_COVER: f32 = 4.0;
/// Track sampling step when measuring distance to the track.
const TRACK_SAMPLE_SPACING: f32 = 2.0;

#[derive(Component)]
pub struct Terrain;

/// Square grid of heights centred on the world origin.
#[derive(Resource, Debug, Clone)]
pub struct HeightField {
    size: f32,
    resolution: usize,
    /// Row-major by z, `(resolution + 1)^2` entries.
    heights: Vec<f32>,
}

impl HeightField {
    pub fn from_fn(size: f32, resolution: usize, height: impl Fn(f32, f32) -> f32) -> Self {
        let resolution = resolution.max(1);
        let mut field = Self {
            size,
            resolution,
            heights: Vec::with_capacity((resolution + 1) * (resolution + 1)),
        };
        for iz in 0..=resolution {
            for ix in 0..=resolution {
                let (x, z) = field.grid_to_world(ix, iz);
                field.heights.push(height(x, z));
            }
        }
        field
    }

    /// The scene's landscape: rolling plateau, lake basin, river valley under
    /// the bridge and the mountain pierced by the tunnel, levelled along the track.
    pub fn generate(track: &CurvePath, rail_height: f32) -> Self {
        let mut field = Self::from_fn(TERRAIN_SIZE, TERRAIN_RESOLUTION, |x, z| natural_height(x, z, rail_height));
        let distances = field.track_distances(track, TRACK_CLEARANCE);
        let bed_ground = rail_height - EMBANKMENT_RISE;
        let tunnel_cover = rail_height + tunnel_crown_height() + TUNNEL_COVER;

        for iz in 0..=field.resolution {
            for ix in 0..=field.resolution {
                let (x, z) = field.grid_to_world(ix, iz);
                let index = field.index(ix, iz);
                if in_tunnel_zone(x, z) {
                    field.heights[index] = field.heights[index].max(tunnel_cover);
                    continue;
                }
                if in_bridge_zone(x, z) {
                    continue;
                }
                let distance = distances[index];
                if distance < TRACK_CLEARANCE {
                    let weight = (smoothstep(1.0 - distance / TRACK_CLEARANCE) * 1.5).min(1.0);
                    let height = field.heights[index];
                    field.heights[index] = height + (bed_ground - height) * weight;
                }
            }
        }
        field
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    fn cell_size(&self) -> f32 {
        self.size / self.resolution as f32
    }

    fn index(&self, ix: usize, iz: usize) -> usize {
        iz * (self.resolution + 1) + ix
    }

    fn grid_to_world(&self, ix: usize, iz: usize) -> (f32, f32) {
        let half = self.size / 2.0;
        (ix as f32 * self.cell_size() - half, iz as f32 * self.cell_size() - half)
    }

    pub fn vertex(&self, ix: usize, iz: usize) -> Vec3 {
        let (x, z) = self.grid_to_world(ix, iz);
        Vec3::new(x, self.heights[self.index(ix, iz)], z)
    }

    /// Height at a world position with bilinear interpolation; clamps to the edge outside.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let half = self.size / 2.0;
        let max = self.resolution as f32;
        let grid_x = ((x + half) / self.cell_size()).clamp(0.0, max);
        let grid_z = ((z + half) / self.cell_size()).clamp(0.0, max);

        let x0 = (grid_x.floor() as usize).min(self.resolution);
        let z0 = (grid_z.floor() as usize).min(self.resolution);
        let x1 = (x0 + 1).min(self.resolution);
        let z1 = (z0 + 1).min(self.resolution);
        let wx = grid_x - x0 as f32;
        let wz = grid_z - z0 as f32;

        let h00 = self.heights[self.index(x0, z0)];
        let h10 = self.heights[self.index(x1, z0)];
        let h01 = self.heights[self.index(x0, z1)];
        let h11 = self.heights[self.index(x1, z1)];

        let near = h00 * (1.0 - wx) + h10 * wx;
        let far = h01 * (1.0 - wx) + h11 * wx;
        near * (1.0 - wz) + far * wz
    }

    /// Whether `(x, z)` lies inside the field.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.size / 2.0;
        x.abs() <= half && z.abs() <= half
    }

    /// Distance from each grid vertex to the nearest track sample, capped at `radius`.
    fn track_distances(&self, track: &CurvePath, radius: f32) -> Vec<f32> {
        let mut distances = vec![f32::INFINITY; self.heights.len()];
        let reach = (radius / self.cell_size()).ceil() as isize + 1;
        let half = self.size / 2.0;

        for sample in track.sample_every(TRACK_SAMPLE_SPACING) {
            let center_x = ((sample.point.x + half) / self.cell_size()).round() as isize;
            let center_z = ((sample.point.z + half) / self.cell_size()).round() as isize;
            for iz in (center_z - reach)..=(center_z + reach) {
                for ix in (center_x - reach)..=(center_x + reach) {
                    if ix < 0 || iz < 0 || ix > self.resolution as isize || iz > self.resolution as isize {
                        continue;
                    }
                    let (ix, iz) = (ix as usize, iz as usize);
                    let (x, z) = self.grid_to_world(ix, iz);
                    let distance = Vec2::new(x, z).distance(sample.point.xz());
                    let index = self.index(ix, iz);
                    distances[index] = distances[index].min(distance);
                }
            }
        }
        distances
    }

    /// Triangle mesh of the whole field, coloured by height and steepness.
    pub fn build_mesh(&self, water_level: f32) -> Mesh {
        let mut builder = TriangleMesh::default();
        let mut colors = Vec::with_capacity(self.heights.len());
        let uv_scale = 1.0 / self.resolution as f32;

        for iz in 0..=self.resolution {
            for ix in 0..=self.resolution {
                let position = self.vertex(ix, iz);
                builder.push_vertex(position, Vec2::new(ix as f32, iz as f32) * uv_scale);
                colors.push(self.surface_color(ix, iz, water_level));
            }
        }

        let row = self.resolution as u32 + 1;
        for iz in 0..self.resolution as u32 {
            for ix in 0..self.resolution as u32 {
                let a = iz * row + ix;
                let b = a + 1;
                let c = a + row + 1;
                let d = a + row;
                // Counter-clockwise seen from above.
                builder.push_quad(a, d, c, b);
            }
        }

        let mut mesh = builder.build();
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh
    }

    fn surface_color(&self, ix: usize, iz: usize, water_level: f32) -> [f32; 4] {
        let height = self.heights[self.index(ix, iz)];
        let right = self.heights[self.index((ix + 1).min(self.resolution), iz)];
        let down = self.heights[self.index(ix, (iz + 1).min(self.resolution))];
        let steepness = ((right - height).abs().max((down - height).abs())) / self.cell_size();

        let color = if height < water_level + 2.0 {
            TERRAIN_SAND_COLOR
        } else if steepness > 0.9 {
            TERRAIN_ROCK_COLOR
        } else {
            TERRAIN_GRASS_COLOR
        };
        Color::srgb_u8(color[0], color[1], color[2]).to_linear().to_f32_array()
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn natural_height(x: f32, z: f32, rail_height: f32) -> f32 {
    let plateau = rail_height - EMBANKMENT_RISE;
    let hills = HILL_AMPLITUDE
        * (0.5 * (x * 0.011).sin() * (z * 0.013).cos()
            + 0.3 * ((x + z) * 0.021 + 1.3).sin()
            + 0.2 * (x * 0.037 - z * 0.029).cos());
    let mut height = plateau + hills;

    let lake = Vec2::new(x, z).distance(LAKE_CENTER);
    height -= LAKE_DEPTH * smoothstep(1.0 - lake / LAKE_RADIUS);

    // River flows east out of the lake and under the bridge.
    if x > LAKE_CENTER.x {
        let across = (z - RIVER_CENTER_Z).abs();
        let fade_in = smoothstep((x - LAKE_CENTER.x) / 60.0);
        height -= RIVER_DEPTH * smoothstep(1.0 - across / RIVER_HALF_WIDTH) * fade_in;
    }

    let mountain = Vec2::new(x, z).distance(MOUNTAIN_CENTER);
    height += MOUNTAIN_HEIGHT * smoothstep(1.0 - mountain / MOUNTAIN_RADIUS);

    height
}

pub fn spawn_terrain(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    field: &HeightField,
    water_level: f32,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(field.build_mesh(water_level))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        Terrain,
        Name::new("Terrain"),
    ));
    info!(
        "✓ Terrain built: {0}x{0} cells over {1} m",
        field.resolution(),
        field.size()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::structures::{BRIDGE_START, TUNNEL_ENTRANCE, TUNNEL_LENGTH};
    use constants::track::TRACK_CONTROL_POINTS;

    const RAIL_HEIGHT: f32 = 56.0;

    #[test]
    fn bilinear_sampling_reproduces_a_plane() {
        let field = HeightField::from_fn(100.0, 10, |x, z| 2.0 * x + 3.0 * z + 1.0);
        for (x, z) in [(0.0, 0.0), (13.7, -21.2), (-49.0, 49.0), (5.0, 5.0)] {
            let expected = 2.0 * x + 3.0 * z + 1.0;
            assert!((field.height_at(x, z) - expected).abs() < 1e-3, "({x}, {z})");
        }
    }

    #[test]
    fn sampling_clamps_outside_the_field() {
        let field = HeightField::from_fn(100.0, 10, |x, _| x);
        assert!((field.height_at(500.0, 0.0) - 50.0).abs() < 1e-4);
        assert!((field.height_at(-500.0, 0.0) + 50.0).abs() < 1e-4);
        assert!(field.contains(50.0, -50.0));
        assert!(!field.contains(50.1, 0.0));
    }

    #[test]
    fn mesh_has_one_vertex_per_grid_point() {
        let field = HeightField::from_fn(40.0, 4, |_, _| 0.0);
        let mesh = field.build_mesh(-10.0);
        assert_eq!(mesh.count_vertices(), 25);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some());
    }

    #[test]
    fn ground_is_levelled_under_the_track() {
        let track = CurvePath::from_control_points(&TRACK_CONTROL_POINTS).unwrap();
        let field = HeightField::generate(&track, RAIL_HEIGHT);
        // Straight section along z = 150, far from the tunnel and the bridge.
        let height = field.height_at(60.0, 150.0);
        assert!((height - (RAIL_HEIGHT - EMBANKMENT_RISE)).abs() < 1.5, "height {height}");
    }

    #[test]
    fn tunnel_is_buried_and_river_runs_under_the_bridge() {
        let track = CurvePath::from_control_points(&TRACK_CONTROL_POINTS).unwrap();
        let field = HeightField::generate(&track, RAIL_HEIGHT);
        let roof = RAIL_HEIGHT + tunnel_crown_height();
        assert!(field.height_at(TUNNEL_ENTRANCE.x - TUNNEL_LENGTH / 2.0, TUNNEL_ENTRANCE.z) > roof);
        assert!(field.height_at(BRIDGE_START.x, RIVER_CENTER_Z) < RAIL_HEIGHT - 20.0);
    }
}
