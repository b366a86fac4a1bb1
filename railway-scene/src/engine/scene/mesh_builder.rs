use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

/// Indexed triangle list assembled on the CPU, with area-weighted smooth normals.
#[derive(Debug, Default, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

/// Cross-section placement along a sweep: profile x maps to `right`, profile y to `up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepFrame {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Distance along the sweep, used as the v texture coordinate.
    pub distance: f32,
}

impl SweepFrame {
    /// Level frame heading along the horizontal part of `tangent`.
    pub fn level(origin: Vec3, tangent: Vec3, distance: f32) -> Self {
        let forward = Vec3::new(tangent.x, 0.0, tangent.z).normalize_or(Vec3::NEG_Z);
        Self {
            origin,
            right: forward.cross(Vec3::Y),
            up: Vec3::Y,
            distance,
        }
    }

    pub fn place(&self, profile_point: Vec2) -> Vec3 {
        self.origin + self.right * profile_point.x + self.up * profile_point.y
    }
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, uv: Vec2) -> u32 {
        self.positions.push(position);
        self.uvs.push(uv.to_array());
        (self.positions.len() - 1) as u32
    }

    /// Counter-clockwise triangle as seen from the front.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Counter-clockwise quad as seen from the front.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Sweep an open `profile` polyline along `frames`.
    ///
    /// Each profile edge gets its own vertices so creases stay sharp across the
    /// profile while shading stays smooth along the sweep. For a profile
    /// wound counter-clockwise the faces point outwards.
    pub fn sweep(&mut self, profile: &[Vec2], frames: &[SweepFrame], close_profile: bool) {
        if profile.len() < 2 || frames.len() < 2 {
            return;
        }
        let edge_count = if close_profile { profile.len() } else { profile.len() - 1 };

        for edge in 0..edge_count {
            let from = profile[edge];
            let to = profile[(edge + 1) % profile.len()];
            let mut previous: Option<(u32, u32)> = None;
            for frame in frames {
                let a = self.push_vertex(frame.place(from), Vec2::new(0.0, frame.distance));
                let b = self.push_vertex(frame.place(to), Vec2::new(1.0, frame.distance));
                if let Some((prev_a, prev_b)) = previous {
                    self.push_quad(prev_a, a, b, prev_b);
                }
                previous = Some((a, b));
            }
        }
    }

    /// Fill a convex `profile` at one frame, facing along the sweep when `facing_forward`.
    pub fn cap(&mut self, profile: &[Vec2], frame: &SweepFrame, facing_forward: bool) {
        if profile.len() < 3 {
            return;
        }
        let first = self.push_vertex(frame.place(profile[0]), profile[0]);
        let ring: Vec<u32> = profile[1..]
            .iter()
            .map(|point| self.push_vertex(frame.place(*point), *point))
            .collect();
        for pair in ring.windows(2) {
            if facing_forward {
                self.push_triangle(first, pair[1], pair[0]);
            } else {
                self.push_triangle(first, pair[0], pair[1]);
            }
        }
    }

    fn normals(&self) -> Vec<[f32; 3]> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let face = (self.positions[b] - self.positions[a]).cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        normals
            .into_iter()
            .map(|normal| normal.normalize_or(Vec3::Y).to_array())
            .collect()
    }

    pub fn build(self) -> Mesh {
        let normals = self.normals();
        let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
            .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Opaque, double-sided material for generated geometry.
pub fn solid_material(color: [u8; 3], roughness: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_u8(color[0], color[1], color[2]),
        perceptual_roughness: roughness,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_frames(count: usize) -> Vec<SweepFrame> {
        (0..count)
            .map(|i| SweepFrame::level(Vec3::new(i as f32, 0.0, 0.0), Vec3::X, i as f32))
            .collect()
    }

    #[test]
    fn level_frame_puts_right_on_the_right() {
        let frame = SweepFrame::level(Vec3::ZERO, Vec3::X, 0.0);
        assert!(frame.right.distance(Vec3::Z) < 1e-6);
        assert_eq!(frame.place(Vec2::new(2.0, 1.0)), Vec3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn sweep_emits_one_quad_strip_per_profile_edge() {
        let profile = [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let mut open = TriangleMesh::default();
        open.sweep(&profile, &straight_frames(5), false);
        assert_eq!(open.vertex_count(), 2 * 5 * 2);
        assert_eq!(open.triangle_count(), 2 * 4 * 2);

        let mut closed = TriangleMesh::default();
        closed.sweep(&profile, &straight_frames(5), true);
        assert_eq!(closed.triangle_count(), 3 * 4 * 2);
    }

    #[test]
    fn counter_clockwise_profile_faces_outwards() {
        // Floor edge of a profile wound counter-clockwise should face down.
        let profile = [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)];
        let mut mesh = TriangleMesh::default();
        mesh.sweep(&profile, &straight_frames(2), false);
        for normal in mesh.normals() {
            assert!(Vec3::from_array(normal).distance(Vec3::NEG_Y) < 1e-5);
        }
    }
}
