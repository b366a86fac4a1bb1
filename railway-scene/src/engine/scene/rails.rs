//! Embankment, rails and sleepers swept along the track.
use bevy::prelude::*;
use constants::track::{
    EMBANKMENT_PROFILE, EMBANKMENT_STEPS, RAIL_GAUGE, RAIL_HEIGHT_ABOVE_BED, RAIL_WIDTH, SLEEPER_SIZE,
    SLEEPER_SPACING,
};

use super::mesh_builder::{SweepFrame, TriangleMesh, solid_material};
use super::structures::in_bridge_zone;
use crate::constants::render_settings::{EMBANKMENT_COLOR, RAIL_COLOR, SLEEPER_COLOR};
use crate::engine::track::CurvePath;

/// Level frames around one full lap at the rail bed height; the last frame repeats the first.
pub fn track_frames(track: &CurvePath, steps: usize, bed_height: f32) -> Vec<SweepFrame> {
    let samples = track.sample(steps);
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let closing = (first.point, first.tangent, track.length());
    samples
        .iter()
        .map(|sample| (sample.point, sample.tangent, sample.distance))
        .chain(std::iter::once(closing))
        .map(|(point, tangent, distance)| {
            SweepFrame::level(Vec3::new(point.x, bed_height, point.z), tangent, distance)
        })
        .collect()
}

/// Contiguous runs of at least two frames for which `keep` holds.
pub fn frame_runs(frames: &[SweepFrame], keep: impl Fn(&SweepFrame) -> bool) -> Vec<&[SweepFrame]> {
    let mut runs = Vec::new();
    let mut start = None;
    for (index, frame) in frames.iter().enumerate() {
        match (keep(frame), start) {
            (true, None) => start = Some(index),
            (false, Some(run_start)) => {
                runs.push(&frames[run_start..index]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(run_start) = start {
        runs.push(&frames[run_start..]);
    }
    runs.retain(|run| run.len() >= 2);
    runs
}

/// Earth embankment under the track everywhere except across the bridge.
pub fn embankment_mesh(frames: &[SweepFrame]) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    for run in frame_runs(frames, |frame| !in_bridge_zone(frame.origin.x, frame.origin.z)) {
        mesh.sweep(&EMBANKMENT_PROFILE, run, true);
        if let (Some(first), Some(last)) = (run.first(), run.last()) {
            mesh.cap(&EMBANKMENT_PROFILE, first, false);
            mesh.cap(&EMBANKMENT_PROFILE, last, true);
        }
    }
    mesh
}

fn rail_profile(center: f32) -> [Vec2; 4] {
    let half = RAIL_WIDTH / 2.0;
    [
        Vec2::new(center - half, 0.0),
        Vec2::new(center + half, 0.0),
        Vec2::new(center + half, RAIL_HEIGHT_ABOVE_BED),
        Vec2::new(center - half, RAIL_HEIGHT_ABOVE_BED),
    ]
}

pub fn rails_mesh(frames: &[SweepFrame]) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    for center in [-RAIL_GAUGE / 2.0, RAIL_GAUGE / 2.0] {
        mesh.sweep(&rail_profile(center), frames, true);
    }
    mesh
}

/// Sleeper placements along one lap, resting on the bed.
pub fn sleeper_transforms(track: &CurvePath, bed_height: f32) -> Vec<Transform> {
    track
        .sample_every(SLEEPER_SPACING)
        .into_iter()
        .map(|sample| {
            let frame = SweepFrame::level(sample.point, sample.tangent, sample.distance);
            let forward = frame.up.cross(frame.right);
            Transform::from_xyz(sample.point.x, bed_height + SLEEPER_SIZE.y / 2.0, sample.point.z)
                .looking_to(forward, Vec3::Y)
        })
        .collect()
}

pub fn spawn_railway(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    track: &CurvePath,
    bed_height: f32,
) {
    let frames = track_frames(track, EMBANKMENT_STEPS, bed_height);

    commands.spawn((
        Mesh3d(meshes.add(embankment_mesh(&frames).build())),
        MeshMaterial3d(materials.add(solid_material(EMBANKMENT_COLOR, 1.0))),
        Name::new("Embankment"),
    ));

    let steel = materials.add(StandardMaterial {
        metallic: 0.9,
        ..solid_material(RAIL_COLOR, 0.3)
    });
    commands.spawn((
        Mesh3d(meshes.add(rails_mesh(&frames).build())),
        MeshMaterial3d(steel),
        Name::new("Rails"),
    ));

    let sleeper_mesh = meshes.add(Cuboid::from_size(SLEEPER_SIZE));
    let sleeper_material = materials.add(solid_material(SLEEPER_COLOR, 0.9));
    let sleepers = sleeper_transforms(track, bed_height);
    let count = sleepers.len();
    commands.spawn_batch(sleepers.into_iter().map(move |transform| {
        (
            Mesh3d(sleeper_mesh.clone()),
            MeshMaterial3d(sleeper_material.clone()),
            transform,
        )
    }));

    info!("✓ Railway laid: {} frames, {} sleepers", frames.len(), count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::track::TRACK_CONTROL_POINTS;

    fn track() -> CurvePath {
        CurvePath::from_control_points(&TRACK_CONTROL_POINTS).unwrap()
    }

    #[test]
    fn frames_close_the_loop() {
        let frames = track_frames(&track(), 100, 56.0);
        assert_eq!(frames.len(), 101);
        let (first, last) = (frames[0], frames[100]);
        assert!(first.origin.distance(last.origin) < 1e-3);
        assert!(frames.iter().all(|frame| frame.origin.y == 56.0));
    }

    #[test]
    fn runs_split_around_rejected_frames() {
        let frames: Vec<SweepFrame> = (0..10)
            .map(|i| SweepFrame::level(Vec3::new(i as f32, 0.0, 0.0), Vec3::X, i as f32))
            .collect();
        let runs = frame_runs(&frames, |frame| !(3.0..=5.0).contains(&frame.origin.x));
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[1].len(), 4);

        // Single-frame runs are dropped.
        let runs = frame_runs(&frames, |frame| frame.origin.x == 0.0);
        assert!(runs.is_empty());
    }

    #[test]
    fn embankment_stops_at_the_bridge() {
        let frames = track_frames(&track(), 500, 56.0);
        let kept = frame_runs(&frames, |frame| !in_bridge_zone(frame.origin.x, frame.origin.z));
        assert!(kept.len() >= 2);
        assert!(embankment_mesh(&frames).triangle_count() > 0);
    }

    #[test]
    fn sleepers_lie_across_the_track() {
        let sleepers = sleeper_transforms(&track(), 56.0);
        // Track starts heading +X, so the long side of the first sleeper lies along Z.
        let across = sleepers[0].rotation * Vec3::X;
        assert!(across.x.abs() < 1e-4);
        assert!((across.z.abs() - 1.0).abs() < 1e-4);
        assert_eq!(sleepers[0].translation.y, 56.0 + SLEEPER_SIZE.y / 2.0);
    }
}
