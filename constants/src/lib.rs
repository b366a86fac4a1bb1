//! Shared scene constants for the railway scene.
//!
//! Geometry, dimensions and palettes that are fixed at compile time. Runtime
//! tunables live in the scene config asset instead.

/// Default camera pose, slots and projection settings.
pub mod camera;

/// Sun path and colour gradient for the day/night cycle.
pub mod lighting;

/// Bridge, tunnel and lamp post dimensions and placement.
pub mod structures;

/// Terrain extent, resolution and landmark positions.
pub mod terrain;

/// Track control points and embankment profile.
pub mod track;

/// Locomotive dimensions.
pub mod train;
