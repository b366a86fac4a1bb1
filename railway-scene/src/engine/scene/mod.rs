//! Everything drawn around the track, and the assembly that puts it together.
//!
//! Scene pieces are spawned once on entering the running state. Nodes that
//! cameras or systems need later are registered by name in [`nodes::NodeRegistry`].

/// One-shot composition of the whole scene.
pub mod assembly;

/// Seeded tree placement.
pub mod forest;

/// Sun, ambient light, sky colour and the shared light bulb materials.
pub mod lighting;

/// Swept profiles and hand-built triangle meshes.
pub mod mesh_builder;

/// Named scene node handles.
pub mod nodes;

/// Embankment, rails and sleepers.
pub mod rails;

/// Bridge, tunnel and lamp posts.
pub mod structures;

/// Height field terrain.
pub mod terrain;

pub mod water;
