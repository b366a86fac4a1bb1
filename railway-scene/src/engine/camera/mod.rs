//! Camera rig registry and the interactive controllers it switches between.

/// Per-frame pointer and WASD snapshot.
pub mod input;

/// Damped spherical orbit controller.
pub mod orbit;

/// Yaw/pitch walker with planar movement.
pub mod first_person;

/// Slot registry, selection and per-frame reconciliation.
pub mod rig;

pub mod systems;

pub use rig::{CameraControllers, CameraRigRegistry, RigMode};
pub use systems::RigCamera;
