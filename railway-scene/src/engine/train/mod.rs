//! The locomotive: distance integration, model and per-frame systems.

/// Distance accumulator and pose derivation.
pub mod kinematics;

/// Locomotive meshes, headlight and the camera anchors riding with it.
pub mod model;

/// Wheel and connecting rod rotation driven by the distance increment.
pub mod secondary_motion;

pub mod systems;

pub use kinematics::{TrainKinematics, TrainPose};
pub use model::{Train, spawn_train};
