//! Rail track geometry.
//!
//! The track is a closed loop of cubic Bezier segments. Everything that moves
//! along the rails, and everything laid beside them, queries it by distance.

/// Single cubic Bezier segment with an arc-length lookup table.
pub mod bezier;

/// Closed composite path and distance-based point/tangent queries.
pub mod curve_path;

/// Track construction errors.
pub mod error;

/// Startup system building the track resource from the control points.
pub mod systems;

pub use curve_path::{CurvePath, PathSample};
pub use error::TrackError;
