use bevy::prelude::*;
use constants::track::TRACK_CONTROL_POINTS;

use super::CurvePath;

/// Build the rail loop once at startup. A malformed control point list is fatal.
pub fn build_track(mut commands: Commands) -> Result {
    let path = CurvePath::from_control_points(&TRACK_CONTROL_POINTS)?;
    info!(
        "✓ Track built: {} segments, {:.1} m per lap",
        path.segments().len(),
        path.length()
    );
    commands.insert_resource(path);
    Ok(())
}
