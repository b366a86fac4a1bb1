use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_loaded: bool,
    /// True when the config came from built-in defaults instead of the asset.
    pub config_defaulted: bool,
}
