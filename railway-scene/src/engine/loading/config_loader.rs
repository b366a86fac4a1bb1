use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::SCENE_CONFIG_PATH;
use crate::controls::ControlPanel;
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<SceneConfig>>,
}

pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    config_loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

/// Wait for the config asset, falling back to defaults if it cannot be loaded.
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<SceneConfig>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if loading_progress.config_loaded {
        return;
    }
    let Some(handle) = config_loader.handle.as_ref() else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("✓ Scene config loaded");
        config.clone()
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        warn!("Scene config unavailable ({error}), using defaults");
        loading_progress.config_defaulted = true;
        SceneConfig::default()
    } else {
        return;
    };

    commands.insert_resource(ControlPanel::from_config(&config));
    commands.insert_resource(config);
    loading_progress.config_loaded = true;
}
