/// Startup tunables, loaded through the JSON asset plugin.
pub const SCENE_CONFIG_PATH: &str = "scene_config.json";
