//! Startup configuration asset for the railway scene.

/// Scene tunables deserialised from JSON through the asset server.
pub mod scene_config;
