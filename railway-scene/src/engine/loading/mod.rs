//! Startup loading of the scene configuration.
//!
//! The config asset is the only thing awaited before the scene is composed.

/// Scene config asset request and polling, with a defaults fallback.
pub mod config_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
