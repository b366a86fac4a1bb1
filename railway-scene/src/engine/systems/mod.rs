//! Runtime systems that are not tied to one scene piece.

/// Frame rate readout for the native overlay and the browser bridge.
pub mod fps_tracking;
