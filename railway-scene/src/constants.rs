//! App-local settings that are not shared with other workspace crates.

/// Asset paths relative to the asset root.
pub mod path;

/// Materials, shadows and UI refresh rates.
pub mod render_settings;
