//! Control panel state and the keyboard shortcuts that drive it.
//!
//! Every change goes through a [`ControlEvent`]; scene systems react to the
//! panel resource changing.

pub mod control_panel;
pub mod keyboard;

pub use control_panel::{ControlEvent, ControlPanel, apply_control_events};
pub use keyboard::keyboard_shortcuts;
