//! JSON-RPC 2.0 bridge between the scene and the page hosting its canvas.
//!
//! Implements bidirectional messaging via `window.postMessage`, supporting
//! both request-response and notification patterns. Native builds compile the
//! same systems, they simply never receive messages.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Map to ControlEvent
//!        │ <──────────────── Response (with ID)┤
//!        │                                     │
//!        │ <────────── Notification (no ID) ───┤
//! ```
//!
//! Requests without an ID are treated as notifications: setters still apply,
//! but nothing is sent back.
//!
//! ## Methods
//!
//! ### Control panel
//! - `set_train_speed {speed}` / `adjust_train_speed {delta}`
//! - `set_day_speed {speed}`
//! - `set_water_level {level}`
//! - `set_train_light {on}` / `set_lamp_lights {on}` / `set_shadows {on}`
//! - `select_camera {slot}`
//! - `get_controls`: current panel state
//!
//! ### Diagnostics
//! - `get_fps`: smoothed frame rate
//!
//! ## Notifications sent by the scene
//! - `controls_changed`: full panel state after any change
//! - `fps_update`: frame rate every half second
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error (e.g. controls queried while loading)

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
