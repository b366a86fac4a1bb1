use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::controls::{ControlEvent, ControlPanel};
use crate::engine::systems::fps_tracking::current_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_controls_changed.run_if(resource_exists::<ControlPanel>),
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    panel: Option<Res<ControlPanel>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut control_events: EventWriter<ControlEvent>,
) {
    let fps = current_fps(&diagnostics);
    for event in events.read() {
        debug!("Received RPC: {}", event.content);

        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let (response, control) = handle_rpc_request(&request, fps, panel.as_deref());
                if let Some(control) = control {
                    info!("RPC {} -> {:?}", request.method, control);
                    control_events.write(control);
                }
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
            }
        }
    }
}

/// Handle one request, returning the response (requests with an ID only) and
/// the control change it asks for, if any.
fn handle_rpc_request(
    request: &RpcRequest,
    fps: f32,
    panel: Option<&ControlPanel>,
) -> (Option<RpcResponse>, Option<ControlEvent>) {
    let (result, control) = match request.method.as_str() {
        "get_fps" => (Ok(serde_json::json!({ "fps": fps })), None),
        "get_controls" => (handle_get_controls(panel), None),
        method => match control_event(method, &request.params) {
            Some(Ok(event)) => (Ok(serde_json::json!({ "success": true })), Some(event)),
            Some(Err(error)) => (Err(error), None),
            None => {
                warn!("Unknown RPC method: {}", request.method);
                (
                    Err(RpcError {
                        code: -32601,
                        message: "Method not found".to_string(),
                        data: Some(serde_json::json!({ "method": request.method })),
                    }),
                    None,
                )
            }
        },
    };

    // Notifications (no ID) still apply their change but get no reply.
    let response = request.id.clone().map(|id| match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    });
    (response, control)
}

fn handle_get_controls(panel: Option<&ControlPanel>) -> Result<serde_json::Value, RpcError> {
    let panel = panel.ok_or_else(|| RpcError::internal_error("Scene is still loading"))?;
    serde_json::to_value(panel).map_err(|error| RpcError::internal_error(&error.to_string()))
}

fn params<T: DeserializeOwned>(params: &serde_json::Value, expected: &str) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone()).map_err(|_| RpcError::invalid_params(expected))
}

/// Control panel change requested by a setter method, `None` for other methods.
fn control_event(method: &str, raw: &serde_json::Value) -> Option<Result<ControlEvent, RpcError>> {
    #[derive(Deserialize)]
    struct Speed {
        speed: f32,
    }
    #[derive(Deserialize)]
    struct Delta {
        delta: f32,
    }
    #[derive(Deserialize)]
    struct Level {
        level: f32,
    }
    #[derive(Deserialize)]
    struct Switch {
        on: bool,
    }
    #[derive(Deserialize)]
    struct Slot {
        slot: u8,
    }

    let event = match method {
        "set_train_speed" => {
            params::<Speed>(raw, "Expected numeric 'speed' parameter").map(|p| ControlEvent::SetTrainSpeed(p.speed))
        }
        "adjust_train_speed" => params::<Delta>(raw, "Expected numeric 'delta' parameter")
            .map(|p| ControlEvent::AdjustTrainSpeed(p.delta)),
        "set_day_speed" => {
            params::<Speed>(raw, "Expected numeric 'speed' parameter").map(|p| ControlEvent::SetDaySpeed(p.speed))
        }
        "set_water_level" => {
            params::<Level>(raw, "Expected numeric 'level' parameter").map(|p| ControlEvent::SetWaterLevel(p.level))
        }
        "set_train_light" => {
            params::<Switch>(raw, "Expected boolean 'on' parameter").map(|p| ControlEvent::SetTrainLight(p.on))
        }
        "set_lamp_lights" => {
            params::<Switch>(raw, "Expected boolean 'on' parameter").map(|p| ControlEvent::SetLampLights(p.on))
        }
        "set_shadows" => {
            params::<Switch>(raw, "Expected boolean 'on' parameter").map(|p| ControlEvent::SetShadows(p.on))
        }
        "select_camera" => {
            params::<Slot>(raw, "Expected 'slot' parameter in 0..=255").map(|p| ControlEvent::SelectCamera(p.slot))
        }
        _ => return None,
    };
    Some(event)
}

/// Push the whole panel to the host page whenever it changes.
fn notify_controls_changed(panel: Res<ControlPanel>, mut rpc_interface: ResMut<WebRpcInterface>) {
    if !panel.is_changed() {
        return;
    }
    match serde_json::to_value(&*panel) {
        Ok(params) => rpc_interface.send_notification("controls_changed", params),
        Err(error) => error!("Failed to serialize control panel: {}", error),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (the host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_config::SceneConfig;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value, id: Option<u64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(|id| json!(id)),
        }
    }

    #[test]
    fn setters_map_to_control_events() {
        let cases = [
            ("set_train_speed", json!({ "speed": 42.5 }), ControlEvent::SetTrainSpeed(42.5)),
            ("adjust_train_speed", json!({ "delta": -5 }), ControlEvent::AdjustTrainSpeed(-5.0)),
            ("set_water_level", json!({ "level": 31 }), ControlEvent::SetWaterLevel(31.0)),
            ("set_lamp_lights", json!({ "on": true }), ControlEvent::SetLampLights(true)),
            ("select_camera", json!({ "slot": 6 }), ControlEvent::SelectCamera(6)),
        ];
        for (method, params, expected) in cases {
            let (response, event) = handle_rpc_request(&request(method, params, Some(1)), 0.0, None);
            assert_eq!(event, Some(expected), "{method}");
            let response = response.unwrap();
            assert!(response.error.is_none());
            assert_eq!(response.result, Some(json!({ "success": true })));
        }
    }

    #[test]
    fn bad_params_are_rejected_without_side_effects() {
        for (method, params) in [
            ("set_train_speed", json!({ "speed": "fast" })),
            ("set_shadows", json!({})),
            ("select_camera", json!({ "slot": 300 })),
            ("select_camera", json!({ "slot": -1 })),
        ] {
            let (response, event) = handle_rpc_request(&request(method, params, Some(7)), 0.0, None);
            assert_eq!(event, None);
            let error = response.unwrap().error.unwrap();
            assert_eq!(error.code, -32602, "{method}");
        }
    }

    #[test]
    fn unknown_methods_report_not_found() {
        let (response, event) = handle_rpc_request(&request("derail", json!({}), Some(3)), 0.0, None);
        assert_eq!(event, None);
        let response = response.unwrap();
        assert_eq!(response.id, Some(json!(3)));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn notifications_apply_without_a_reply() {
        let (response, event) = handle_rpc_request(&request("set_train_light", json!({ "on": true }), None), 0.0, None);
        assert!(response.is_none());
        assert_eq!(event, Some(ControlEvent::SetTrainLight(true)));
    }

    #[test]
    fn controls_are_reported_once_loaded() {
        let (response, _) = handle_rpc_request(&request("get_controls", json!(null), Some(1)), 0.0, None);
        assert_eq!(response.unwrap().error.unwrap().code, -32603);

        let panel = ControlPanel::from_config(&SceneConfig::default());
        let (response, _) = handle_rpc_request(&request("get_controls", json!(null), Some(2)), 58.0, Some(&panel));
        let result = response.unwrap().result.unwrap();
        assert_eq!(result["train_speed"], json!(panel.train_speed));
        assert_eq!(result["camera"], json!(panel.camera));

        let (response, _) = handle_rpc_request(&request("get_fps", json!(null), Some(3)), 58.0, None);
        assert_eq!(response.unwrap().result, Some(json!({ "fps": 58.0 })));
    }

    #[test]
    fn missing_params_field_parses() {
        let request: RpcRequest = serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_fps","id":1}"#).unwrap();
        assert!(request.params.is_null());
    }
}
