use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::{AppState, MuseumCommand};
use crate::engine::core::session::WalletSession;
use crate::engine::loading::catalog::Catalog;
use crate::engine::loading::item_loader::{CatalogState, CatalogStatus, ReloadCatalog};
use crate::engine::proximity::loader::ProximityLoader;
use crate::engine::systems::fps_tracking::smoothed_fps;

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

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and Bevy. Handles both request-response patterns and notification broadcasting.
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

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// A recognised host request with its parameters decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCommand {
    GetFps,
    GetMuseumStatus,
    EnterMuseum,
    ExitMuseum,
    WalletSession(WalletSession),
    ReloadCatalog,
}

/// Session payload pushed by the host page's wallet provider.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WalletSessionParams {
    #[serde(default)]
    logged_in: bool,
    #[serde(default)]
    addr: Option<String>,
}

/// Map a method name and its params onto a command.
pub fn parse_rpc_command(method: &str, params: &serde_json::Value) -> Result<RpcCommand, RpcError> {
    match method {
        "get_fps" => Ok(RpcCommand::GetFps),
        "get_museum_status" => Ok(RpcCommand::GetMuseumStatus),
        "enter_museum" => Ok(RpcCommand::EnterMuseum),
        "exit_museum" => Ok(RpcCommand::ExitMuseum),
        "reload_catalog" => Ok(RpcCommand::ReloadCatalog),
        "wallet_session" => {
            let session = serde_json::from_value::<WalletSessionParams>(params.clone())
                .map_err(|_| RpcError::invalid_params("Expected '{loggedIn, addr}' parameters"))?;
            Ok(RpcCommand::WalletSession(WalletSession {
                logged_in: session.logged_in,
                addr: session.addr.filter(|addr| !addr.is_empty()),
            }))
        }
        _ => Err(RpcError::method_not_found(method)),
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
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
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

/// Snapshot of the viewer for `get_museum_status`.
fn museum_status(
    state: &AppState,
    catalog: &Catalog,
    catalog_state: &CatalogState,
    loader: &ProximityLoader,
) -> serde_json::Value {
    let status = match &catalog_state.status {
        CatalogStatus::Idle => "idle",
        CatalogStatus::Loading => "loading",
        CatalogStatus::Ready => "ready",
        CatalogStatus::Failed(_) => "failed",
    };
    serde_json::json!({
        "state": format!("{:?}", state),
        "catalog": status,
        "error": catalog_state.error(),
        "items": catalog.item_count(),
        "sections": catalog.sections.len(),
        "owned": catalog.owned_count(),
        "ownership_loaded": catalog_state.ownership_loaded(),
        "mounted": loader.mounted().count(),
        "active_videos": loader.active_videos(),
        "video_capacity": loader.video_capacity(),
    })
}

#[allow(clippy::too_many_arguments)]
fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut museum_commands: EventWriter<MuseumCommand>,
    mut reloads: EventWriter<ReloadCatalog>,
    mut session: ResMut<WalletSession>,
    state: Res<State<AppState>>,
    catalog: Res<Catalog>,
    catalog_state: Res<CatalogState>,
    loader: Res<ProximityLoader>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
                continue;
            }
        };

        rpc_interface.send_notification(
            "debug_message",
            serde_json::json!({
                "message": format!("Processing method: {}", request.method)
            }),
        );

        let parsed = if request.jsonrpc == "2.0" {
            parse_rpc_command(&request.method, &request.params)
        } else {
            Err(RpcError::invalid_request("Expected jsonrpc 2.0"))
        };

        let result = parsed.map(|command| {
            match command {
                RpcCommand::GetFps => serde_json::json!({
                    "fps": smoothed_fps(&diagnostics).unwrap_or(0.0) as f32
                }),
                RpcCommand::GetMuseumStatus => {
                    museum_status(state.get(), &catalog, &catalog_state, &loader)
                }
                RpcCommand::EnterMuseum => {
                    museum_commands.write(MuseumCommand::Enter);
                    serde_json::json!({ "success": true })
                }
                RpcCommand::ExitMuseum => {
                    museum_commands.write(MuseumCommand::Exit);
                    serde_json::json!({ "success": true })
                }
                RpcCommand::WalletSession(update) => {
                    // Only a real change should trigger a refetch.
                    session.set_if_neq(update);
                    serde_json::json!({
                        "success": true,
                        "wallet": session.wallet(),
                    })
                }
                RpcCommand::ReloadCatalog => {
                    reloads.write(ReloadCatalog);
                    serde_json::json!({ "success": true })
                }
            }
        });

        if let Err(error) = &result {
            warn!("RPC {} failed: {}", request.method, error.message);
        }

        // Only generate responses for requests with IDs (notifications have no ID).
        if let Some(id) = request.id {
            rpc_interface.queue_response(match result {
                Ok(result_value) => RpcResponse {
                    jsonrpc: "2.0".to_string(),
                    result: Some(result_value),
                    error: None,
                    id: Some(id),
                },
                Err(error) => create_error_response(id, error),
            });
        }
    }
}

/// Create standardized error response.
fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
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

/// Send serialized message to parent window (host page).
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
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_methods_parse_without_params() {
        assert_eq!(parse_rpc_command("get_fps", &json!(null)), Ok(RpcCommand::GetFps));
        assert_eq!(
            parse_rpc_command("enter_museum", &json!({})),
            Ok(RpcCommand::EnterMuseum)
        );
        assert_eq!(
            parse_rpc_command("reload_catalog", &json!(null)),
            Ok(RpcCommand::ReloadCatalog)
        );
    }

    #[test]
    fn wallet_session_reads_camel_case_fields() {
        let command =
            parse_rpc_command("wallet_session", &json!({"loggedIn": true, "addr": "0xabc"}));
        assert_eq!(
            command,
            Ok(RpcCommand::WalletSession(WalletSession {
                logged_in: true,
                addr: Some("0xabc".into()),
            }))
        );

        let logged_out = parse_rpc_command("wallet_session", &json!({"addr": ""}));
        assert_eq!(
            logged_out,
            Ok(RpcCommand::WalletSession(WalletSession::default()))
        );
    }

    #[test]
    fn malformed_params_are_invalid() {
        let err = parse_rpc_command("wallet_session", &json!({"loggedIn": "yes"})).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let err = parse_rpc_command("tool_selection", &json!({})).unwrap_err();
        assert_eq!(err.code, -32601);
        assert_eq!(err.data, Some(json!({"method": "tool_selection"})));
    }

    #[test]
    fn request_without_params_deserialises() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_fps","id":1}"#).unwrap();
        assert_eq!(request.params, serde_json::Value::Null);
        assert_eq!(request.id, Some(json!(1)));
    }

    #[test]
    fn notifications_queue_in_order() {
        let mut rpc = WebRpcInterface::default();
        rpc.send_notification("museum_loaded", json!({"items": 3}));
        rpc.send_notification("fps_update", json!({"fps": 60.0}));
        let methods: Vec<_> = rpc
            .pending_notifications()
            .iter()
            .map(|n| n.method.as_str())
            .collect();
        assert_eq!(methods, vec!["museum_loaded", "fps_update"]);
    }
}
