use bevy::prelude::*;
use constants::lighting::ENVIRONMENT_MAP_INTENSITY;
use constants::session::{DOM_OVERLAY_ROOT, OPTIONAL_FEATURES, REQUIRED_FEATURES};
use serde::{Deserialize, Serialize};

use crate::engine::catalog::{PlacementCatalog, SelectionChanged, TemplatePrepared};
use crate::engine::core::tick::ArTickSet;
use crate::engine::lighting::{EnvironmentMap, LightingChanged, LightingMode};
use crate::engine::overlay::OverlayCreated;
use crate::engine::placement::PlacementResult;
use crate::xr::{
    HitTestSourceId, LightEstimate, ReferenceSpaceId, SessionId, XrFrame, XrInbox, XrMessage,
    XrOutbox, XrRequest, drain_xr_inbox,
};

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

/// Resource managing bidirectional RPC communication with the host page.
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

/// Plugin establishing the WebRPC layer between the engine and its host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(ArTickSet::Ingest)
                    .before(drain_xr_inbox),
            )
            .add_systems(
                Update,
                (
                    publish_engine_notifications,
                    forward_xr_requests,
                    send_outgoing_messages,
                )
                    .chain()
                    .in_set(ArTickSet::Present),
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

/// Read-only engine state and the forwarding sink a request is handled against.
pub struct RpcContext<'a> {
    pub catalog: &'a PlacementCatalog,
    pub asset_server: Option<&'a AssetServer>,
    /// Messages to replay on the tick, in order.
    pub forwarded: Vec<XrMessage>,
    /// Errors from requests sent without an ID.
    pub failures: Vec<RpcFailure>,
}

/// A notification-style request that could not be handled.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcFailure {
    pub method: String,
    pub error: RpcError,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    catalog: Res<PlacementCatalog>,
    asset_server: Option<Res<AssetServer>>,
    inbox: Res<XrInbox>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut context = RpcContext {
                    catalog: &catalog,
                    asset_server: asset_server.as_deref(),
                    forwarded: Vec::new(),
                    failures: Vec::new(),
                };
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
                for message in context.forwarded {
                    inbox.push(message);
                }
                for failure in context.failures {
                    report_failure(&mut rpc_interface, failure);
                }
            }
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "rpc_error",
                    serde_json::json!({
                        "code": -32700,
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

fn report_failure(rpc_interface: &mut WebRpcInterface, failure: RpcFailure) {
    rpc_interface.send_notification(
        "rpc_error",
        serde_json::json!({
            "code": failure.error.code,
            "message": failure.error.message,
            "data": failure.error.data,
            "method": failure.method,
        }),
    );
}

/// Handle an individual RPC message. Only requests with IDs get a response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &mut RpcContext<'_>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "xr_event" => handle_xr_event(&request.params, context),
        "get_catalog" => handle_get_catalog(context.catalog),
        "select_item" => handle_select_item(&request.params, context),
        "place" => {
            context.forwarded.push(XrMessage::Select);
            Ok(serde_json::json!({ "queued": true }))
        }
        "get_session_config" => Ok(session_config()),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let Some(id) = request.id.clone() else {
        // Notifications have nobody to answer; failures are reported instead.
        if let Err(error) = result {
            warn!("RPC notification '{}' failed: {}", request.method, error.message);
            context.failures.push(RpcFailure {
                method: request.method.clone(),
                error,
            });
        }
        return None;
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(create_error_response(
            id,
            error.code,
            &error.message,
            error.data,
        )),
    }
}

/// Platform events as posted by the WebXR glue. Matrices are column-major.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum XrEventParams {
    SessionStarted {
        session: u64,
    },
    SessionEnded {
        session: u64,
    },
    ReferenceSpaceResolved {
        session: u64,
        space: u64,
    },
    HitTestSourceResolved {
        session: u64,
        source: u64,
    },
    Frame {
        session: u64,
        view: [f32; 16],
        projection: [f32; 16],
        viewport: [f32; 2],
        #[serde(default)]
        hits: Vec<HitParams>,
    },
    EstimationStarted {
        #[serde(default)]
        environment: Option<EnvironmentParams>,
    },
    EstimationEnded,
    LightEstimate {
        direction: [f32; 3],
        colour: [f32; 3],
        illuminance: f32,
    },
    Select,
}

#[derive(Deserialize, Debug)]
struct HitParams {
    source: u64,
    poses: Vec<[f32; 16]>,
}

#[derive(Deserialize, Debug)]
struct EnvironmentParams {
    diffuse: String,
    specular: String,
    #[serde(default)]
    intensity: Option<f32>,
}

fn handle_xr_event(
    params: &serde_json::Value,
    context: &mut RpcContext<'_>,
) -> Result<serde_json::Value, RpcError> {
    let parsed = serde_json::from_value::<XrEventParams>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Invalid xr_event: {}", e)))?;

    let message = match parsed {
        XrEventParams::SessionStarted { session } => XrMessage::SessionStarted {
            session: SessionId(session),
        },
        XrEventParams::SessionEnded { session } => XrMessage::SessionEnded {
            session: SessionId(session),
        },
        XrEventParams::ReferenceSpaceResolved { session, space } => {
            XrMessage::ReferenceSpaceResolved {
                session: SessionId(session),
                space: ReferenceSpaceId(space),
            }
        }
        XrEventParams::HitTestSourceResolved { session, source } => {
            XrMessage::HitTestSourceResolved {
                session: SessionId(session),
                source: HitTestSourceId(source),
            }
        }
        XrEventParams::Frame {
            session,
            view,
            projection,
            viewport,
            hits,
        } => {
            let mut frame = XrFrame::new(SessionId(session), Vec2::from_array(viewport));
            frame.view = Mat4::from_cols_array(&view);
            frame.projection = Mat4::from_cols_array(&projection);
            for hit in hits {
                let poses = hit.poses.iter().map(Mat4::from_cols_array).collect();
                frame = frame.with_hit_results(HitTestSourceId(hit.source), poses);
            }
            XrMessage::Frame(frame)
        }
        XrEventParams::EstimationStarted { environment } => XrMessage::EstimationStarted {
            environment: environment.and_then(|env| load_environment(env, context.asset_server)),
        },
        XrEventParams::EstimationEnded => XrMessage::EstimationEnded,
        XrEventParams::LightEstimate {
            direction,
            colour,
            illuminance,
        } => XrMessage::LightEstimate(LightEstimate {
            direction: Vec3::from_array(direction),
            colour,
            illuminance,
        }),
        XrEventParams::Select => XrMessage::Select,
    };

    context.forwarded.push(message);
    Ok(serde_json::json!({ "accepted": true }))
}

fn load_environment(
    params: EnvironmentParams,
    asset_server: Option<&AssetServer>,
) -> Option<EnvironmentMap> {
    let Some(asset_server) = asset_server else {
        warn!("No asset server, ignoring estimated environment map");
        return None;
    };
    Some(EnvironmentMap {
        diffuse: asset_server.load(params.diffuse),
        specular: asset_server.load(params.specular),
        intensity: params.intensity.unwrap_or(ENVIRONMENT_MAP_INTENSITY),
    })
}

fn handle_get_catalog(catalog: &PlacementCatalog) -> Result<serde_json::Value, RpcError> {
    let items: Vec<serde_json::Value> = catalog
        .items()
        .enumerate()
        .map(|(index, item)| {
            serde_json::json!({
                "index": index,
                "name": item.info.name,
                "price": item.info.price,
                "material": item.info.material,
                "scale": item.scale,
                "ready": catalog.is_ready(index),
            })
        })
        .collect();

    Ok(serde_json::json!({
        "items": items,
        "selected": catalog.selected_index(),
    }))
}

fn handle_select_item(
    params: &serde_json::Value,
    context: &mut RpcContext<'_>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SelectItemParams {
        index: usize,
    }

    let parsed = serde_json::from_value::<SelectItemParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;

    if parsed.index >= context.catalog.len() {
        return Err(RpcError::invalid_params(&format!(
            "Index {} out of range for {} items",
            parsed.index,
            context.catalog.len()
        )));
    }

    context.forwarded.push(XrMessage::SelectItem {
        index: parsed.index,
    });

    Ok(serde_json::json!({
        "success": true,
        "selected": parsed.index,
        "ready": context.catalog.is_ready(parsed.index)
    }))
}

fn session_config() -> serde_json::Value {
    serde_json::json!({
        "required_features": REQUIRED_FEATURES,
        "optional_features": OPTIONAL_FEATURES,
        "dom_overlay_root": DOM_OVERLAY_ROOT,
    })
}

/// Push engine outcomes to the host page.
fn publish_engine_notifications(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut placements: EventReader<PlacementResult>,
    mut overlays: EventReader<OverlayCreated>,
    mut selections: EventReader<SelectionChanged>,
    mut templates: EventReader<TemplatePrepared>,
    mut lighting: EventReader<LightingChanged>,
) {
    for PlacementResult(outcome) in placements.read() {
        rpc_interface.send_notification(
            "placement_result",
            serde_json::json!({
                "outcome": outcome.as_str(),
                "item": outcome.item(),
            }),
        );
    }

    for overlay in overlays.read() {
        rpc_interface.send_notification(
            "overlay_created",
            serde_json::json!({
                "text": overlay.text,
                "x": overlay.position.x,
                "y": overlay.position.y,
                "ttl_ms": overlay.ttl.as_millis() as u64,
            }),
        );
    }

    for selection in selections.read() {
        rpc_interface.send_notification(
            "selection_changed",
            serde_json::json!({ "index": selection.index }),
        );
    }

    for template in templates.read() {
        rpc_interface.send_notification(
            "catalog_item_ready",
            serde_json::json!({ "index": template.index }),
        );
    }

    for change in lighting.read() {
        let mode = match change.mode {
            LightingMode::Static => "static",
            LightingMode::Estimated => "estimated",
        };
        rpc_interface.send_notification("lighting_changed", serde_json::json!({ "mode": mode }));
    }
}

/// Hand tracker requests to the WebXR glue.
fn forward_xr_requests(mut outbox: ResMut<XrOutbox>, mut rpc_interface: ResMut<WebRpcInterface>) {
    for request in outbox.drain() {
        let params = match request {
            XrRequest::RequestViewerReferenceSpace { session } => serde_json::json!({
                "type": "request_viewer_reference_space",
                "session": session.0,
            }),
            XrRequest::RequestHitTestSource { session, space } => serde_json::json!({
                "type": "request_hit_test_source",
                "session": session.0,
                "space": space.0,
            }),
        };
        rpc_interface.send_notification("xr_request", params);
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
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

/// Send serialized message to the parent window.
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

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }
}
