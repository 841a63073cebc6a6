//! JSON-RPC 2.0 bridge between the placement engine and its host page.
//!
//! The engine runs inside an iframe. The host page owns the WebXR session and
//! relays platform events in, while the engine pushes placement outcomes back
//! out via `postMessage`.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (WebXR glue)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ xr_event (no ID) ───────────────────> ├─ forwarded to XrInbox
//!        ├─ select_item / get_catalog (ID) ─────> ├─ validated, answered
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <──── xr_request / placement_result ───┤
//! ```
//!
//! ## Methods
//!
//! - `xr_event`: session lifecycle, frames, light estimation and select
//! - `get_catalog`: list catalog items with readiness
//! - `select_item`: change the selected item (rejects out-of-range indices)
//! - `place`: same as a platform select
//! - `get_session_config`: required and optional session features
//!
//! ## Notifications
//!
//! - `xr_request`: viewer reference space or hit-test source requests
//! - `placement_result`, `overlay_created`, `selection_changed`
//! - `catalog_item_ready`, `lighting_changed`
//!
//! Error codes follow JSON-RPC 2.0: `-32700` parse error, `-32601` method
//! not found, `-32602` invalid params.

/// JSON-RPC 2.0 bidirectional communication with the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
