//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! The museum canvas is embedded in the fan site as an iframe. The host page
//! pushes the wallet session and enter/exit commands in; the viewer reports
//! loading progress, catalog results and frame rate out.
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ parse_rpc_command
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are applied but never answered.
//!
//! ## Calling From the Host
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "wallet_session",
//!   params: { loggedIn: true, addr: "0x0123456789abcdef" },
//!   id: 7
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Methods
//!
//! ### Walkthrough
//! - `enter_museum`: Leave the entrance card and start walking
//! - `exit_museum`: Return to the entrance card
//!
//! ### Catalog
//! - `wallet_session`: Push `{loggedIn, addr}` from the wallet provider
//! - `reload_catalog`: Fetch the item feed again
//! - `get_museum_status`: Catalog totals, state and proximity counters
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//! - `loading_progress`, `museum_loaded`, `museum_error`, `fps_update`,
//!   `debug_message`

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
