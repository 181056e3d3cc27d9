//! libtextinput-plugin crate root
//!
//! This crate wires the shared `libtextinput-core` types into a working
//! text-input plugin: channel dispatch, the per-client editing session, and
//! the bridge to an external input-method service. Embedders provide the
//! three seams (message transport, service handle, host view) and feed
//! bytes and service events into the [`EditingCoordinator`].
//!
//! Public API exported here:
//! - `EditingCoordinator` and `EditingSession` from `coordinator`
//! - `InputMethodBridge` and `ImEvent` from `bridge`
//! - `InputMethodService` and `ServiceEvent` from `service`
//! - `MethodChannel`, `Messenger` and the protocol vocabulary from `channel`

pub mod bridge;
pub mod channel;
pub mod coordinator;
pub mod service;

// Re-export shared model and codec types from core.
pub use libtextinput_core::{
    CodecError, Key, MethodCall, MethodError, MethodReply, TextEditingModel, TextRange,
};

// Convenience re-exports for common types used by callers.
pub use bridge::{ImEvent, InputMethodBridge};
pub use channel::{EditingStateUpdate, Messenger, MethodChannel, CHANNEL_NAME};
pub use coordinator::{EditingCoordinator, EditingSession, HostView};
pub use service::{InputMethodService, PreeditFormat, ServiceEvent};
