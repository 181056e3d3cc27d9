//! Editing coordinator: channel dispatch and session state.
//!
//! The coordinator is the single owner of text-input state on the embedder
//! side. The framework drives it through method calls on the text-input
//! channel; the input-method service drives it through bridged events. Both
//! converge on one optional [`EditingSession`]: while it is `None` every
//! key and service event is dropped, and while it is `Some` edits flow into
//! the model and changed state is echoed back to the framework.
//!
//! Dispatch is strictly serialized by `&mut self`; there is no interior
//! mutability and no locking anywhere on these paths.

use libtextinput_core::codec::{self, MethodCall, MethodReply};
use libtextinput_core::keymap::Key;
use libtextinput_core::model::TextEditingModel;
use libtextinput_core::range::TextRange;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::bridge::{ImEvent, InputMethodBridge};
use crate::channel::{
    EditingStateUpdate, Messenger, MethodChannel, CHANNEL_NAME, CLEAR_CLIENT_METHOD, HIDE_METHOD,
    INPUT_ACTION_KEY, INPUT_TYPE_KEY, INPUT_TYPE_NAME_KEY, MULTILINE_INPUT_TYPE,
    PERFORM_ACTION_METHOD, SELECTION_BASE_KEY, SELECTION_EXTENT_KEY, SET_CLIENT_METHOD,
    SET_EDITING_STATE_METHOD, SHOW_METHOD, TEXT_KEY, UPDATE_EDITING_STATE_METHOD,
};
use crate::service::{InputMethodService, ServiceEvent};

/// Host-side view notifications.
pub trait HostView {
    /// Called when the virtual keyboard should appear or disappear.
    fn update_keyboard_status(&mut self, visible: bool);
}

/// State of one framework text-field client.
///
/// Created by `TextInput.setClient`, dropped by `TextInput.clearClient`.
/// The framework metadata is immutable for the session's lifetime; only
/// the model changes.
#[derive(Debug)]
pub struct EditingSession {
    client_id: i64,
    input_action: String,
    input_type: String,
    model: TextEditingModel,
}

impl EditingSession {
    /// Framework-assigned client identifier.
    pub fn client_id(&self) -> i64 {
        self.client_id
    }

    /// Action name reported back through `performAction`.
    pub fn input_action(&self) -> &str {
        &self.input_action
    }

    /// Input type name of the client's text field.
    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    /// Get the editing model.
    pub fn model(&self) -> &TextEditingModel {
        &self.model
    }
}

/// Single owner of text-input state, between framework and input method.
pub struct EditingCoordinator<M, S, V> {
    channel: MethodChannel<M>,
    bridge: InputMethodBridge<S>,
    view: V,
    session: Option<EditingSession>,
}

impl<M, S, V> EditingCoordinator<M, S, V>
where
    M: Messenger,
    S: InputMethodService,
    V: HostView,
{
    pub fn new(messenger: M, service: S, view: V) -> Self {
        Self {
            channel: MethodChannel::new(messenger, CHANNEL_NAME),
            bridge: InputMethodBridge::new(service),
            view,
            session: None,
        }
    }

    /// Get the active session, if any.
    pub fn session(&self) -> Option<&EditingSession> {
        self.session.as_ref()
    }

    /// Get the messenger behind the outbound channel.
    pub fn messenger(&self) -> &M {
        self.channel.messenger()
    }

    /// Get the input-method service handle.
    pub fn service(&self) -> &S {
        self.bridge.service()
    }

    /// Get the host view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Byte-level entry point: decode, dispatch, encode the reply.
    ///
    /// An empty return value is the not-implemented reply. Messages that
    /// cannot be decoded are answered with a bad-arguments envelope.
    pub fn handle_message(&mut self, message: &[u8]) -> Vec<u8> {
        let reply = match codec::decode_method_call(message) {
            Ok(call) => self.handle_method_call(&call),
            Err(err) => {
                warn!("undecodable text-input message: {}", err);
                MethodReply::bad_arguments("Malformed method call")
            }
        };
        match codec::encode_reply(&reply) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to encode reply: {}", err);
                Vec::new()
            }
        }
    }

    /// Dispatch one decoded method call from the framework.
    pub fn handle_method_call(&mut self, call: &MethodCall) -> MethodReply {
        match call.method.as_str() {
            SHOW_METHOD => {
                self.view.update_keyboard_status(true);
                self.bridge.show();
                MethodReply::success()
            }
            HIDE_METHOD => {
                self.view.update_keyboard_status(false);
                self.bridge.hide();
                MethodReply::success()
            }
            SET_CLIENT_METHOD => self.set_client(&call.args),
            SET_EDITING_STATE_METHOD => self.set_editing_state(&call.args),
            CLEAR_CLIENT_METHOD => {
                if self.session.take().is_some() {
                    debug!("editing client cleared");
                }
                MethodReply::success()
            }
            _ => MethodReply::NotImplemented,
        }
    }

    /// Entry point for raw input-method service callbacks.
    pub fn handle_service_event(&mut self, event: ServiceEvent) {
        if let Some(event) = self.bridge.map_event(event) {
            self.handle_im_event(event);
        }
    }

    /// Apply one normalized input-method event. Dropped while idle.
    pub fn handle_im_event(&mut self, event: ImEvent) {
        if self.session.is_none() {
            return;
        }
        match event {
            ImEvent::Key(key) => self.handle_key(key),
            ImEvent::Commit(text) => self.commit_string(&text),
            ImEvent::Preedit(text) => self.update_preedit(&text),
            ImEvent::InitiatedHide => self.service_initiated_hide(),
            // Reserved for panel-aware view layout; nothing to update yet.
            ImEvent::AreaChanged { .. } => {}
        }
    }

    /// Apply one editing key to the active model.
    ///
    /// Does nothing while idle. An editing-state update is sent only when
    /// the model actually changed, so held-down arrow keys at a buffer
    /// boundary stay silent on the wire.
    pub fn handle_key(&mut self, key: Key) {
        if self.session.is_none() {
            return;
        }
        if key == Key::Enter {
            self.enter_pressed();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let changed = match key {
            Key::Left => session.model.move_cursor_back(),
            Key::Right => session.model.move_cursor_forward(),
            Key::Home => session.model.move_cursor_to_start(),
            Key::End => session.model.move_cursor_to_end(),
            Key::Backspace => session.model.backspace(),
            Key::Delete => session.model.delete_forward(),
            Key::Char(ch) => {
                session.model.add_code_point(ch);
                true
            }
            _ => false,
        };
        if changed {
            self.send_state_update();
        }
    }

    fn set_client(&mut self, args: &Value) -> MethodReply {
        if args.is_null() {
            return MethodReply::bad_arguments("Method invoked without args");
        }
        let Some(client_id) = args.get(0).and_then(Value::as_i64) else {
            return MethodReply::bad_arguments("Could not set client, ID is null.");
        };
        let config = match args.get(1) {
            Some(config) if !config.is_null() => config,
            _ => {
                return MethodReply::bad_arguments("Could not set client, missing arguments.");
            }
        };
        let input_action = config
            .get(INPUT_ACTION_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let input_type = config
            .get(INPUT_TYPE_KEY)
            .and_then(|t| t.get(INPUT_TYPE_NAME_KEY))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        debug!(
            "editing client set: id={} type={:?} action={:?}",
            client_id, input_type, input_action
        );
        self.session = Some(EditingSession {
            client_id,
            input_action,
            input_type,
            model: TextEditingModel::new(),
        });
        MethodReply::success()
    }

    fn set_editing_state(&mut self, args: &Value) -> MethodReply {
        if args.is_null() {
            return MethodReply::bad_arguments("Method invoked without args");
        }
        let Some(session) = self.session.as_mut() else {
            return MethodReply::internal_error(
                "Set editing state has been invoked, but no client is set.",
            );
        };
        let Some(text) = args.get(TEXT_KEY).and_then(Value::as_str) else {
            return MethodReply::bad_arguments(
                "Set editing state has been invoked, but without text.",
            );
        };
        let (Some(base), Some(extent)) = (
            args.get(SELECTION_BASE_KEY).and_then(Value::as_i64),
            args.get(SELECTION_EXTENT_KEY).and_then(Value::as_i64),
        ) else {
            return MethodReply::internal_error("Selection base/extent values invalid.");
        };
        // The framework sends (-1, -1) when the field has no selection yet;
        // the model has no such state, so it becomes a caret at the start.
        let (base, extent) = if base == -1 && extent == -1 {
            (0, 0)
        } else {
            (base.max(0), extent.max(0))
        };
        session.model.set_text(text);
        session
            .model
            .set_selection(TextRange::new(base as usize, extent as usize));
        MethodReply::success()
    }

    /// Enter commits the action; in multiline fields it also inserts a
    /// newline, echoed before the action so the framework sees the text
    /// it is acting on.
    fn enter_pressed(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let inserts_newline = session.input_type == MULTILINE_INPUT_TYPE;
        if inserts_newline {
            session.model.add_code_point('\n');
        }
        let client_id = session.client_id;
        let input_action = session.input_action.clone();
        if inserts_newline {
            self.send_state_update();
        }
        self.channel
            .invoke_method(PERFORM_ACTION_METHOD, json!([client_id, input_action]));
    }

    fn commit_string(&mut self, text: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.model.is_composing() {
            session.model.update_composing_text(text);
            session.model.end_composing();
        } else {
            session.model.add_text(text);
        }
        self.send_state_update();
    }

    fn update_preedit(&mut self, text: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.model.is_composing() {
            session.model.begin_composing();
        }
        session.model.update_composing_text(text);
        self.send_state_update();
    }

    /// The service closed its panel on its own. Whatever pre-edit text is
    /// on screen stays in the buffer as committed text.
    fn service_initiated_hide(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.model.is_composing() {
            return;
        }
        session.model.end_composing();
        self.send_state_update();
    }

    fn send_state_update(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let args = json!([
            session.client_id,
            EditingStateUpdate::from_model(&session.model)
        ]);
        self.channel.invoke_method(UPDATE_EDITING_STATE_METHOD, args);
    }
}
