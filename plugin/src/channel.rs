//! Outbound method channel and the text-input protocol vocabulary.
//!
//! All strings the protocol is made of live here: the channel name, the
//! method names on both directions, and the argument keys of the editing
//! state document. The [`MethodChannel`] wraps a [`Messenger`] with the
//! call encoding, so the rest of the plugin deals in method names and
//! JSON values only.

use libtextinput_core::codec::{self, MethodCall};
use libtextinput_core::model::TextEditingModel;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// Channel carrying the text-input method vocabulary.
pub const CHANNEL_NAME: &str = "flutter/textinput";

// Framework-to-embedder methods.
pub const SET_CLIENT_METHOD: &str = "TextInput.setClient";
pub const SET_EDITING_STATE_METHOD: &str = "TextInput.setEditingState";
pub const CLEAR_CLIENT_METHOD: &str = "TextInput.clearClient";
pub const SHOW_METHOD: &str = "TextInput.show";
pub const HIDE_METHOD: &str = "TextInput.hide";

// Embedder-to-framework methods.
pub const UPDATE_EDITING_STATE_METHOD: &str = "TextInputClient.updateEditingState";
pub const PERFORM_ACTION_METHOD: &str = "TextInputClient.performAction";

// Argument keys of client configuration and editing state documents.
pub const INPUT_ACTION_KEY: &str = "inputAction";
pub const INPUT_TYPE_KEY: &str = "inputType";
pub const INPUT_TYPE_NAME_KEY: &str = "name";
pub const TEXT_KEY: &str = "text";
pub const SELECTION_BASE_KEY: &str = "selectionBase";
pub const SELECTION_EXTENT_KEY: &str = "selectionExtent";

/// Input type name that makes Enter insert a newline.
pub const MULTILINE_INPUT_TYPE: &str = "TextInputType.multiline";

const AFFINITY_DOWNSTREAM: &str = "TextAffinity.downstream";

/// Transport for encoded channel messages.
pub trait Messenger {
    /// Deliver one encoded message on the named channel.
    fn send(&mut self, channel: &str, message: &[u8]);
}

/// A named channel that sends method calls through a [`Messenger`].
pub struct MethodChannel<M> {
    messenger: M,
    name: String,
}

impl<M: Messenger> MethodChannel<M> {
    pub fn new(messenger: M, name: impl Into<String>) -> Self {
        Self {
            messenger,
            name: name.into(),
        }
    }

    /// Get the wrapped messenger.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Encode and send one method call. Encoding failures are logged and
    /// the call is dropped; there is nobody upstream to report them to.
    pub fn invoke_method(&mut self, method: &str, args: Value) {
        let call = MethodCall::new(method, args);
        match codec::encode_method_call(&call) {
            Ok(message) => self.messenger.send(&self.name, &message),
            Err(err) => error!("failed to encode call to {}: {}", method, err),
        }
    }
}

/// Document sent as the second `updateEditingState` argument.
///
/// Composing bounds are not surfaced on this channel: `composingBase` and
/// `composingExtent` stay `-1` even while a composing span is open, and
/// affinity and directionality carry fixed values. The framework treats
/// pre-edit text as ordinary buffer content until it is committed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingStateUpdate {
    pub composing_base: i64,
    pub composing_extent: i64,
    pub selection_affinity: &'static str,
    pub selection_base: i64,
    pub selection_extent: i64,
    pub selection_is_directional: bool,
    pub text: String,
}

impl EditingStateUpdate {
    /// Snapshot the model in wire form.
    pub fn from_model(model: &TextEditingModel) -> Self {
        let selection = model.selection();
        Self {
            composing_base: -1,
            composing_extent: -1,
            selection_affinity: AFFINITY_DOWNSTREAM,
            selection_base: selection.base() as i64,
            selection_extent: selection.extent() as i64,
            selection_is_directional: false,
            text: model.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libtextinput_core::range::TextRange;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Vec<(String, Vec<u8>)>,
    }

    impl Messenger for RecordingMessenger {
        fn send(&mut self, channel: &str, message: &[u8]) {
            self.sent.push((channel.to_string(), message.to_vec()));
        }
    }

    #[test]
    fn test_invoke_method_encodes_call() {
        let mut channel = MethodChannel::new(RecordingMessenger::default(), CHANNEL_NAME);
        channel.invoke_method(PERFORM_ACTION_METHOD, json!([1, "TextInputAction.done"]));

        let sent = &channel.messenger().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, CHANNEL_NAME);
        let value: Value = serde_json::from_slice(&sent[0].1).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "TextInputClient.performAction",
                "args": [1, "TextInputAction.done"],
            })
        );
    }

    #[test]
    fn test_state_document_shape() {
        let mut model = TextEditingModel::new();
        model.set_text("hello");
        model.set_selection(TextRange::new(1, 4));
        model.begin_composing();

        let value = serde_json::to_value(EditingStateUpdate::from_model(&model)).unwrap();
        assert_eq!(
            value,
            json!({
                "composingBase": -1,
                "composingExtent": -1,
                "selectionAffinity": "TextAffinity.downstream",
                "selectionBase": 1,
                "selectionExtent": 4,
                "selectionIsDirectional": false,
                "text": "hello",
            })
        );
    }
}
