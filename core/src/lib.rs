//! libtextinput-core
//!
//! Editing model, key translation and channel codec shared by text-input
//! embedders. The crate is transport-agnostic: it knows the document and
//! envelope formats that travel over a platform channel and the editing
//! semantics of the text field behind it, but nothing about where the bytes
//! come from.
//!
//! Public API:
//! - `TextEditingModel` - Buffer, selection and composing span of the active field
//! - `TextRange` - Directional code-point range
//! - `Key` / `keymap::translate` - Raw key symbol translation
//! - `MethodCall` / `MethodReply` / `MethodError` - Channel call vocabulary
//! - `codec` - JSON wire encoding for calls and reply envelopes

pub mod codec;
pub use codec::{CodecError, MethodCall, MethodError, MethodReply};

pub mod keymap;
pub use keymap::Key;

pub mod model;
pub use model::TextEditingModel;

pub mod range;
pub use range::TextRange;
