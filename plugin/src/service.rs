//! Interface to the external input-method service.
//!
//! The service is the process-external IME (on-screen keyboard, CJK engine)
//! that owns composition. Outbound control goes through the
//! [`InputMethodService`] trait; inbound notifications arrive as
//! [`ServiceEvent`] values. Both sides deal in the service's raw vocabulary;
//! normalization into editing terms happens in the bridge.

use anyhow::Result;

/// Control surface of the external input-method service.
///
/// Calls may fail when the service is unreachable. Callers treat a failure
/// as the action not having happened and carry on.
pub trait InputMethodService {
    /// Bind the service to this application's input context.
    fn activate_context(&mut self) -> Result<()>;

    /// Ask the service to present its input panel.
    fn show_input_method(&mut self) -> Result<()>;

    /// Ask the service to dismiss its input panel.
    fn hide_input_method(&mut self) -> Result<()>;

    /// Discard any composition state the service holds.
    fn reset(&mut self) -> Result<()>;
}

/// One styling run inside pre-edit text, as the service reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreeditFormat {
    pub start: i32,
    pub length: i32,
    pub style: i32,
}

/// Raw notification delivered by the input-method service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    /// A hardware or virtual key event, identified by symbol value.
    KeyEvent {
        kind: i32,
        symbol: u32,
        modifiers: u32,
        text: String,
    },
    /// Finished text to insert at the caret.
    CommitString {
        text: String,
        replace_start: i32,
        replace_length: i32,
        cursor_pos: i32,
    },
    /// In-progress composition text to display.
    UpdatePreedit {
        text: String,
        formats: Vec<PreeditFormat>,
        replace_start: i32,
        replace_length: i32,
        cursor_pos: i32,
    },
    /// The service dismissed its panel on its own (e.g. the user closed it).
    InitiatedHide,
    /// The service's panel geometry changed.
    UpdateInputMethodArea {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// A named action bound inside the service was triggered.
    InvokeAction { action: String, sequence: String },
}
