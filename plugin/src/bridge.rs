//! Bridge between the input-method service and the editing coordinator.
//!
//! The bridge owns the service handle and does two jobs: sequencing the
//! show/hide control calls, and normalizing raw service notifications into
//! [`ImEvent`] values the coordinator understands. Service failures are
//! logged and absorbed here so a dead or restarting IME never takes the
//! application down with it.

use libtextinput_core::keymap::{self, Key, KEY_PRESS};
use tracing::{debug, error, trace};

use crate::service::{InputMethodService, ServiceEvent};

/// Normalized input-method event, ready for the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum ImEvent {
    /// An editing key press (never a printable character).
    Key(Key),
    /// Finished text to insert.
    Commit(String),
    /// In-progress composition text.
    Preedit(String),
    /// The service dismissed its own panel.
    InitiatedHide,
    /// The service's panel geometry changed.
    AreaChanged {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// Owns the service handle and translates between its vocabulary and ours.
pub struct InputMethodBridge<S> {
    service: S,
}

impl<S: InputMethodService> InputMethodBridge<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Get the wrapped service handle.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Bring up the input panel.
    ///
    /// The context must be activated first; if activation fails the show
    /// request is abandoned rather than presenting a panel that is bound
    /// to some other context.
    pub fn show(&mut self) {
        if let Err(err) = self.service.activate_context() {
            error!("unable to activate input context: {}", err);
            return;
        }
        if let Err(err) = self.service.show_input_method() {
            error!("unable to show input method: {}", err);
        }
    }

    /// Dismiss the input panel, discarding service-side composition first.
    /// Each step is attempted even if the previous one failed.
    pub fn hide(&mut self) {
        if let Err(err) = self.service.reset() {
            error!("unable to reset input method: {}", err);
        }
        if let Err(err) = self.service.hide_input_method() {
            error!("unable to hide input method: {}", err);
        }
    }

    /// Normalize one raw service notification.
    ///
    /// Returns `None` for notifications with no editing meaning: key
    /// releases, unrecognized key symbols, and service-internal actions.
    /// Printable key symbols are dropped too; text only ever reaches the
    /// model through commit and pre-edit events.
    pub fn map_event(&self, event: ServiceEvent) -> Option<ImEvent> {
        match event {
            ServiceEvent::KeyEvent {
                kind,
                symbol,
                modifiers,
                text,
            } => {
                if kind != KEY_PRESS {
                    return None;
                }
                trace!(
                    "key press: symbol={:#x} modifiers={:#x} text={:?}",
                    symbol,
                    modifiers,
                    text
                );
                match keymap::translate(symbol) {
                    Some(Key::Char(_)) | None => None,
                    Some(key) => Some(ImEvent::Key(key)),
                }
            }
            ServiceEvent::CommitString {
                text,
                replace_start,
                replace_length,
                cursor_pos,
            } => {
                trace!(
                    "commit: len={} replace={}..+{} cursor={}",
                    text.chars().count(),
                    replace_start,
                    replace_length,
                    cursor_pos
                );
                Some(ImEvent::Commit(text))
            }
            ServiceEvent::UpdatePreedit {
                text,
                formats,
                replace_start,
                replace_length,
                cursor_pos,
            } => {
                trace!(
                    "preedit: len={} runs={} replace={}..+{} cursor={}",
                    text.chars().count(),
                    formats.len(),
                    replace_start,
                    replace_length,
                    cursor_pos
                );
                Some(ImEvent::Preedit(text))
            }
            ServiceEvent::InitiatedHide => Some(ImEvent::InitiatedHide),
            ServiceEvent::UpdateInputMethodArea {
                x,
                y,
                width,
                height,
            } => Some(ImEvent::AreaChanged {
                x,
                y,
                width,
                height,
            }),
            ServiceEvent::InvokeAction { action, sequence } => {
                debug!("service action ignored: {} ({})", action, sequence);
                None
            }
        }
    }
}
