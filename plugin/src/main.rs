use anyhow::Result;
use clap::Parser;
use libtextinput_core::keymap::KEY_PRESS;
use libtextinput_plugin::channel::{
    CLEAR_CLIENT_METHOD, HIDE_METHOD, MULTILINE_INPUT_TYPE, SET_CLIENT_METHOD,
    SET_EDITING_STATE_METHOD, SHOW_METHOD,
};
use libtextinput_plugin::{
    EditingCoordinator, HostView, InputMethodService, Key, Messenger, ServiceEvent,
};
use serde_json::json;
use std::io::{self, BufRead};

/// Interactive simulator for the text-input channel.
///
/// Framework method calls are typed as commands and answered on stdout;
/// everything the plugin would send back to the framework is printed as it
/// crosses the messenger.
#[derive(Parser)]
#[command(name = "textinput-sim")]
struct Cli {
    /// Client id used by the `client` command.
    #[arg(long, default_value_t = 1)]
    client_id: i64,

    /// Action name the client reports through performAction.
    #[arg(long, default_value = "TextInputAction.done")]
    input_action: String,

    /// Input type name for the client configuration.
    #[arg(long, default_value = "TextInputType.text")]
    input_type: String,

    /// Shorthand for --input-type TextInputType.multiline.
    #[arg(long)]
    multiline: bool,
}

/// Prints outbound framework traffic instead of delivering it.
struct StdoutMessenger;

impl Messenger for StdoutMessenger {
    fn send(&mut self, channel: &str, message: &[u8]) {
        println!("  ← [{}] {}", channel, String::from_utf8_lossy(message));
    }
}

/// Narrates service control calls instead of talking to a real IME.
struct StdoutService;

impl InputMethodService for StdoutService {
    fn activate_context(&mut self) -> Result<()> {
        println!("  · service: activate_context");
        Ok(())
    }
    fn show_input_method(&mut self) -> Result<()> {
        println!("  · service: show_input_method");
        Ok(())
    }
    fn hide_input_method(&mut self) -> Result<()> {
        println!("  · service: hide_input_method");
        Ok(())
    }
    fn reset(&mut self) -> Result<()> {
        println!("  · service: reset");
        Ok(())
    }
}

struct StdoutView;

impl HostView for StdoutView {
    fn update_keyboard_status(&mut self, visible: bool) {
        println!(
            "  · view: keyboard {}",
            if visible { "visible" } else { "hidden" }
        );
    }
}

// Raw symbol values as a service would report them.
fn key_symbol(name: &str) -> Option<u32> {
    let symbol = match name {
        "escape" => 0x0100_0000,
        "tab" => 0x0100_0001,
        "backspace" => 0x0100_0003,
        "enter" => 0x0100_0004,
        "insert" => 0x0100_0006,
        "delete" => 0x0100_0007,
        "home" => 0x0100_0010,
        "end" => 0x0100_0011,
        "left" => 0x0100_0012,
        "up" => 0x0100_0013,
        "right" => 0x0100_0014,
        "down" => 0x0100_0015,
        "pageup" => 0x0100_0016,
        "pagedown" => 0x0100_0017,
        _ => return None,
    };
    Some(symbol)
}

fn print_help() {
    println!("Framework commands:");
    println!("  client                    TextInput.setClient with the configured id/action/type");
    println!("  state <base> <extent> <text>   TextInput.setEditingState");
    println!("  show | hide | clear       the remaining TextInput methods");
    println!("Input-method commands:");
    println!("  key <name>                press an editing key (left, backspace, enter, ...)");
    println!("  commit <text>             commit finished text");
    println!("  preedit <text>            update in-progress composition");
    println!("  imhide                    service-initiated hide");
    println!("Other:");
    println!("  type <text>               feed printable keys directly");
    println!("  dump                      print the current session");
    println!("  quit");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let input_type = if cli.multiline {
        MULTILINE_INPUT_TYPE.to_string()
    } else {
        cli.input_type.clone()
    };

    println!("═══════════════════════════════════════════════════");
    println!("  textinput-sim - text-input channel simulator");
    println!("═══════════════════════════════════════════════════");
    println!();
    print_help();
    println!();

    let mut coordinator = EditingCoordinator::new(StdoutMessenger, StdoutService, StdoutView);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line?;
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "client" => {
                let message = serde_json::to_vec(&json!({
                    "method": SET_CLIENT_METHOD,
                    "args": [cli.client_id, {
                        "inputAction": cli.input_action,
                        "inputType": {"name": input_type},
                    }],
                }))?;
                print_reply(coordinator.handle_message(&message));
            }
            "state" => {
                let mut parts = rest.splitn(3, ' ');
                let base: i64 = match parts.next().and_then(|p| p.parse().ok()) {
                    Some(base) => base,
                    None => {
                        println!("usage: state <base> <extent> <text>");
                        continue;
                    }
                };
                let extent: i64 = match parts.next().and_then(|p| p.parse().ok()) {
                    Some(extent) => extent,
                    None => {
                        println!("usage: state <base> <extent> <text>");
                        continue;
                    }
                };
                let text = parts.next().unwrap_or("");
                let message = serde_json::to_vec(&json!({
                    "method": SET_EDITING_STATE_METHOD,
                    "args": {
                        "text": text,
                        "selectionBase": base,
                        "selectionExtent": extent,
                    },
                }))?;
                print_reply(coordinator.handle_message(&message));
            }
            "show" | "hide" | "clear" => {
                let method = match command {
                    "show" => SHOW_METHOD,
                    "hide" => HIDE_METHOD,
                    _ => CLEAR_CLIENT_METHOD,
                };
                let message = serde_json::to_vec(&json!({ "method": method }))?;
                print_reply(coordinator.handle_message(&message));
            }
            "key" => match key_symbol(rest) {
                Some(symbol) => coordinator.handle_service_event(ServiceEvent::KeyEvent {
                    kind: KEY_PRESS,
                    symbol,
                    modifiers: 0,
                    text: String::new(),
                }),
                None => println!("unknown key: {}", rest),
            },
            "commit" => coordinator.handle_service_event(ServiceEvent::CommitString {
                text: rest.to_string(),
                replace_start: 0,
                replace_length: 0,
                cursor_pos: -1,
            }),
            "preedit" => coordinator.handle_service_event(ServiceEvent::UpdatePreedit {
                text: rest.to_string(),
                formats: Vec::new(),
                replace_start: -1,
                replace_length: 0,
                cursor_pos: -1,
            }),
            "imhide" => coordinator.handle_service_event(ServiceEvent::InitiatedHide),
            "type" => {
                for ch in rest.chars() {
                    coordinator.handle_key(Key::Char(ch));
                }
            }
            "dump" => match coordinator.session() {
                Some(session) => {
                    let selection = session.model().selection();
                    println!(
                        "  client {} ({}): {:?}",
                        session.client_id(),
                        session.input_type(),
                        session.model().text()
                    );
                    println!(
                        "  selection {}..{} composing {:?}",
                        selection.base(),
                        selection.extent(),
                        session.model().composing_range()
                    );
                }
                None => println!("  no active client"),
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("unknown command: {} (try `help`)", command),
        }
    }
    Ok(())
}

fn print_reply(reply: Vec<u8>) {
    if reply.is_empty() {
        println!("  → (not implemented)");
    } else {
        println!("  → {}", String::from_utf8_lossy(&reply));
    }
}
