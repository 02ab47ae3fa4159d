//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, turns crossterm input into
//! `TuiEvent`s and drives the `ViewController` one message at a time.
//!
//! ## Event Loop
//!
//! Each iteration takes exactly one message, dispatches it, and redraws
//! before taking the next. Messages the controller asks for via
//! `Effect::Dispatch` (form completion) are queued ahead of terminal input,
//! so a commit is always its own step.
//!
//! Nothing animates, so the loop only redraws after a message or a resize.

mod component;
pub mod components;
mod controller;
mod event;
mod keymap;

use log::info;
use std::collections::VecDeque;
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::config::ResolvedConfig;
use crate::core::store::RecordStore;

pub use component::{Component, EventHandler};
pub use controller::{Effect, Mode, Msg, ViewController};
pub use event::TuiEvent;
pub use keymap::{KeyBinding, KeyBindingError};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Run the interface until the user quits.
///
/// Fails before touching the terminal if the new-record binding doesn't
/// parse, and with the terminal's error if it can't be initialized.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let new_record_key = parse_new_record_key(&config)?;
    info!(
        "Starting with {} records, new record key {}",
        config.records.len(),
        new_record_key
    );

    let store = RecordStore::from(config.records);
    let mut ui = ViewController::new(store, new_record_key).with_list_width(config.list_width);

    let mut terminal = ratatui::try_init()?;
    let result =
        TerminalModeGuard::new().and_then(|_guard| event_loop(&mut terminal, &mut ui));
    ratatui::restore();

    info!("Exiting with {} records", ui.store().len());
    result
}

/// Parse the configured new-record binding. A bad binding is an
/// `InvalidInput` error so `run` fails before the terminal is initialized.
fn parse_new_record_key(config: &ResolvedConfig) -> io::Result<KeyBinding> {
    config
        .new_record_key
        .parse()
        .map_err(|e: KeyBindingError| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn event_loop(terminal: &mut DefaultTerminal, ui: &mut ViewController) -> io::Result<()> {
    let mut pending: VecDeque<Msg> = VecDeque::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui.render(f, f.area()))?;
            needs_redraw = false;
        }

        let msg = match pending.pop_front() {
            Some(msg) => msg,
            None => match event::poll_event_timeout(POLL_TIMEOUT)? {
                Some(event) => Msg::Input(event),
                None => continue,
            },
        };

        needs_redraw = true;
        match ui.dispatch(msg) {
            Effect::None => {}
            Effect::Dispatch(next) => pending.push_back(next),
            Effect::Quit => {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_records;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn config_with_key(key: &str) -> ResolvedConfig {
        ResolvedConfig {
            new_record_key: key.to_string(),
            list_width: 30,
            records: seed_records(),
        }
    }

    #[test]
    fn test_parse_new_record_key_accepts_valid_binding() {
        let binding = parse_new_record_key(&config_with_key("ctrl+n")).unwrap();
        assert_eq!(binding, KeyBinding::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_invalid_binding_fails_before_terminal_init() {
        let err = parse_new_record_key(&config_with_key("hyper+n")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("hyper"));

        // run() parses the binding first, so this returns without touching the terminal
        let err = run(config_with_key("hyper+n")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
