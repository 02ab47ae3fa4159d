//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::store::RecordStore;
use crate::tui::{Effect, Msg, TuiEvent, ViewController};

/// A controller over the five seed records, with `ctrl+n` as the new-record key.
pub fn test_controller() -> ViewController {
    let key = "ctrl+n".parse().expect("valid binding");
    ViewController::new(RecordStore::seeded(), key)
}

/// One unmodified key press per character.
pub fn type_text(text: &str) -> Vec<TuiEvent> {
    text.chars().map(TuiEvent::char).collect()
}

/// Dispatch an input event and any messages it queues, the way the event
/// loop does. Returns the last effect.
pub fn feed(ui: &mut ViewController, event: TuiEvent) -> Effect {
    let mut effect = ui.dispatch(Msg::Input(event));
    while let Effect::Dispatch(next) = effect {
        effect = ui.dispatch(next);
    }
    effect
}
