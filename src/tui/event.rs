use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Terminal input, as delivered to the view controller.
///
/// Key events are kept verbatim: the list and the form read the same key
/// differently (`j` moves the list cursor but is a character in the form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String), // Bracketed paste
    Resize,
}

impl TuiEvent {
    /// A plain key press with no modifiers.
    pub fn key(code: KeyCode) -> Self {
        TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A character key press with no modifiers.
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Ctrl + character.
    pub fn ctrl(c: char) -> Self {
        TuiEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// True for Ctrl+C, which both components treat as a quit request.
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            TuiEvent::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                if modifiers.contains(KeyModifiers::CONTROL)
        )
    }
}

/// Poll for an event, waiting up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let translated = match event::read()? {
        // Release/repeat events show up on some platforms; only presses count
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            Some(TuiEvent::Key(key_event))
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(translated)
}
