//! # RecordForm Component
//!
//! Two text fields, name and color, edited one at a time.
//!
//! ## Responsibilities
//!
//! - Hold the draft field values
//! - Move focus between fields (Enter/Tab forward, Shift+Tab/Up back)
//! - Signal completion when Enter or Tab is pressed on the last field
//! - Render a preview (unfocused) or an editable form (focused)
//!
//! ## State Management
//!
//! The draft buffers are internal state. While browsing, the view controller
//! overwrites them through `set_field` to preview the selected record; the
//! form itself has no idea which mode the controller is in.
//!
//! Completion does not commit anything. The form flips to
//! `FormState::Completed` and emits `FormEvent::Completed`; the controller
//! reads the fields back with `read_field` on a later step.

mod text_field;

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::record::{COLOR_KEY, NAME_KEY};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_field::TextField;

/// Rows each field occupies: title, value, spacer.
const FIELD_ROWS: u16 = 3;
/// Width of the "> " prompt before a field value.
const PROMPT_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Normal,
    Completed,
}

/// High-level events emitted by the RecordForm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The last field was submitted; the draft is final.
    Completed,
    /// Ctrl+C
    Quit,
}

pub struct RecordForm {
    fields: Vec<TextField>,
    focused: Option<usize>,
    state: FormState,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordForm {
    /// A blank, unfocused form.
    pub fn new() -> Self {
        Self {
            fields: vec![
                TextField::new(NAME_KEY, "Name"),
                TextField::new(COLOR_KEY, "Color"),
            ],
            focused: None,
            state: FormState::Normal,
        }
    }

    /// Clear every field, drop focus and return to `FormState::Normal`.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused = None;
        self.state = FormState::Normal;
    }

    pub fn focus_first_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focused = Some(0);
        let first = &mut self.fields[0];
        first.cursor = first.value.len();
    }

    /// Index of the field with input focus, if any.
    pub fn focused_field(&self) -> Option<usize> {
        self.focused
    }

    pub fn is_complete(&self) -> bool {
        self.state == FormState::Completed
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Current value of the field stored under `key`, or `None` for an unknown key.
    pub fn read_field(&self, key: &str) -> Option<&str> {
        self.field(key).map(|f| f.value.as_str())
    }

    /// Overwrite the field stored under `key`. Unknown keys are ignored.
    pub fn set_field(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.set_value(value),
            None => debug!("Ignoring write to unknown form field {:?}", key),
        }
    }

    /// True if every field is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.value.is_empty())
    }

    fn field(&self, key: &str) -> Option<&TextField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Move focus forward. Returns `Completed` when leaving the last field.
    fn advance(&mut self, index: usize, may_complete: bool) -> Option<FormEvent> {
        if index + 1 < self.fields.len() {
            self.focused = Some(index + 1);
            None
        } else if may_complete {
            self.state = FormState::Completed;
            debug!("Form completed");
            Some(FormEvent::Completed)
        } else {
            None
        }
    }

    fn handle_key(&mut self, index: usize, key: &KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => self.advance(index, true),
            KeyCode::Down => self.advance(index, false),
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = Some(index.saturating_sub(1));
                None
            }
            _ => {
                if !self.fields[index].handle_key(key) {
                    debug!("Key {:?} not handled by field {:?}", key.code, self.fields[index].key);
                }
                None
            }
        }
    }
}

impl EventHandler for RecordForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if event.is_interrupt() {
            return Some(FormEvent::Quit);
        }
        // A completed form is waiting to be committed and ignores input
        if self.state == FormState::Completed || self.fields.is_empty() {
            return None;
        }
        let index = *self.focused.get_or_insert(0);

        match event {
            TuiEvent::Key(key) => self.handle_key(index, key),
            TuiEvent::Paste(text) => {
                self.fields[index].insert_str(text);
                None
            }
            TuiEvent::Resize => None,
        }
    }
}

impl Component for RecordForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let editing = self.focused.is_some();
        let title = if editing { " New record " } else { " Preview " };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);
        if !editing {
            block = block.border_style(Style::default().add_modifier(Modifier::DIM));
        }
        let inner = block.inner(area);

        let mut lines = Vec::with_capacity(self.fields.len() * FIELD_ROWS as usize);
        for (i, field) in self.fields.iter().enumerate() {
            let is_focused = self.focused == Some(i);
            let title_style = if is_focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if editing {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let value_style = if editing {
                Style::default().fg(Color::Green)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            let prompt = if is_focused { "> " } else { "  " };

            lines.push(Line::from(Span::styled(field.title, title_style)));
            lines.push(Line::from(vec![
                Span::styled(prompt, title_style),
                Span::styled(field.value.as_str(), value_style),
            ]));
            lines.push(Line::default());
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if let Some(i) = self.focused
            && self.state == FormState::Normal
        {
            let x = inner
                .x
                .saturating_add(PROMPT_WIDTH)
                .saturating_add(self.fields[i].cursor_column());
            let y = inner.y + i as u16 * FIELD_ROWS + 1;
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}
