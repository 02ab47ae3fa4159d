//! # View Controller
//!
//! Owns the record store, one `RecordList` and one `RecordForm`, and decides
//! which of the two receives each event.
//!
//! ```text
//!              Msg
//!               │
//!               ▼
//!     ┌───────────────────┐  reserved key   ┌──────────────────────┐
//!     │  ViewController   │────────────────▶│ reset form, Editing  │
//!     └─────────┬─────────┘                 └──────────────────────┘
//!               │ mode
//!       ┌───────┴────────┐
//!       ▼                ▼
//!   Browsing          Editing
//!   RecordList        RecordForm ── Completed ──▶ Effect::Dispatch(FormCompleted)
//!       │                                               │ (next step)
//!       ▼                                               ▼
//!   sync_form_with_selection()              append, reload list, fresh form
//! ```
//!
//! ## Synchronization
//!
//! While browsing, the form previews the highlighted record. The list gives
//! no "selection changed" signal, so `sync_form_with_selection` runs after
//! every step instead of on change.
//!
//! ## Single writer
//!
//! The store is handed in at construction and only `commit_draft` appends
//! to it. Everything runs on the event loop thread, one message at a time.

use log::{debug, info, warn};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::config::DEFAULT_LIST_WIDTH;
use crate::core::record::{COLOR_KEY, NAME_KEY, Record};
use crate::core::store::RecordStore;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{FormEvent, ListEvent, RecordForm, RecordList, StatusBar};
use crate::tui::event::TuiEvent;
use crate::tui::keymap::KeyBinding;

/// Which component receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The list has focus; the form previews the highlighted record.
    #[default]
    Browsing,
    /// The form has focus; its fields are the draft being typed.
    Editing,
}

/// One step of input for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Input(TuiEvent),
    /// The form finished; commit its draft. Always produced by the
    /// controller itself via `Effect::Dispatch`.
    FormCompleted,
}

/// What the event loop should do after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Feed this message back in as the next step.
    Dispatch(Msg),
}

pub struct ViewController {
    store: RecordStore,
    list: RecordList,
    form: RecordForm,
    mode: Mode,
    new_record_key: KeyBinding,
    list_width: u16,
    status_message: String,
}

impl ViewController {
    pub fn new(store: RecordStore, new_record_key: KeyBinding) -> Self {
        let list = RecordList::new(store.snapshot());
        let mut controller = Self {
            store,
            list,
            form: RecordForm::new(),
            mode: Mode::Browsing,
            new_record_key,
            list_width: DEFAULT_LIST_WIDTH,
            status_message: String::new(),
        };
        controller.sync_form_with_selection();
        controller
    }

    pub fn with_list_width(mut self, width: u16) -> Self {
        self.list_width = width;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn list(&self) -> &RecordList {
        &self.list
    }

    pub fn form(&self) -> &RecordForm {
        &self.form
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Process one message to completion.
    pub fn dispatch(&mut self, msg: Msg) -> Effect {
        let effect = match msg {
            Msg::Input(event) => {
                self.status_message.clear();
                self.route_input(&event)
            }
            Msg::FormCompleted => self.commit_draft(),
        };
        self.sync_form_with_selection();
        effect
    }

    fn route_input(&mut self, event: &TuiEvent) -> Effect {
        // The reserved key wins over whatever component has focus
        if self.new_record_key.matches(event) {
            self.start_new_record();
            return Effect::None;
        }

        match self.mode {
            Mode::Browsing => match self.list.handle_event(event) {
                Some(ListEvent::Quit) => Effect::Quit,
                None => Effect::None,
            },
            Mode::Editing => match self.form.handle_event(event) {
                Some(FormEvent::Completed) => Effect::Dispatch(Msg::FormCompleted),
                Some(FormEvent::Quit) => Effect::Quit,
                None => Effect::None,
            },
        }
    }

    /// Blank the form and give it focus. Pressing the key again while
    /// editing starts over and drops the draft.
    fn start_new_record(&mut self) {
        if self.mode == Mode::Editing && !self.form.is_blank() {
            warn!("Discarding unsaved draft");
            self.status_message = "Draft discarded".to_string();
        }
        self.form.reset();
        self.form.focus_first_field();
        if self.mode != Mode::Editing {
            info!("Mode: {:?} -> {:?}", self.mode, Mode::Editing);
        }
        self.mode = Mode::Editing;
    }

    /// Append the completed draft, reload the list and return to browsing.
    fn commit_draft(&mut self) -> Effect {
        if self.mode != Mode::Editing || !self.form.is_complete() {
            debug!("Ignoring completion with no completed draft (mode {:?})", self.mode);
            return Effect::None;
        }

        let record = drafted_record(&self.form);
        info!("Adding record {:?} - {:?}", record.name, record.color);
        self.status_message = format!("Added {}", record.name);
        self.store.append(record);
        self.list.replace_items(self.store.snapshot());
        self.form = RecordForm::new();
        self.mode = Mode::Browsing;
        info!("Mode: {:?} -> {:?}", Mode::Editing, Mode::Browsing);
        Effect::None
    }

    /// Mirror the highlighted record into the form while browsing.
    ///
    /// No-op while editing, or when nothing is highlighted.
    pub fn sync_form_with_selection(&mut self) {
        if self.mode != Mode::Browsing {
            return;
        }
        let Some(record) = self
            .list
            .current_selection_index()
            .and_then(|i| self.store.get(i))
        else {
            return;
        };
        for key in [NAME_KEY, COLOR_KEY] {
            self.form.set_field(key, record.field(key).unwrap_or_default());
        }
    }
}

/// Build a record from the form's fields. Missing fields become empty strings.
fn drafted_record(form: &RecordForm) -> Record {
    Record::new(
        form.read_field(NAME_KEY).unwrap_or_default(),
        form.read_field(COLOR_KEY).unwrap_or_default(),
    )
}

impl Component for ViewController {
    /// List on the left, form on the right, status line underneath.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [main_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [list_area, form_area] =
            Layout::horizontal([Constraint::Length(self.list_width), Constraint::Min(0)])
                .areas(main_area);

        self.list.render(frame, list_area);
        self.form.render(frame, form_area);

        StatusBar::new(
            self.mode,
            self.new_record_key.to_string(),
            self.store.len(),
            self.status_message.clone(),
        )
        .render(frame, footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{feed, test_controller, type_text};
    use crossterm::event::KeyCode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn preview(ui: &ViewController) -> (String, String) {
        (
            ui.form().read_field(NAME_KEY).unwrap_or_default().to_string(),
            ui.form().read_field(COLOR_KEY).unwrap_or_default().to_string(),
        )
    }

    #[test]
    fn test_starts_browsing_with_preview_of_first_record() {
        let ui = test_controller();
        assert_eq!(ui.mode(), Mode::Browsing);
        assert_eq!(ui.store().len(), 5);
        assert_eq!(preview(&ui), ("Apple".to_string(), "Green".to_string()));
    }

    #[test]
    fn test_navigation_updates_preview() {
        let mut ui = test_controller();
        feed(&mut ui, TuiEvent::key(KeyCode::Down));
        assert_eq!(preview(&ui), ("Orange".to_string(), "Orange".to_string()));

        feed(&mut ui, TuiEvent::char('G'));
        assert_eq!(preview(&ui), ("Lychee".to_string(), "White".to_string()));
    }

    #[test]
    fn test_new_record_key_enters_editing_with_blank_draft() {
        let mut ui = test_controller();
        feed(&mut ui, TuiEvent::ctrl('n'));
        assert_eq!(ui.mode(), Mode::Editing);
        assert!(ui.form().is_blank());
        assert_eq!(ui.form().focused_field(), Some(0));
    }

    #[test]
    fn test_new_record_key_while_editing_restarts_draft() {
        let mut ui = test_controller();
        feed(&mut ui, TuiEvent::ctrl('n'));
        for event in type_text("Kiw") {
            feed(&mut ui, event);
        }
        feed(&mut ui, TuiEvent::key(KeyCode::Tab));
        feed(&mut ui, TuiEvent::char('B'));

        feed(&mut ui, TuiEvent::ctrl('n'));
        assert_eq!(ui.mode(), Mode::Editing);
        assert!(ui.form().is_blank());
        assert_eq!(ui.form().focused_field(), Some(0));
        assert_eq!(ui.status_message(), "Draft discarded");

        // Still idempotent on an already blank draft
        feed(&mut ui, TuiEvent::ctrl('n'));
        assert!(ui.form().is_blank());
        assert_eq!(ui.form().focused_field(), Some(0));
        assert_eq!(ui.status_message(), "");
    }

    #[test]
    fn test_completion_is_queued_as_separate_step() {
        let mut ui = test_controller();
        ui.dispatch(Msg::Input(TuiEvent::ctrl('n')));
        ui.dispatch(Msg::Input(TuiEvent::key(KeyCode::Enter)));

        let effect = ui.dispatch(Msg::Input(TuiEvent::key(KeyCode::Enter)));
        assert_eq!(effect, Effect::Dispatch(Msg::FormCompleted));
        // Nothing committed until the queued message runs
        assert_eq!(ui.store().len(), 5);
        assert_eq!(ui.mode(), Mode::Editing);

        assert_eq!(ui.dispatch(Msg::FormCompleted), Effect::None);
        assert_eq!(ui.store().len(), 6);
        assert_eq!(ui.store().get(5), Some(&Record::new("", "")));
        assert_eq!(ui.mode(), Mode::Browsing);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut ui = test_controller();
        assert_eq!(ui.dispatch(Msg::FormCompleted), Effect::None);
        assert_eq!(ui.store().len(), 5);

        // Editing but the form never completed
        ui.dispatch(Msg::Input(TuiEvent::ctrl('n')));
        assert_eq!(ui.dispatch(Msg::FormCompleted), Effect::None);
        assert_eq!(ui.store().len(), 5);
        assert_eq!(ui.mode(), Mode::Editing);
    }

    #[test]
    fn test_quit_from_either_mode() {
        let mut ui = test_controller();
        assert_eq!(ui.dispatch(Msg::Input(TuiEvent::char('q'))), Effect::Quit);

        ui.dispatch(Msg::Input(TuiEvent::ctrl('n')));
        // q is text while editing
        assert_eq!(ui.dispatch(Msg::Input(TuiEvent::char('q'))), Effect::None);
        assert_eq!(ui.form().read_field(NAME_KEY), Some("q"));
        assert_eq!(ui.dispatch(Msg::Input(TuiEvent::ctrl('c'))), Effect::Quit);
    }

    #[test]
    fn test_empty_store_navigation_leaves_form_alone() {
        let mut ui = ViewController::new(RecordStore::new(), "ctrl+n".parse().unwrap());
        assert!(ui.form().is_blank());
        for event in [
            TuiEvent::key(KeyCode::Down),
            TuiEvent::key(KeyCode::Up),
            TuiEvent::char('G'),
        ] {
            assert_eq!(ui.dispatch(Msg::Input(event)), Effect::None);
        }
        assert!(ui.form().is_blank());
        assert_eq!(ui.list().current_selection_index(), None);
    }

    #[test]
    fn test_filter_without_matches_keeps_last_preview() {
        let mut ui = test_controller();
        feed(&mut ui, TuiEvent::char('j'));
        feed(&mut ui, TuiEvent::char('/'));
        for event in type_text("xyz") {
            feed(&mut ui, event);
        }
        assert_eq!(ui.list().current_selection_index(), None);
        assert_eq!(preview(&ui), ("Orange".to_string(), "Orange".to_string()));
    }

    #[test]
    fn test_drafted_record_defaults_missing_fields() {
        let form = RecordForm::new();
        assert_eq!(drafted_record(&form), Record::default());
    }

    #[test]
    fn test_render_composes_list_then_form() {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        let mut ui = test_controller();
        terminal.draw(|f| ui.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..70).map(|x| buffer[(x, y)].symbol()).collect()
        };
        let first_item_row = row(1);
        let list_pos = first_item_row.find("Apple - Green").unwrap();
        let form_pos = first_item_row.find("Name").unwrap();
        assert!(list_pos < form_pos);
        assert!(row(11).contains("5 records"));
    }
}
