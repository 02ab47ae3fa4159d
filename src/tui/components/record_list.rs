//! # RecordList Component
//!
//! Navigable, filterable list of records.
//!
//! The list keeps its own copy of the records it shows. It never reads the
//! store directly; the view controller pushes a fresh copy with
//! `replace_items` after every append.
//!
//! ## Keys
//!
//! - `↑`/`k`, `↓`/`j`: move the highlight
//! - `home`/`g`, `end`/`G`, `pgup`, `pgdn`: jump
//! - `/`: start filtering by name; `enter` applies, `esc` clears
//! - `q`, `esc` (no filter), `ctrl+c`: quit
//!
//! The highlighted position is exposed as an index into the full item
//! sequence, so it stays meaningful while a filter hides some items.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};

use crate::core::record::Record;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// Typing into the filter; keys go to the filter text.
    Filtering,
    FilterApplied,
}

/// Events emitted by the record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Quit,
}

/// Render one list row. Pure so it can be tested without a terminal.
pub fn record_line(record: &Record, is_selected: bool) -> Line<'static> {
    let style = if is_selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Line::from(Span::styled(
        format!("{} - {}", record.name, record.color),
        style,
    ))
}

pub struct RecordList {
    items: Vec<Record>,
    filter: String,
    filter_state: FilterState,
    /// Indices into `items` that pass the filter, in order.
    visible: Vec<usize>,
    /// Highlight position within `visible`.
    cursor: usize,
    list_state: ListState,
    /// Rows shown by the last render, used for page jumps.
    page_size: usize,
}

impl RecordList {
    pub fn new(records: &[Record]) -> Self {
        let mut list = Self {
            items: Vec::new(),
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            visible: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        list.replace_items(records);
        list
    }

    /// Swap in a new item sequence. The filter is re-applied and the
    /// highlight stays at the same position, clamped to the new length.
    pub fn replace_items(&mut self, records: &[Record]) {
        self.items = records.to_vec();
        self.refilter();
        self.clamp_cursor();
    }

    /// Index into the item sequence of the highlighted record.
    ///
    /// `None` when there are no items or the filter matches nothing.
    pub fn current_selection_index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Number of records passing the filter.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, r)| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    fn set_filter_text(&mut self, filter: String) {
        self.filter = filter;
        self.refilter();
        self.cursor = 0;
    }

    fn clear_filter(&mut self) {
        // Keep the highlighted record highlighted once everything is visible again
        let selected = self.current_selection_index();
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
        self.cursor = selected.unwrap_or(0);
        self.clamp_cursor();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Keys that move the highlight, shared by both filter states.
    fn navigate(&mut self, code: KeyCode) {
        let page = self.page_size.max(1) as isize;
        match code {
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-page),
            KeyCode::PageDown => self.move_cursor(page),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            KeyCode::Backspace => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.pop();
                self.set_filter_text(filter);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.push(c);
                self.set_filter_text(filter);
            }
            code => self.navigate(code),
        }
    }

    fn handle_browse_key(&mut self, key: &KeyEvent) -> Option<ListEvent> {
        match key.code {
            KeyCode::Char('q') => return Some(ListEvent::Quit),
            KeyCode::Esc if self.filter_state == FilterState::FilterApplied => self.clear_filter(),
            KeyCode::Esc => return Some(ListEvent::Quit),
            KeyCode::Char('/') => {
                debug!("Filtering started");
                self.filter_state = FilterState::Filtering;
            }
            KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.visible.len().saturating_sub(1);
            }
            code => self.navigate(code),
        }
        None
    }
}

impl EventHandler for RecordList {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if event.is_interrupt() {
            return Some(ListEvent::Quit);
        }
        match event {
            TuiEvent::Key(key) if self.filter_state == FilterState::Filtering => {
                self.handle_filter_key(key);
                None
            }
            TuiEvent::Key(key) => self.handle_browse_key(key),
            TuiEvent::Paste(text) if self.filter_state == FilterState::Filtering => {
                let filter = format!("{}{}", self.filter, text.replace('\n', ""));
                self.set_filter_text(filter);
                None
            }
            TuiEvent::Paste(_) | TuiEvent::Resize => None,
        }
    }
}

impl Component for RecordList {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.filter_state {
            FilterState::Unfiltered => " Records ".to_string(),
            FilterState::Filtering => format!(" Filter: {}_ ", self.filter),
            FilterState::FilterApplied => format!(" Filter: {} ", self.filter),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);
        self.page_size = block.inner(area).height as usize;

        if self.visible.is_empty() {
            let message = if self.items.is_empty() {
                "No records."
            } else {
                "No matches."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            self.list_state.select(None);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .enumerate()
            .map(|(pos, &i)| ListItem::new(record_line(&self.items[i], pos == self.cursor)))
            .collect();

        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(List::new(items).block(block), area, &mut self.list_state);
    }
}
