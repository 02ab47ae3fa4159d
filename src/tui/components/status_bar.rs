//! # StatusBar Component
//!
//! Bottom line with key hints for the active mode, the record count and the
//! last status message.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! StatusBar is purely presentational. It receives all data as props and has
//! no internal state, so the controller builds a fresh one every frame:
//!
//! ```rust,ignore
//! let mut bar = StatusBar::new(Mode::Browsing, "ctrl+n".into(), 5, String::new());
//! bar.render(frame, footer_area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"ctrl+n new • / filter • q quit | 5 records | Added Kiwi"`
//! 2. **Default**: `"ctrl+n new • / filter • q quit | 5 records"`

use crate::tui::Mode;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct StatusBar {
    /// Which component has focus
    pub mode: Mode,
    /// Label of the reserved "new record" binding (e.g. "ctrl+n")
    pub new_record_key: String,
    /// Records in the store
    pub record_count: usize,
    /// Transient status (e.g. "Added Kiwi")
    pub status_message: String,
}

impl StatusBar {
    pub fn new(
        mode: Mode,
        new_record_key: String,
        record_count: usize,
        status_message: String,
    ) -> Self {
        Self {
            mode,
            new_record_key,
            record_count,
            status_message,
        }
    }

    fn hints(&self) -> String {
        match self.mode {
            Mode::Browsing => format!(
                "{} new • / filter • ↑↓ move • q quit",
                self.new_record_key
            ),
            Mode::Editing => format!(
                "enter next/save • shift+tab back • {} restart • ctrl+c quit",
                self.new_record_key
            ),
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let noun = if self.record_count == 1 { "record" } else { "records" };
        let text = if self.status_message.is_empty() {
            format!("{} | {} {}", self.hints(), self.record_count, noun)
        } else {
            format!(
                "{} | {} {} | {}",
                self.hints(),
                self.record_count,
                noun,
                self.status_message
            )
        };

        frame.render_widget(
            Span::styled(text, Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}
