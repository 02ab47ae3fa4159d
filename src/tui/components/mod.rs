//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: bottom line with key hints, record count and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `RecordList`: navigable, filterable list of records
//! - `RecordForm`: two-field form for drafting a record
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests. Components never see the `RecordStore`; the
//! view controller passes them what they show.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── record_list.rs   (List of records with filter)
//! ├── record_form/     (Name + color form)
//! └── status_bar.rs    (Footer)
//! ```

pub mod record_form;
pub mod record_list;
mod status_bar;

pub use record_form::{FormEvent, FormState, RecordForm};
pub use record_list::{FilterState, ListEvent, RecordList, record_line};
pub use status_bar::StatusBar;
