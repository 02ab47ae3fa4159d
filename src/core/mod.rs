//! # Core Data
//!
//! The record data behind the interface. Knows nothing about ratatui or
//! crossterm.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Record (name, color) │
//!                    │  • RecordStore          │
//!                    │  • Config resolution    │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │ owned by
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │     ViewController      │
//!                    │     (tui adapter)       │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: The `Record` struct and the seed data
//! - [`store`]: `RecordStore`, the ordered append-only collection
//! - [`config`]: Config file loading and override resolution

pub mod config;
pub mod record;
pub mod store;
