//! # Records
//!
//! A record is a name and a color. It has no identity beyond its position in
//! the store, so two records with equal fields are interchangeable.

use serde::{Deserialize, Serialize};

/// Field key for the record name, as used by the form.
pub const NAME_KEY: &str = "name";
/// Field key for the record color, as used by the form.
pub const COLOR_KEY: &str = "color";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    pub name: String,
    pub color: String,
}

impl Record {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// Value of the field stored under `key`, if the key is known.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            NAME_KEY => Some(&self.name),
            COLOR_KEY => Some(&self.color),
            _ => None,
        }
    }
}

/// The records every session starts with unless the config says otherwise.
pub fn seed_records() -> Vec<Record> {
    vec![
        Record::new("Apple", "Green"),
        Record::new("Orange", "Orange"),
        Record::new("Banana", "Yellow"),
        Record::new("Grapes", "Blue"),
        Record::new("Lychee", "White"),
    ]
}
