//! Per-attribute validation errors.

use crate::model::inflect::humanize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Attribute name -> failure messages, e.g. `title -> ["can't be blank"]`.
///
/// Serializes as a plain JSON object keyed by attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(attribute.into())
            .or_default()
            .push(message.into());
    }

    /// Adds `can't be blank` when `value` is empty after trimming.
    pub fn require_present(&mut self, attribute: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(attribute, "can't be blank");
        }
    }

    /// Adds a `too long` message when `value` exceeds `max` characters.
    pub fn require_max_length(&mut self, attribute: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                attribute,
                format!("is too long (maximum is {max} characters)"),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages across all attributes.
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    pub fn get(&self, attribute: &str) -> &[String] {
        self.messages
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Messages prefixed with the humanized attribute: `Title can't be blank`.
    pub fn full_messages(&self) -> Vec<String> {
        self.messages
            .iter()
            .flat_map(|(attribute, messages)| {
                let label = humanize(attribute);
                messages
                    .iter()
                    .map(move |message| format!("{label} {message}"))
            })
            .collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}
