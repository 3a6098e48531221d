//! Parameterized `WHERE` predicates.
//!
//! # Invariants
//! - `clause` only contains quoted identifiers, operators and placeholders.
//! - Every value referenced by `clause` is carried in `params`.
//! - Substring matching is case-sensitive (`instr`, not `LIKE`).

use crate::model::inflect::table_name_for;
use crate::repo::helpers::qualified_column;
use rusqlite::types::Value;

/// A predicate fragment plus the values bound to its placeholders.
///
/// Placeholders are numbered (`?1`, `?2`, ...) and index into `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    clause: String,
    params: Vec<Value>,
}

impl Condition {
    pub fn new(clause: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            clause: clause.into(),
            params,
        }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// OR-chain of `instr("table"."attr", ?1) > 0` across `attributes`.
    ///
    /// Returns `None` when `term` is blank or `attributes` is empty, meaning
    /// "no filtering".
    pub fn substring_any(table: &str, attributes: &[&str], term: &str) -> Option<Self> {
        if term.trim().is_empty() || attributes.is_empty() {
            return None;
        }

        let clause = attributes
            .iter()
            .map(|attribute| format!("instr({}, ?1) > 0", qualified_column(table, attribute)))
            .collect::<Vec<_>>()
            .join(" OR ");

        Some(Self::new(clause, vec![Value::Text(term.to_string())]))
    }
}

/// Search predicate for `model_name`, qualified with its pluralized table.
pub fn search_condition(model_name: &str, attributes: &[&str], term: &str) -> Option<Condition> {
    Condition::substring_any(&table_name_for(model_name), attributes, term)
}
