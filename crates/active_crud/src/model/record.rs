//! `Model` trait implemented by persisted record types.
//!
//! # Invariants
//! - `columns()` excludes the `id` primary key.
//! - `to_values()` yields one value per entry of `columns()`, in order.
//! - `from_row()` reads `id` plus every entry of `columns()` by name.
//! - The backing table has an `id INTEGER PRIMARY KEY` column.

use crate::model::errors::ValidationErrors;
use crate::model::inflect::table_name_for;
use rusqlite::types::Value;
use rusqlite::Row;

/// Primary key of a stored record (SQLite rowid).
pub type RecordId = i64;

/// A record type that can be built from params, validated and stored.
///
/// `Params` is the partial attribute set used both for construction and for
/// updates; unset fields leave the current value untouched.
pub trait Model: Default + Sized {
    type Params;

    /// Model name, e.g. `Article`. Table name derives from it.
    const NAME: &'static str;

    /// Persisted columns, excluding `id`.
    fn columns() -> &'static [&'static str];

    fn table_name() -> String {
        table_name_for(Self::NAME)
    }

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: RecordId);

    /// Applies the set fields of `params` onto this record.
    fn assign(&mut self, params: Self::Params);

    /// Adds one entry to `errors` per failed rule. Default: no rules.
    fn validate(&self, errors: &mut ValidationErrors) {
        let _ = errors;
    }

    /// Column values in `columns()` order.
    fn to_values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Builds an unsaved record from params.
    fn build(params: Self::Params) -> Self {
        let mut record = Self::default();
        record.assign(params);
        record
    }

    /// Runs `validate` and returns the collected errors.
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.validate(&mut errors);
        errors
    }

    fn is_new_record(&self) -> bool {
        self.id().is_none()
    }
}
