//! Record model contracts shared by every persisted type.
//!
//! # Responsibility
//! - Define the `Model` trait a record type implements to be stored.
//! - Carry per-attribute validation errors back to callers.
//! - Derive table names from model names.
//!
//! # Invariants
//! - A record with `id() == None` has never been persisted.
//! - Table names are the downcased, pluralized model name.

pub mod errors;
pub mod inflect;
pub mod record;
