//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the model capability (`ModelRepository`) crud helpers call into.
//! - Isolate SQLite query details from the helpers.
//!
//! # Invariants
//! - Repository writes must run `Model::validate` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to DB transport errors.
//! - Caller-provided values are always bound as parameters; identifiers are
//!   always quoted.

pub(crate) mod helpers;
pub mod model_repo;
pub mod page;
pub mod sqlite_repo;
