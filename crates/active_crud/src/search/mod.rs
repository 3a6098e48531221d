//! Search condition construction.
//!
//! # Responsibility
//! - Turn a search term and attribute list into a parameterized predicate.
//! - Keep condition text free of caller-provided values.

pub mod conditions;
