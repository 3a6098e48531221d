//! Generic use-case helpers.
//!
//! # Responsibility
//! - Expose create/retrieve/update/delete, sort, paginate and search over
//!   any `ModelRepository`.
//! - Shape outcomes into the uniform success/failure response.

pub mod crud;
