//! Model capability contract and repository errors.
//!
//! # Responsibility
//! - Name the persistence operations generic helpers delegate to.
//! - Provide the shared error and sort-direction types.
//!
//! # Invariants
//! - `save` never writes a record whose `validation_errors()` is non-empty.
//! - `find` reports a missing id as `RepoError::NotFound`, never as `Ok`.

use crate::db::DbError;
use crate::model::errors::ValidationErrors;
use crate::model::record::{Model, RecordId};
use crate::repo::page::Page;
use crate::search::conditions::Condition;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for record persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{model} not found: {id}")]
    NotFound { model: &'static str, id: RecordId },

    #[error("{model} has not been saved; cannot {action}")]
    Unsaved {
        model: &'static str,
        action: &'static str,
    },

    #[error("table `{0}` does not exist")]
    MissingTable(String),

    #[error("invalid sort direction `{0}`; expected asc|desc")]
    InvalidSortDirection(String),

    #[error("per_page must be at least 1")]
    InvalidPerPage,
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Direction for [`ModelRepository::order`]. Defaults to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = RepoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(RepoError::InvalidSortDirection(value.to_string())),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Persistence capability for one model type.
///
/// Mirrors the record-mapper surface the crud helpers rely on: construct,
/// save, find, update, destroy, plus collection queries.
pub trait ModelRepository<M: Model> {
    /// Model name used to derive table-qualified search conditions.
    fn model_name(&self) -> &'static str {
        M::NAME
    }

    /// Builds an unsaved record from params.
    fn build(&self, params: M::Params) -> M {
        M::build(params)
    }

    /// Inserts a new record (assigning its id) or updates a saved one.
    fn save(&self, record: &mut M) -> RepoResult<()>;

    fn find(&self, id: RecordId) -> RepoResult<M>;

    /// Assigns `params` onto `record` and saves it.
    fn update(&self, record: &mut M, params: M::Params) -> RepoResult<()> {
        record.assign(params);
        self.save(record)
    }

    /// Removes `record`; `Ok(false)` when no row was removed.
    fn destroy(&self, record: &M) -> RepoResult<bool>;

    fn all(&self) -> RepoResult<Vec<M>>;

    /// All records ordered by `attribute`. The attribute is not checked here;
    /// an unknown column surfaces as the storage error.
    fn order(&self, attribute: &str, direction: SortDirection) -> RepoResult<Vec<M>>;

    /// One page window; `per_page = None` uses the repository default.
    fn paginate(&self, page: u32, per_page: Option<u32>) -> RepoResult<Page<M>>;

    /// Records matching `condition`.
    fn filter(&self, condition: &Condition) -> RepoResult<Vec<M>>;

    fn count(&self) -> RepoResult<u64>;
}
