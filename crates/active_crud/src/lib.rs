//! Generic CRUD, sorting, pagination and substring search helpers for any
//! record type stored through a model repository.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, CrudConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::errors::ValidationErrors;
pub use model::inflect::{pluralize, table_name_for};
pub use model::record::{Model, RecordId};
pub use repo::model_repo::{ModelRepository, RepoError, RepoResult, SortDirection};
pub use repo::page::{IntoPageNumber, Page};
pub use repo::sqlite_repo::SqliteModelRepository;
pub use search::conditions::{search_condition, Condition};
pub use service::crud::{
    create, delete, paginate, retrieve, retrieve_all, search, sort, update, CrudResponse,
};

/// Returns the crate version.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
