//! Stateless crud helpers over a model capability.
//!
//! # Responsibility
//! - Delegate each operation to the repository in a single call chain.
//! - Convert validation failures and missing ids into `CrudResponse`
//!   failures; propagate every other error unchanged.
//!
//! # Invariants
//! - A response carries either `message` (+ optional record) or `error`
//!   (+ optional errors), never both.
//! - Search terms are bound as parameters and never logged.

use crate::model::errors::ValidationErrors;
use crate::model::record::{Model, RecordId};
use crate::repo::model_repo::{ModelRepository, RepoError, RepoResult, SortDirection};
use crate::repo::page::{IntoPageNumber, Page};
use crate::search::conditions::search_condition;
use log::{info, warn};
use serde::Serialize;

pub const RECORD_CREATED: &str = "Record created successfully";
pub const RECORD_UPDATED: &str = "Record updated successfully";
pub const RECORD_DELETED: &str = "Record deleted successfully";
pub const CREATE_FAILED: &str = "Failed to create record";
pub const UPDATE_FAILED: &str = "Failed to update record";
pub const DELETE_FAILED: &str = "Failed to delete record";
pub const RECORD_NOT_FOUND: &str = "Record not found";

/// Uniform result of a single-record operation.
///
/// Serializes to `{message, record}`, `{message}`, `{error, errors}` or
/// `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CrudResponse<M> {
    Success {
        message: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        record: Option<M>,
    },
    Failure {
        error: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<ValidationErrors>,
    },
}

impl<M> CrudResponse<M> {
    fn success(message: &'static str, record: Option<M>) -> Self {
        Self::Success { message, record }
    }

    fn failure(error: &'static str, errors: Option<ValidationErrors>) -> Self {
        Self::Failure { error, errors }
    }

    fn not_found() -> Self {
        Self::failure(RECORD_NOT_FOUND, None)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Failure { error, .. } if *error == RECORD_NOT_FOUND)
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Success { message, .. } => Some(*message),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(*error),
        }
    }

    pub fn record(&self) -> Option<&M> {
        match self {
            Self::Success { record, .. } => record.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_record(self) -> Option<M> {
        match self {
            Self::Success { record, .. } => record,
            Self::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => errors.as_ref(),
        }
    }

    /// Converts the carried record, e.g. into a serializable view.
    pub fn map_record<N>(self, f: impl FnOnce(M) -> N) -> CrudResponse<N> {
        match self {
            Self::Success { message, record } => CrudResponse::Success {
                message,
                record: record.map(f),
            },
            Self::Failure { error, errors } => CrudResponse::Failure { error, errors },
        }
    }
}

/// Builds a record from `params` and saves it.
///
/// # Errors
/// Storage failures other than validation are returned as `Err`.
pub fn create<M, R>(repo: &R, params: M::Params) -> RepoResult<CrudResponse<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    let mut record = repo.build(params);

    match repo.save(&mut record) {
        Ok(()) => {
            info!(
                "event=record_create module=crud status=ok model={} id={}",
                repo.model_name(),
                record.id().unwrap_or_default()
            );
            Ok(CrudResponse::success(RECORD_CREATED, Some(record)))
        }
        Err(RepoError::Validation(errors)) => {
            warn!(
                "event=record_create module=crud status=invalid model={} error_count={}",
                repo.model_name(),
                errors.len()
            );
            Ok(CrudResponse::failure(CREATE_FAILED, Some(errors)))
        }
        Err(err) => Err(err),
    }
}

/// Returns every record, unfiltered.
pub fn retrieve_all<M, R>(repo: &R) -> RepoResult<Vec<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    repo.all()
}

/// Looks up one record by id.
///
/// A found record is returned as is, without a message; a missing id yields
/// the `Record not found` response.
pub fn retrieve<M, R>(repo: &R, id: RecordId) -> RepoResult<Result<M, CrudResponse<M>>>
where
    M: Model,
    R: ModelRepository<M>,
{
    Ok(find_or_not_found(repo, id)?.ok_or_else(CrudResponse::not_found))
}

/// Looks up one record, applies `params` and saves it.
pub fn update<M, R>(repo: &R, id: RecordId, params: M::Params) -> RepoResult<CrudResponse<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    let Some(mut record) = find_or_not_found(repo, id)? else {
        return Ok(CrudResponse::not_found());
    };

    match repo.update(&mut record, params) {
        Ok(()) => {
            info!(
                "event=record_update module=crud status=ok model={} id={}",
                repo.model_name(),
                id
            );
            Ok(CrudResponse::success(RECORD_UPDATED, Some(record)))
        }
        Err(RepoError::Validation(errors)) => {
            warn!(
                "event=record_update module=crud status=invalid model={} id={} error_count={}",
                repo.model_name(),
                id,
                errors.len()
            );
            Ok(CrudResponse::failure(UPDATE_FAILED, Some(errors)))
        }
        // Row removed between find and save.
        Err(RepoError::NotFound { .. }) => Ok(CrudResponse::not_found()),
        Err(err) => Err(err),
    }
}

/// Looks up one record and removes it.
pub fn delete<M, R>(repo: &R, id: RecordId) -> RepoResult<CrudResponse<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    let Some(record) = find_or_not_found(repo, id)? else {
        return Ok(CrudResponse::not_found());
    };

    if repo.destroy(&record)? {
        info!(
            "event=record_delete module=crud status=ok model={} id={}",
            repo.model_name(),
            id
        );
        Ok(CrudResponse::success(RECORD_DELETED, None))
    } else {
        warn!(
            "event=record_delete module=crud status=error model={} id={} error_code=no_rows_removed",
            repo.model_name(),
            id
        );
        Ok(CrudResponse::failure(DELETE_FAILED, None))
    }
}

/// All records ordered by `attribute`; the attribute is passed through
/// unchecked.
pub fn sort<M, R>(repo: &R, attribute: &str, order: SortDirection) -> RepoResult<Vec<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    repo.order(attribute, order)
}

/// One page of records. `page` is coerced to a positive integer, defaulting
/// to 1.
pub fn paginate<M, R, P>(repo: &R, page: P, per_page: Option<u32>) -> RepoResult<Page<M>>
where
    M: Model,
    R: ModelRepository<M>,
    P: IntoPageNumber,
{
    repo.paginate(page.into_page_number(), per_page)
}

/// Records where any of `attribute_names` contains `term` (case-sensitive).
///
/// Columns are qualified with the pluralized `model_name`, falling back to
/// the repository's model name. A blank `term` returns all records.
pub fn search<M, R>(
    repo: &R,
    attribute_names: &[&str],
    term: &str,
    model_name: Option<&str>,
) -> RepoResult<Vec<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    let model_name = model_name.unwrap_or_else(|| repo.model_name());

    match search_condition(model_name, attribute_names, term) {
        Some(condition) => repo.filter(&condition),
        None => repo.all(),
    }
}

fn find_or_not_found<M, R>(repo: &R, id: RecordId) -> RepoResult<Option<M>>
where
    M: Model,
    R: ModelRepository<M>,
{
    match repo.find(id) {
        Ok(record) => Ok(Some(record)),
        Err(RepoError::NotFound { .. }) => {
            info!(
                "event=record_lookup module=crud status=not_found model={} id={}",
                repo.model_name(),
                id
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{create, delete, paginate, retrieve, search, update, CrudResponse};
    use crate::db::DbError;
    use crate::model::errors::ValidationErrors;
    use crate::model::record::{Model, RecordId};
    use crate::repo::model_repo::{ModelRepository, RepoError, RepoResult, SortDirection};
    use crate::repo::page::Page;
    use crate::search::conditions::Condition;
    use rusqlite::types::Value;
    use rusqlite::Row;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Tag {
        id: Option<RecordId>,
        label: String,
    }

    impl Model for Tag {
        type Params = &'static str;
        const NAME: &'static str = "Tag";

        fn columns() -> &'static [&'static str] {
            &["label"]
        }

        fn id(&self) -> Option<RecordId> {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = Some(id);
        }

        fn assign(&mut self, params: Self::Params) {
            self.label = params.to_string();
        }

        fn validate(&self, errors: &mut ValidationErrors) {
            errors.require_present("label", &self.label);
        }

        fn to_values(&self) -> Vec<Value> {
            vec![Value::Text(self.label.clone())]
        }

        fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                label: row.get("label")?,
            })
        }
    }

    /// In-memory capability recording the last filter it received.
    #[derive(Default)]
    struct MemoryRepo {
        rows: RefCell<Vec<Tag>>,
        refuse_destroy: bool,
        fail_storage: bool,
        last_condition: RefCell<Option<Condition>>,
        last_page: Cell<Option<u32>>,
    }

    impl MemoryRepo {
        fn storage_error() -> RepoError {
            RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    impl ModelRepository<Tag> for MemoryRepo {
        fn save(&self, record: &mut Tag) -> RepoResult<()> {
            if self.fail_storage {
                return Err(Self::storage_error());
            }
            let errors = record.validation_errors();
            if !errors.is_empty() {
                return Err(RepoError::Validation(errors));
            }
            let mut rows = self.rows.borrow_mut();
            match record.id {
                Some(id) => {
                    let row = rows
                        .iter_mut()
                        .find(|row| row.id == Some(id))
                        .ok_or(RepoError::NotFound { model: "Tag", id })?;
                    *row = record.clone();
                }
                None => {
                    record.id = Some(rows.len() as RecordId + 1);
                    rows.push(record.clone());
                }
            }
            Ok(())
        }

        fn find(&self, id: RecordId) -> RepoResult<Tag> {
            if self.fail_storage {
                return Err(Self::storage_error());
            }
            self.rows
                .borrow()
                .iter()
                .find(|row| row.id == Some(id))
                .cloned()
                .ok_or(RepoError::NotFound { model: "Tag", id })
        }

        fn destroy(&self, record: &Tag) -> RepoResult<bool> {
            if self.refuse_destroy {
                return Ok(false);
            }
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| row.id != record.id);
            Ok(rows.len() < before)
        }

        fn all(&self) -> RepoResult<Vec<Tag>> {
            Ok(self.rows.borrow().clone())
        }

        fn order(&self, _attribute: &str, _direction: SortDirection) -> RepoResult<Vec<Tag>> {
            self.all()
        }

        fn paginate(&self, page: u32, per_page: Option<u32>) -> RepoResult<Page<Tag>> {
            self.last_page.set(Some(page));
            let per_page = per_page.unwrap_or(30);
            Ok(Page::new(Vec::new(), page, per_page, self.count()?))
        }

        fn filter(&self, condition: &Condition) -> RepoResult<Vec<Tag>> {
            *self.last_condition.borrow_mut() = Some(condition.clone());
            Ok(Vec::new())
        }

        fn count(&self) -> RepoResult<u64> {
            Ok(self.rows.borrow().len() as u64)
        }
    }

    #[test]
    fn create_reports_validation_errors_without_writing() {
        let repo = MemoryRepo::default();

        let response: CrudResponse<Tag> = create::<Tag, _>(&repo, "  ").unwrap();
        assert_eq!(response.error(), Some(super::CREATE_FAILED));
        assert_eq!(response.errors().unwrap().get("label"), ["can't be blank"]);
        assert!(repo.rows.borrow().is_empty());
    }

    #[test]
    fn storage_failures_propagate_as_errors() {
        let repo = MemoryRepo {
            fail_storage: true,
            ..MemoryRepo::default()
        };

        assert!(matches!(
            create::<Tag, _>(&repo, "rust"),
            Err(RepoError::Db(_))
        ));
        assert!(matches!(
            retrieve::<Tag, _>(&repo, 1),
            Err(RepoError::Db(_))
        ));
        assert!(matches!(
            delete::<Tag, _>(&repo, 1),
            Err(RepoError::Db(_))
        ));
    }

    #[test]
    fn missing_ids_become_not_found_responses() {
        let repo = MemoryRepo::default();

        assert!(retrieve::<Tag, _>(&repo, 9)
            .unwrap()
            .unwrap_err()
            .is_not_found());
        assert!(update::<Tag, _>(&repo, 9, "x").unwrap().is_not_found());
        assert!(delete::<Tag, _>(&repo, 9).unwrap().is_not_found());
    }

    #[test]
    fn retrieve_returns_the_bare_record() {
        let repo = MemoryRepo::default();
        create::<Tag, _>(&repo, "rust").unwrap();

        let tag = retrieve::<Tag, _>(&repo, 1).unwrap().unwrap();
        assert_eq!(tag.label, "rust");
        assert_eq!(tag.id, Some(1));
    }

    #[test]
    fn refused_destroy_is_a_delete_failure() {
        let repo = MemoryRepo {
            refuse_destroy: true,
            ..MemoryRepo::default()
        };
        create::<Tag, _>(&repo, "keep").unwrap();

        let response = delete::<Tag, _>(&repo, 1).unwrap();
        assert_eq!(response.error(), Some(super::DELETE_FAILED));
        assert!(response.errors().is_none());
    }

    #[test]
    fn paginate_coerces_page_before_delegating() {
        let repo = MemoryRepo::default();

        paginate::<Tag, _, _>(&repo, "-3", None).unwrap();
        assert_eq!(repo.last_page.get(), Some(1));

        paginate::<Tag, _, _>(&repo, "4", Some(2)).unwrap();
        assert_eq!(repo.last_page.get(), Some(4));
    }

    #[test]
    fn search_qualifies_with_override_model_name() {
        let repo = MemoryRepo::default();

        search::<Tag, _>(&repo, &["label"], "ru", Some("Category")).unwrap();
        let condition = repo.last_condition.borrow().clone().unwrap();
        assert!(condition.clause().contains("\"categories\".\"label\""));

        search::<Tag, _>(&repo, &["label"], "ru", None).unwrap();
        let condition = repo.last_condition.borrow().clone().unwrap();
        assert!(condition.clause().contains("\"tags\".\"label\""));
    }
}
