//! SQLite implementation of the model capability.
//!
//! # Responsibility
//! - Map `Model` records to rows of their pluralized table.
//! - Provide ordering, page windows and predicate filtering.
//!
//! # Invariants
//! - Every statement binds caller values as parameters.
//! - Collection reads without an explicit order are sorted by `id ASC`.
//! - Column references are table-qualified, so an unknown attribute is a
//!   storage error rather than a silent constant.

use crate::config::CrudConfig;
use crate::model::record::{Model, RecordId};
use crate::repo::helpers::{
    insert_sql, qualified_column, quote_identifier, select_sql, update_sql,
};
use crate::repo::model_repo::{ModelRepository, RepoError, RepoResult, SortDirection};
use crate::repo::page::{offset_for, Page};
use crate::search::conditions::Condition;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params};
use std::marker::PhantomData;

/// SQLite-backed repository for one model type.
pub struct SqliteModelRepository<'conn, M> {
    conn: &'conn Connection,
    table: String,
    default_per_page: u32,
    _model: PhantomData<fn() -> M>,
}

impl<'conn, M: Model> SqliteModelRepository<'conn, M> {
    /// Constructs a repository over a migrated connection with default config.
    ///
    /// # Errors
    /// - [`RepoError::MissingTable`] when `M::table_name()` is not present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_config(conn, &CrudConfig::default())
    }

    /// Like [`Self::try_new`], taking the page size default from `config`.
    pub fn with_config(conn: &'conn Connection, config: &CrudConfig) -> RepoResult<Self> {
        let table = M::table_name();
        ensure_table_exists(conn, &table)?;
        Ok(Self {
            conn,
            table,
            default_per_page: config.default_per_page.max(1),
            _model: PhantomData,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    fn select(&self) -> String {
        select_sql(&self.table, M::columns())
    }

    fn id_column(&self) -> String {
        qualified_column(&self.table, "id")
    }

    fn query_records<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<M>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| M::from_row(row))?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(
            "event=records_query module=repo status=ok table={} row_count={}",
            self.table,
            records.len()
        );
        Ok(records)
    }
}

impl<M: Model> ModelRepository<M> for SqliteModelRepository<'_, M> {
    fn save(&self, record: &mut M) -> RepoResult<()> {
        let errors = record.validation_errors();
        if !errors.is_empty() {
            debug!(
                "event=record_save module=repo status=invalid table={} error_count={}",
                self.table,
                errors.len()
            );
            return Err(RepoError::Validation(errors));
        }

        let mut values = record.to_values();
        match record.id() {
            None => {
                self.conn
                    .execute(&insert_sql(&self.table, M::columns()), params_from_iter(values))?;
                record.set_id(self.conn.last_insert_rowid());
            }
            Some(id) => {
                values.push(Value::Integer(id));
                let changed = self
                    .conn
                    .execute(&update_sql(&self.table, M::columns()), params_from_iter(values))?;
                if changed == 0 {
                    return Err(RepoError::NotFound { model: M::NAME, id });
                }
            }
        }

        Ok(())
    }

    fn find(&self, id: RecordId) -> RepoResult<M> {
        let sql = format!("{} WHERE {} = ?1", self.select(), self.id_column());
        self.conn
            .query_row(&sql, params![id], |row| M::from_row(row))
            .optional()?
            .ok_or(RepoError::NotFound { model: M::NAME, id })
    }

    fn destroy(&self, record: &M) -> RepoResult<bool> {
        let Some(id) = record.id() else {
            return Err(RepoError::Unsaved {
                model: M::NAME,
                action: "destroy",
            });
        };

        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE \"id\" = ?1;", quote_identifier(&self.table)),
            params![id],
        )?;
        Ok(changed > 0)
    }

    fn all(&self) -> RepoResult<Vec<M>> {
        let sql = format!("{} ORDER BY {} ASC", self.select(), self.id_column());
        self.query_records(&sql, [])
    }

    fn order(&self, attribute: &str, direction: SortDirection) -> RepoResult<Vec<M>> {
        let sql = format!(
            "{} ORDER BY {} {}, {} ASC",
            self.select(),
            qualified_column(&self.table, attribute),
            direction.as_sql(),
            self.id_column()
        );
        self.query_records(&sql, [])
    }

    fn paginate(&self, page: u32, per_page: Option<u32>) -> RepoResult<Page<M>> {
        let per_page = per_page.unwrap_or(self.default_per_page);
        if per_page == 0 {
            return Err(RepoError::InvalidPerPage);
        }
        let page = page.max(1);

        let total_entries = self.count()?;
        let offset = i64::try_from(offset_for(page, per_page)).unwrap_or(i64::MAX);
        let sql = format!(
            "{} ORDER BY {} ASC LIMIT ?1 OFFSET ?2",
            self.select(),
            self.id_column()
        );
        let items = self.query_records(&sql, params![i64::from(per_page), offset])?;

        Ok(Page::new(items, page, per_page, total_entries))
    }

    fn filter(&self, condition: &Condition) -> RepoResult<Vec<M>> {
        let sql = format!(
            "{} WHERE ({}) ORDER BY {} ASC",
            self.select(),
            condition.clause(),
            self.id_column()
        );
        self.query_records(&sql, params_from_iter(condition.params()))
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", quote_identifier(&self.table)),
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn ensure_table_exists(conn: &Connection, table: &str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type IN ('table', 'view') AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;

    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MissingTable(table.to_string()))
    }
}
