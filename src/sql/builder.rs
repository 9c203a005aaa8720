//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and DDL from table descriptors.
//!
//! Identifiers come from the descriptors only; values are always parameters.

use super::params::SqlValue;
use crate::domain::GridConfiguration;
use crate::error::AppResult;
use crate::pagination::PageRequest;
use crate::repository::table::{sort_key, ColumnDef, EntityTable, SortKey};
use crate::repository::Fetch;

/// Alias of the queried table; its columns come back as `e_<column>`.
pub const ENTITY_ALIAS: &str = "e";
/// Alias of the joined owner table; its columns come back as `gridConfiguration_<column>`.
pub const OWNER_ALIAS: &str = "gridConfiguration";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn aliased(alias: &str, columns: &[ColumnDef]) -> Vec<String> {
    std::iter::once("id")
        .chain(columns.iter().map(|c| c.name))
        .map(|name| format!("{}.{} AS {}", quoted(alias), quoted(name), quoted(&format!("{}_{}", alias, name))))
        .collect()
}

fn joins_owner<T: EntityTable>(fetch: Fetch) -> Option<&'static str> {
    T::OWNER_FK.filter(|_| fetch == Fetch::Eager)
}

/// SELECT list and FROM clause, with the owner LEFT OUTER JOINed when eager.
fn select_from<T: EntityTable>(fetch: Fetch) -> String {
    let mut cols = aliased(ENTITY_ALIAS, T::COLUMNS);
    let mut from = format!("{} {}", quoted(T::TABLE), quoted(ENTITY_ALIAS));
    if let Some(fk) = joins_owner::<T>(fetch) {
        cols.extend(aliased(OWNER_ALIAS, GridConfiguration::COLUMNS));
        from.push_str(&format!(
            " LEFT OUTER JOIN {} {} ON {}.{} = {}.{}",
            quoted(GridConfiguration::TABLE),
            quoted(OWNER_ALIAS),
            quoted(ENTITY_ALIAS),
            quoted(fk),
            quoted(OWNER_ALIAS),
            quoted("id")
        ));
    }
    format!("SELECT {} FROM {}", cols.join(", "), from)
}

fn entity_id() -> String {
    format!("{}.{}", quoted(ENTITY_ALIAS), quoted("id"))
}

pub fn select_by_id<T: EntityTable>(id: i64, fetch: Fetch) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!("{} WHERE {} = ${}", select_from::<T>(fetch), entity_id(), n);
    q
}

/// One ordered page. Unknown sort properties are rejected; `id` breaks ties.
pub fn select_page<T: EntityTable>(page: &PageRequest, fetch: Fetch) -> AppResult<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut order = Vec::new();
    let mut has_id = false;
    for s in &page.sort {
        let key = sort_key::<T>(&s.property)?;
        has_id |= key == SortKey::Id;
        order.push(format!(
            "{}.{} {}",
            quoted(ENTITY_ALIAS),
            quoted(key.column_name::<T>()),
            s.direction.sql()
        ));
    }
    if !has_id {
        order.push(format!("{} ASC", entity_id()));
    }
    q.sql = format!(
        "{} ORDER BY {} LIMIT {} OFFSET {}",
        select_from::<T>(fetch),
        order.join(", "),
        page.size,
        page.offset()
    );
    Ok(q)
}

/// Members of one configuration, or orphans when `owner` is `None`.
pub fn select_by_owner<T: EntityTable>(fk: &str, owner: Option<i64>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let column = format!("{}.{}", quoted(ENTITY_ALIAS), quoted(fk));
    let predicate = match owner {
        Some(id) => format!("{} = ${}", column, q.push_param(id.into())),
        None => format!("{} IS NULL", column),
    };
    q.sql = format!(
        "{} WHERE {} ORDER BY {} ASC",
        select_from::<T>(Fetch::Lazy),
        predicate,
        entity_id()
    );
    q
}

/// Row-locking read used by PATCH. Never joins: FOR UPDATE cannot lock the nullable side of an outer join.
pub fn select_for_update<T: EntityTable>(id: i64) -> QueryBuf {
    let mut q = select_by_id::<T>(id, Fetch::Lazy);
    q.sql.push_str(" FOR UPDATE");
    q
}

pub fn insert<T: EntityTable>(entity: &T) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (c, v) in T::COLUMNS.iter().zip(entity.values()) {
        cols.push(quoted(c.name));
        placeholders.push(format!("${}", q.push_param(v)));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(T::TABLE),
        cols.join(", "),
        placeholders.join(", "),
        quoted("id")
    );
    q
}

/// UPDATE every column by id.
pub fn update<T: EntityTable>(id: i64, entity: &T) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = T::COLUMNS
        .iter()
        .zip(entity.values())
        .map(|(c, v)| format!("{} = ${}", quoted(c.name), q.push_param(v)))
        .collect();
    let n = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(T::TABLE),
        sets.join(", "),
        quoted("id"),
        n
    );
    q
}

pub fn delete<T: EntityTable>(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(T::TABLE), quoted("id"), n);
    q
}

/// Clear `fk` on every row of `table` that points at `id`.
pub fn detach(table: &str, fk: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} = NULL WHERE {} = ${}",
        quoted(table),
        quoted(fk),
        quoted(fk),
        n
    );
    q
}

pub fn count<T: EntityTable>() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(T::TABLE));
    q
}

pub fn exists<T: EntityTable>(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ${})",
        quoted(T::TABLE),
        quoted("id"),
        n
    );
    q
}

/// CREATE TABLE (and owner index) statements for `T`, idempotent.
pub fn create_table<T: EntityTable>() -> Vec<String> {
    let mut defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted("id"))];
    for c in T::COLUMNS {
        let mut def = format!("{} {}", quoted(c.name), c.sql_type.ddl());
        if c.required {
            def.push_str(" NOT NULL");
        }
        if T::OWNER_FK == Some(c.name) {
            def.push_str(&format!(
                " REFERENCES {} ({})",
                quoted(GridConfiguration::TABLE),
                quoted("id")
            ));
        }
        defs.push(def);
    }
    let mut statements = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(T::TABLE),
        defs.join(", ")
    )];
    if let Some(fk) = T::OWNER_FK {
        statements.push(format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quoted(&format!("idx_{}_{}", T::TABLE, fk)),
            quoted(T::TABLE),
            quoted(fk)
        ));
    }
    statements
}
