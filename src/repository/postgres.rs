//! PostgreSQL repository over a `PgPool`. Every mutation runs in one transaction.

use super::row::RawRow;
use super::rowmapper::has_record;
use super::table::EntityTable;
use super::{CrudRepository, Fetch, OwnedRepository, Patch};
use crate::domain::{ConfigurationMember, GridConfiguration, Identity};
use crate::error::{AppError, AppResult};
use crate::pagination::PageRequest;
use crate::sql::{self, QueryBuf, ENTITY_ALIAS, OWNER_ALIAS};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryScalar};
use sqlx::{PgConnection, PgPool, Postgres};
use std::marker::PhantomData;

pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            _entity: PhantomData,
        }
    }
}

fn bound(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .fold(sqlx::query(&q.sql), |query, p| query.bind(p.clone()))
}

fn bound_scalar<O>(q: &QueryBuf) -> QueryScalar<'_, Postgres, O, PgArguments>
where
    (O,): for<'r> sqlx::FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .fold(sqlx::query_scalar(&q.sql), |query, p| query.bind(p.clone()))
}

/// Map an aliased row to a record; the owner is present only when it was joined and matched.
fn record_from_row<T: EntityTable>(row: &PgRow) -> AppResult<T::Record> {
    record_from_raw::<T>(&RawRow::from(row))
}

fn record_from_raw<T: EntityTable>(raw: &RawRow) -> AppResult<T::Record> {
    let entity = T::from_row(raw, ENTITY_ALIAS)?;
    let owner = if T::OWNER_FK.is_some() && has_record(raw, OWNER_ALIAS) {
        Some(GridConfiguration::from_row(raw, OWNER_ALIAS)?)
    } else {
        None
    };
    Ok(entity.into_record(owner))
}

async fn write<T: EntityTable>(conn: &mut PgConnection, id: i64, entity: &T) -> AppResult<()> {
    let q = sql::update(id, entity);
    let done = bound(&q).execute(&mut *conn).await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {}", T::LABEL, id)));
    }
    Ok(())
}

async fn reload<T: EntityTable>(conn: &mut PgConnection, id: i64) -> AppResult<T::Record> {
    let q = sql::select_by_id::<T>(id, Fetch::Eager);
    let row = bound(&q).fetch_one(&mut *conn).await?;
    record_from_row::<T>(&row)
}

#[async_trait]
impl<T: EntityTable> CrudRepository<T> for PgRepository<T> {
    async fn find_all_by(&self, page: &PageRequest, fetch: Fetch) -> AppResult<Vec<T::Record>> {
        let q = sql::select_page::<T>(page, fetch)?;
        let rows = bound(&q).fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row::<T>).collect()
    }

    async fn find_by_id(&self, id: i64, fetch: Fetch) -> AppResult<Option<T::Record>> {
        let q = sql::select_by_id::<T>(id, fetch);
        let row = bound(&q).fetch_optional(&self.pool).await?;
        row.as_ref().map(record_from_row::<T>).transpose()
    }

    async fn save(&self, entity: T) -> AppResult<T::Record> {
        let mut tx = self.pool.begin().await?;
        let id = match entity.identity() {
            Identity::Unsaved => {
                let q = sql::insert(&entity);
                bound_scalar::<i64>(&q).fetch_one(&mut *tx).await?
            }
            Identity::Saved(id) => {
                write(&mut *tx, id, &entity).await?;
                id
            }
        };
        let record = reload::<T>(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn update_with(&self, id: i64, patch: Patch<T>) -> AppResult<Option<T::Record>> {
        let mut tx = self.pool.begin().await?;
        let q = sql::select_for_update::<T>(id);
        let Some(row) = bound(&q).fetch_optional(&mut *tx).await? else {
            return Ok(None);
        };
        let mut entity = T::from_row(&RawRow::from(&row), ENTITY_ALIAS)?;
        patch(&mut entity);
        entity.set_identity(Identity::Saved(id));
        write(&mut *tx, id, &entity).await?;
        let record = reload::<T>(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(Some(record))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        for (table, fk) in T::DEPENDENTS {
            let q = sql::detach(table, fk, id);
            let done = bound(&q).execute(&mut *tx).await?;
            if done.rows_affected() > 0 {
                tracing::debug!(table = %table, owner = id, detached = done.rows_affected(), "detached members");
            }
        }
        let q = sql::delete::<T>(id);
        bound(&q).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let q = sql::exists::<T>(id);
        Ok(bound_scalar::<bool>(&q).fetch_one(&self.pool).await?)
    }

    async fn count(&self) -> AppResult<i64> {
        let q = sql::count::<T>();
        Ok(bound_scalar::<i64>(&q).fetch_one(&self.pool).await?)
    }
}

#[async_trait]
impl<T: EntityTable + ConfigurationMember> OwnedRepository<T> for PgRepository<T> {
    async fn find_by_grid_configuration(&self, grid_configuration_id: i64) -> AppResult<Vec<T>> {
        self.find_by_owner(Some(grid_configuration_id)).await
    }

    async fn find_all_where_grid_configuration_is_null(&self) -> AppResult<Vec<T>> {
        self.find_by_owner(None).await
    }
}

impl<T: EntityTable> PgRepository<T> {
    async fn find_by_owner(&self, owner: Option<i64>) -> AppResult<Vec<T>> {
        let fk = T::OWNER_FK
            .ok_or_else(|| AppError::Internal(format!("{} has no owner column", T::LABEL)))?;
        let q = sql::select_by_owner::<T>(fk, owner);
        let rows = bound(&q).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| T::from_row(&RawRow::from(r), ENTITY_ALIAS))
            .collect()
    }
}
