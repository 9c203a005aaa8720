//! In-memory repository shared by all three tables. Used for development and tests.

use super::table::{sort_key, EntityTable, SortKey};
use super::{CrudRepository, Fetch, OwnedRepository, Patch};
use crate::domain::{ConfigurationMember, GridColumn, GridConfiguration, GridToolbarItem, Identity};
use crate::error::{AppError, AppResult};
use crate::pagination::{Direction, PageRequest};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct LocalTable<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for LocalTable<T> {
    fn default() -> Self {
        LocalTable {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Default)]
pub struct LocalTables {
    grid_configurations: LocalTable<GridConfiguration>,
    grid_columns: LocalTable<GridColumn>,
    grid_toolbar_items: LocalTable<GridToolbarItem>,
}

impl LocalTables {
    fn owner(&self, id: Option<i64>) -> Option<GridConfiguration> {
        id.and_then(|id| self.grid_configurations.rows.get(&id).cloned())
    }

    fn check_owner<T: EntityTable>(&self, entity: &T) -> AppResult<()> {
        match entity.owner_id() {
            Some(id) if !self.grid_configurations.rows.contains_key(&id) => Err(AppError::BadRequest(format!(
                "{} references unknown grid configuration {}",
                T::LABEL,
                id
            ))),
            _ => Ok(()),
        }
    }
}

/// Table lookup for one record type, plus what deleting a row does to the others.
pub trait LocalEntity: EntityTable {
    fn table(tables: &LocalTables) -> &LocalTable<Self>;
    fn table_mut(tables: &mut LocalTables) -> &mut LocalTable<Self>;

    fn on_delete(_tables: &mut LocalTables, _id: i64) {}
}

impl LocalEntity for GridConfiguration {
    fn table(tables: &LocalTables) -> &LocalTable<Self> {
        &tables.grid_configurations
    }

    fn table_mut(tables: &mut LocalTables) -> &mut LocalTable<Self> {
        &mut tables.grid_configurations
    }

    fn on_delete(tables: &mut LocalTables, id: i64) {
        detach_members(&mut tables.grid_columns, id);
        detach_members(&mut tables.grid_toolbar_items, id);
    }
}

impl LocalEntity for GridColumn {
    fn table(tables: &LocalTables) -> &LocalTable<Self> {
        &tables.grid_columns
    }

    fn table_mut(tables: &mut LocalTables) -> &mut LocalTable<Self> {
        &mut tables.grid_columns
    }
}

impl LocalEntity for GridToolbarItem {
    fn table(tables: &LocalTables) -> &LocalTable<Self> {
        &tables.grid_toolbar_items
    }

    fn table_mut(tables: &mut LocalTables) -> &mut LocalTable<Self> {
        &mut tables.grid_toolbar_items
    }
}

fn detach_members<M: ConfigurationMember>(table: &mut LocalTable<M>, owner: i64) {
    for member in table.rows.values_mut() {
        if member.grid_configuration_id() == Some(owner) {
            crate::domain::layout::detach(member);
        }
    }
}

/// Handle to the shared tables; clones see the same data.
#[derive(Clone, Default)]
pub struct LocalStore {
    tables: Arc<RwLock<LocalTables>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository<T>(&self) -> LocalRepository<T> {
        LocalRepository {
            store: self.clone(),
            _entity: PhantomData,
        }
    }
}

pub struct LocalRepository<T> {
    store: LocalStore,
    _entity: PhantomData<fn() -> T>,
}

fn record<T: LocalEntity>(tables: &LocalTables, entity: &T, fetch: Fetch) -> T::Record {
    let owner = match fetch {
        Fetch::Eager => tables.owner(entity.owner_id()),
        Fetch::Lazy => None,
    };
    entity.clone().into_record(owner)
}

fn compare<T: EntityTable>(a: &T, b: &T, keys: &[(SortKey, Direction)]) -> Ordering {
    let (va, vb) = (a.values(), b.values());
    for (key, direction) in keys {
        let ord = match key {
            SortKey::Id => a.identity().id().cmp(&b.identity().id()),
            SortKey::Column(i) => va[*i].sort_cmp(&vb[*i]),
        };
        let ord = match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.identity().id().cmp(&b.identity().id())
}

#[async_trait]
impl<T: LocalEntity> CrudRepository<T> for LocalRepository<T> {
    async fn find_all_by(&self, page: &PageRequest, fetch: Fetch) -> AppResult<Vec<T::Record>> {
        let keys = page
            .sort
            .iter()
            .map(|s| Ok((sort_key::<T>(&s.property)?, s.direction)))
            .collect::<AppResult<Vec<_>>>()?;
        let tables = self.store.tables.read().await;
        let mut rows: Vec<&T> = T::table(&tables).rows.values().collect();
        rows.sort_by(|a, b| compare(*a, *b, &keys));
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .map(|e| record(&tables, e, fetch))
            .collect())
    }

    async fn find_by_id(&self, id: i64, fetch: Fetch) -> AppResult<Option<T::Record>> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables).rows.get(&id).map(|e| record(&tables, e, fetch)))
    }

    async fn save(&self, mut entity: T) -> AppResult<T::Record> {
        let mut tables = self.store.tables.write().await;
        tables.check_owner(&entity)?;
        let table = T::table_mut(&mut tables);
        let id = match entity.identity() {
            Identity::Unsaved => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
            Identity::Saved(id) if table.rows.contains_key(&id) => id,
            Identity::Saved(id) => return Err(AppError::NotFound(format!("{} {}", T::LABEL, id))),
        };
        entity.set_identity(Identity::Saved(id));
        table.rows.insert(id, entity.clone());
        Ok(record(&tables, &entity, Fetch::Eager))
    }

    async fn update_with(&self, id: i64, patch: Patch<T>) -> AppResult<Option<T::Record>> {
        let mut tables = self.store.tables.write().await;
        let Some(mut entity) = T::table(&tables).rows.get(&id).cloned() else {
            return Ok(None);
        };
        patch(&mut entity);
        entity.set_identity(Identity::Saved(id));
        tables.check_owner(&entity)?;
        T::table_mut(&mut tables).rows.insert(id, entity.clone());
        Ok(Some(record(&tables, &entity, Fetch::Eager)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tables = self.store.tables.write().await;
        T::on_delete(&mut tables, id);
        T::table_mut(&mut tables).rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables).rows.contains_key(&id))
    }

    async fn count(&self) -> AppResult<i64> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables).rows.len() as i64)
    }
}

#[async_trait]
impl<T: LocalEntity + ConfigurationMember> OwnedRepository<T> for LocalRepository<T> {
    async fn find_by_grid_configuration(&self, grid_configuration_id: i64) -> AppResult<Vec<T>> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables)
            .rows
            .values()
            .filter(|e| e.grid_configuration_id() == Some(grid_configuration_id))
            .cloned()
            .collect())
    }

    async fn find_all_where_grid_configuration_is_null(&self) -> AppResult<Vec<T>> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables)
            .rows
            .values()
            .filter(|e| e.grid_configuration_id().is_none())
            .cloned()
            .collect())
    }
}
