//! Persistence ports and their PostgreSQL and in-memory adapters.

mod local;
mod postgres;
pub mod row;
pub mod rowmapper;
pub mod table;

pub use local::{LocalRepository, LocalStore};
pub use postgres::PgRepository;
pub use table::EntityTable;

use crate::domain::GridConfiguration;
use crate::error::AppResult;
use crate::pagination::PageRequest;
use async_trait::async_trait;

/// Whether reads of member records join their owning configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fetch {
    #[default]
    Eager,
    Lazy,
}

/// A member record with its owner, when the owner was loaded.
#[derive(Clone, Debug)]
pub struct WithConfiguration<T> {
    pub entity: T,
    pub grid_configuration: Option<GridConfiguration>,
}

impl<T> WithConfiguration<T> {
    pub fn new(entity: T, grid_configuration: Option<GridConfiguration>) -> Self {
        WithConfiguration {
            entity,
            grid_configuration,
        }
    }
}

/// Change applied to a locked row between read and write.
pub type Patch<T> = Box<dyn FnOnce(&mut T) + Send>;

#[async_trait]
pub trait CrudRepository<T: EntityTable>: Send + Sync {
    /// One page ordered by the requested properties, `id` ascending otherwise.
    async fn find_all_by(&self, page: &PageRequest, fetch: Fetch) -> AppResult<Vec<T::Record>>;

    async fn find_by_id(&self, id: i64, fetch: Fetch) -> AppResult<Option<T::Record>>;

    /// Insert when unsaved, update when saved. Updating a missing row is `NotFound`.
    async fn save(&self, entity: T) -> AppResult<T::Record>;

    /// Read with a row lock, apply `patch`, write back. `None` when the row is absent.
    async fn update_with(&self, id: i64, patch: Patch<T>) -> AppResult<Option<T::Record>>;

    /// Remove the row, detaching records that reference it. Missing ids are ignored.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

/// Lookups by owning configuration, for member tables.
#[async_trait]
pub trait OwnedRepository<T: EntityTable>: Send + Sync {
    async fn find_by_grid_configuration(&self, grid_configuration_id: i64) -> AppResult<Vec<T>>;

    async fn find_all_where_grid_configuration_is_null(&self) -> AppResult<Vec<T>>;
}
