//! Shared application state: settings, the optional pool, and one service per resource.

use crate::domain::{GridColumn, GridConfiguration, GridToolbarItem};
use crate::mapper::{GridColumnMapper, GridConfigurationMapper, GridToolbarItemMapper};
use crate::repository::{CrudRepository, LocalStore, OwnedRepository, PgRepository};
use crate::service::{EntityService, LayoutService};
use crate::settings::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Set when backed by PostgreSQL; used by readiness checks.
    pub pool: Option<PgPool>,
    pub grid_configurations: Arc<EntityService<GridConfigurationMapper>>,
    pub grid_columns: Arc<EntityService<GridColumnMapper>>,
    pub grid_toolbar_items: Arc<EntityService<GridToolbarItemMapper>>,
    pub layouts: Arc<LayoutService>,
}

impl AppState {
    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        let configurations = Arc::new(PgRepository::<GridConfiguration>::new(pool.clone()));
        let columns = Arc::new(PgRepository::<GridColumn>::new(pool.clone()));
        let toolbar_items = Arc::new(PgRepository::<GridToolbarItem>::new(pool.clone()));
        Self::assemble(config, Some(pool), configurations, columns, toolbar_items)
    }

    pub fn local(config: AppConfig) -> Self {
        Self::local_with(config, LocalStore::new())
    }

    /// Local state over an existing store, so tests can seed or inspect it.
    pub fn local_with(config: AppConfig, store: LocalStore) -> Self {
        let configurations = Arc::new(store.repository::<GridConfiguration>());
        let columns = Arc::new(store.repository::<GridColumn>());
        let toolbar_items = Arc::new(store.repository::<GridToolbarItem>());
        Self::assemble(config, None, configurations, columns, toolbar_items)
    }

    fn assemble<C, M, T>(
        config: AppConfig,
        pool: Option<PgPool>,
        configurations: Arc<C>,
        columns: Arc<M>,
        toolbar_items: Arc<T>,
    ) -> Self
    where
        C: CrudRepository<GridConfiguration> + 'static,
        M: CrudRepository<GridColumn> + OwnedRepository<GridColumn> + 'static,
        T: CrudRepository<GridToolbarItem> + OwnedRepository<GridToolbarItem> + 'static,
    {
        let layouts = LayoutService::new(configurations.clone(), columns.clone(), toolbar_items.clone());
        AppState {
            config: Arc::new(config),
            pool,
            grid_configurations: Arc::new(EntityService::<GridConfigurationMapper>::new(configurations)),
            grid_columns: Arc::new(EntityService::<GridColumnMapper>::new(columns)),
            grid_toolbar_items: Arc::new(EntityService::<GridToolbarItemMapper>::new(toolbar_items)),
            layouts: Arc::new(layouts),
        }
    }
}
