//! Read side of configuration layouts: a configuration with its members, and unassigned members.

use crate::domain::{GridColumn, GridConfiguration, GridLayout, GridToolbarItem};
use crate::dto::{GridColumnDto, GridLayoutDto, GridToolbarItemDto};
use crate::error::AppResult;
use crate::mapper::{EntityMapper, GridColumnMapper, GridConfigurationMapper, GridToolbarItemMapper};
use crate::repository::{CrudRepository, Fetch, OwnedRepository, WithConfiguration};
use std::sync::Arc;

pub struct LayoutService {
    configurations: Arc<dyn CrudRepository<GridConfiguration>>,
    columns: Arc<dyn OwnedRepository<GridColumn>>,
    toolbar_items: Arc<dyn OwnedRepository<GridToolbarItem>>,
}

impl LayoutService {
    pub fn new(
        configurations: Arc<dyn CrudRepository<GridConfiguration>>,
        columns: Arc<dyn OwnedRepository<GridColumn>>,
        toolbar_items: Arc<dyn OwnedRepository<GridToolbarItem>>,
    ) -> Self {
        LayoutService {
            configurations,
            columns,
            toolbar_items,
        }
    }

    pub async fn find_layout(&self, id: i64) -> AppResult<Option<GridLayoutDto>> {
        tracing::debug!(id, "find layout");
        let Some(configuration) = self.configurations.find_by_id(id, Fetch::Eager).await? else {
            return Ok(None);
        };
        let columns = self.columns.find_by_grid_configuration(id).await?;
        let toolbar_items = self.toolbar_items.find_by_grid_configuration(id).await?;
        let layout = GridLayout::assemble(configuration, columns, toolbar_items);
        Ok(Some(layout_dto(layout)))
    }

    pub async fn unassigned_columns(&self) -> AppResult<Vec<GridColumnDto>> {
        let columns = self.columns.find_all_where_grid_configuration_is_null().await?;
        Ok(columns
            .into_iter()
            .map(|c| GridColumnMapper::to_dto(&WithConfiguration::new(c, None)))
            .collect())
    }

    pub async fn unassigned_toolbar_items(&self) -> AppResult<Vec<GridToolbarItemDto>> {
        let items = self.toolbar_items.find_all_where_grid_configuration_is_null().await?;
        Ok(items
            .into_iter()
            .map(|t| GridToolbarItemMapper::to_dto(&WithConfiguration::new(t, None)))
            .collect())
    }
}

fn layout_dto(layout: GridLayout) -> GridLayoutDto {
    let owner = Some(layout.configuration.clone());
    GridLayoutDto {
        configuration: GridConfigurationMapper::to_dto(&layout.configuration),
        columns: layout
            .columns
            .into_iter()
            .map(|c| GridColumnMapper::to_dto(&WithConfiguration::new(c, owner.clone())))
            .collect(),
        toolbar_items: layout
            .toolbar_items
            .into_iter()
            .map(|t| GridToolbarItemMapper::to_dto(&WithConfiguration::new(t, owner.clone())))
            .collect(),
    }
}
