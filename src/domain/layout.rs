//! Association management between a configuration and its members.
//!
//! Members reference their configuration by id only. Owner changes go through
//! [`attach`], [`attach_id`] and [`detach`]; the DTO mappers use [`attach_id`] since
//! requests carry the owner as a bare id.

use super::{GridColumn, GridConfiguration, GridToolbarItem};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("grid configuration '{0}' must be saved before members can be attached")]
    UnsavedOwner(String),
}

/// A record that belongs to at most one grid configuration.
pub trait ConfigurationMember {
    fn grid_configuration_id(&self) -> Option<i64>;
    fn set_grid_configuration_id(&mut self, id: Option<i64>);

    fn is_member_of(&self, configuration: &GridConfiguration) -> bool {
        match (self.grid_configuration_id(), configuration.id.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Point `member` at `owner`. The owner must already carry an id.
pub fn attach<M: ConfigurationMember>(owner: &GridConfiguration, member: &mut M) -> Result<(), DomainError> {
    let id = owner
        .id
        .id()
        .ok_or_else(|| DomainError::UnsavedOwner(owner.grid_name.clone()))?;
    attach_id(member, id);
    Ok(())
}

/// Point `member` at the configuration with `owner_id`. Whether that row exists is
/// checked by the repository on write.
pub fn attach_id<M: ConfigurationMember>(member: &mut M, owner_id: i64) {
    member.set_grid_configuration_id(Some(owner_id));
}

pub fn detach<M: ConfigurationMember>(member: &mut M) {
    member.set_grid_configuration_id(None);
}

/// A configuration together with the columns and toolbar items that reference it.
#[derive(Clone, Debug)]
pub struct GridLayout {
    pub configuration: GridConfiguration,
    pub columns: Vec<GridColumn>,
    pub toolbar_items: Vec<GridToolbarItem>,
}

impl GridLayout {
    pub fn new(configuration: GridConfiguration) -> Self {
        GridLayout {
            configuration,
            columns: Vec::new(),
            toolbar_items: Vec::new(),
        }
    }

    /// Build a layout from loaded rows, keeping only members that reference this configuration.
    pub fn assemble(
        configuration: GridConfiguration,
        columns: Vec<GridColumn>,
        toolbar_items: Vec<GridToolbarItem>,
    ) -> Self {
        let columns = columns.into_iter().filter(|c| c.is_member_of(&configuration)).collect();
        let toolbar_items = toolbar_items
            .into_iter()
            .filter(|t| t.is_member_of(&configuration))
            .collect();
        GridLayout {
            configuration,
            columns,
            toolbar_items,
        }
    }

    pub fn add_column(&mut self, mut column: GridColumn) -> Result<&mut Self, DomainError> {
        attach(&self.configuration, &mut column)?;
        self.columns.push(column);
        Ok(self)
    }

    /// Remove a column (matched by saved id) and clear its owner reference.
    pub fn remove_column(&mut self, column: &GridColumn) -> Option<GridColumn> {
        let pos = self.columns.iter().position(|c| c == column)?;
        let mut removed = self.columns.remove(pos);
        detach(&mut removed);
        Some(removed)
    }

    pub fn add_toolbar_item(&mut self, mut item: GridToolbarItem) -> Result<&mut Self, DomainError> {
        attach(&self.configuration, &mut item)?;
        self.toolbar_items.push(item);
        Ok(self)
    }

    pub fn remove_toolbar_item(&mut self, item: &GridToolbarItem) -> Option<GridToolbarItem> {
        let pos = self.toolbar_items.iter().position(|t| t == item)?;
        let mut removed = self.toolbar_items.remove(pos);
        detach(&mut removed);
        Some(removed)
    }
}
