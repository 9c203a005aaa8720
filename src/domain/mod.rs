//! Grid domain records: one struct per persisted row, owner relations by id.

mod grid_column;
mod grid_configuration;
mod grid_toolbar_item;
mod identity;
pub mod layout;

pub use grid_column::GridColumn;
pub use grid_configuration::GridConfiguration;
pub use grid_toolbar_item::GridToolbarItem;
pub use identity::Identity;
pub use layout::{ConfigurationMember, DomainError, GridLayout};
